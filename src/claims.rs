//! Registered time claims
//!
//! Only `exp`, `nbf` and `iat` are read from the payload; the rest of the
//! claims are returned to the caller as text.

use crate::error::Rejection;
use crate::limits::{MAX_TIMESTAMP, MIN_TIMESTAMP};
use crate::options::VerificationOptions;
use miniserde::Deserialize;
use miniserde::json::Object;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisteredClaims {
    /// Expiration Time (seconds since Unix epoch)
    #[serde(rename = "exp")]
    pub expiration: Option<i64>,

    /// Not Before (seconds since Unix epoch)
    #[serde(rename = "nbf")]
    pub not_before: Option<i64>,

    /// Issued At (seconds since Unix epoch)
    #[serde(rename = "iat")]
    pub issued_at: Option<i64>,
}

impl RegisteredClaims {
    pub(crate) fn parse(json: &str) -> Result<Self, Rejection> {
        miniserde::json::from_str(json).map_err(|e| {
            // Well-formed JSON that still fails here has a mistyped time claim
            if miniserde::json::from_str::<Object>(json).is_ok() {
                Rejection::TimeClaimsInvalid
            } else {
                Rejection::SegmentJson {
                    segment: "payload",
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Validate time claims against `now`
pub(crate) fn validate_claims(
    claims: &RegisteredClaims,
    options: &VerificationOptions,
    now: i64,
) -> Result<(), Rejection> {
    let leeway = options.leeway_seconds();
    let leeway_i64 = leeway as i64;

    // Validate timestamp bounds
    for (claim, value) in [
        ("exp", claims.expiration),
        ("nbf", claims.not_before),
        ("iat", claims.issued_at),
    ] {
        if let Some(value) = value {
            validate_timestamp_bounds(claim, value)?;
        }
    }

    if options.validates_exp() {
        match claims.expiration {
            Some(exp) if now > exp.saturating_add(leeway_i64) => {
                return Err(Rejection::Expired {
                    expired_at: exp,
                    now,
                    leeway,
                });
            }
            None if options.requires_exp() => return Err(Rejection::MissingExpiration),
            _ => {}
        }
    }

    if options.validates_nbf() {
        if let Some(nbf) = claims.not_before {
            if now.saturating_add(leeway_i64) < nbf {
                return Err(Rejection::NotYetValid {
                    not_before: nbf,
                    now,
                    leeway,
                });
            }
        }
    }

    if options.validates_iat() {
        if let Some(iat) = claims.issued_at {
            if iat > now.saturating_add(leeway_i64) {
                return Err(Rejection::IssuedInFuture {
                    issued_at: iat,
                    now,
                    leeway,
                });
            }
        }
    }

    Ok(())
}

fn validate_timestamp_bounds(claim: &'static str, value: i64) -> Result<(), Rejection> {
    if !(MIN_TIMESTAMP..=MAX_TIMESTAMP).contains(&value) {
        return Err(Rejection::TimestampOutOfBounds {
            claim,
            value,
            min: MIN_TIMESTAMP,
            max: MAX_TIMESTAMP,
        });
    }
    Ok(())
}

/// Get current Unix timestamp
pub(crate) fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}
