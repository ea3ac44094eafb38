use crate::limits::MAX_LEEWAY_SECONDS;

/// Time-claim checks applied by a verifier
///
/// ```
/// use jwtguard::VerificationOptions;
///
/// let options = VerificationOptions::default()
///     .leeway(30)
///     .require_expiration()
///     .no_iat_validation();
/// assert_eq!(options.leeway_seconds(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOptions {
    validate_exp: bool,
    validate_nbf: bool,
    validate_iat: bool,
    require_exp: bool,
    leeway_seconds: u64,
}

impl Default for VerificationOptions {
    fn default() -> Self {
        Self {
            validate_exp: true,
            validate_nbf: true,
            validate_iat: true,
            require_exp: false,
            leeway_seconds: 0,
        }
    }
}

impl VerificationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance for `exp`, `nbf` and `iat`
    ///
    /// # Security
    /// Leeway is limited to 300 seconds (5 minutes). A larger value is
    /// rejected when the options are applied to a verifier.
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Reject tokens without an `exp` claim
    pub fn require_expiration(mut self) -> Self {
        self.require_exp = true;
        self.validate_exp = true;
        self
    }

    /// Disable expiration validation
    pub fn no_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self.require_exp = false;
        self
    }

    /// Disable not-before validation
    pub fn no_nbf_validation(mut self) -> Self {
        self.validate_nbf = false;
        self
    }

    /// Disable issued-at validation
    pub fn no_iat_validation(mut self) -> Self {
        self.validate_iat = false;
        self
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }

    pub fn validates_exp(&self) -> bool {
        self.validate_exp
    }

    pub fn requires_exp(&self) -> bool {
        self.require_exp
    }

    pub fn validates_nbf(&self) -> bool {
        self.validate_nbf
    }

    pub fn validates_iat(&self) -> bool {
        self.validate_iat
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        if self.leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(format!(
                "leeway of {} seconds exceeds maximum of {MAX_LEEWAY_SECONDS} seconds",
                self.leeway_seconds
            ));
        }
        Ok(())
    }
}
