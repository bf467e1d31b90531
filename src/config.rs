use crate::domain::validation::LoanLimits;

/// Runtime settings shared by the service and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Deployment label reported by health checks and stamped on analytics.
    pub environment: String,
    pub version: String,
    /// Currency code echoed on calculation results when a request omits one.
    pub currency: String,
    pub limits: LoanLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            currency: "USD".to_string(),
            limits: LoanLimits::default(),
        }
    }
}
