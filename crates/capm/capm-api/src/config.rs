//! CAPM configuration types.

use capm_spi::{BetaMethod, CapmError, Frequency, Result};
use serde::{Deserialize, Serialize};

/// Annual risk-free rate used when none is configured (5%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.05;

/// Monthly returns are annualized by this factor.
pub const MONTHS_IN_YEAR: f64 = 12.0;

// ============================================================================
// Estimation Configuration
// ============================================================================

/// Parameters of one CAPM estimation run.
///
/// Deserialization goes through [`CapmConfigBuilder`], so a document that names
/// only a frequency is annualized by that frequency's periods per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CapmConfigBuilder")]
pub struct CapmConfig {
    /// Annual risk-free rate as a decimal fraction (0.01 = 1%).
    pub risk_free_rate: f64,
    /// Periods per year used to annualize the mean market return.
    pub annualization_factor: f64,
    /// Resampling frequency for raw prices.
    pub frequency: Frequency,
    /// Strategy that supplies the reported beta.
    pub beta_method: BetaMethod,
}

impl CapmConfig {
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ..Self::default()
        }
    }

    /// Configuration for a resampling frequency, annualized accordingly.
    pub fn for_frequency(frequency: Frequency) -> Self {
        Self {
            annualization_factor: frequency.periods_per_year(),
            frequency,
            ..Self::default()
        }
    }

    pub fn weekly() -> Self {
        Self::for_frequency(Frequency::Weekly)
    }

    pub fn monthly() -> Self {
        Self::for_frequency(Frequency::Monthly)
    }

    pub fn quarterly() -> Self {
        Self::for_frequency(Frequency::Quarterly)
    }

    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn with_beta_method(mut self, beta_method: BetaMethod) -> Self {
        self.beta_method = beta_method;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(CapmError::invalid_parameter(
                "risk_free_rate",
                "must be a finite decimal fraction",
            ));
        }
        if !(self.annualization_factor.is_finite() && self.annualization_factor > 0.0) {
            return Err(CapmError::invalid_parameter(
                "annualization_factor",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for CapmConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            annualization_factor: MONTHS_IN_YEAR,
            frequency: Frequency::Monthly,
            beta_method: BetaMethod::Regression,
        }
    }
}

/// Builder for CapmConfig. Also the on-disk shape of a partial configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CapmConfigBuilder {
    risk_free_rate: Option<f64>,
    annualization_factor: Option<f64>,
    frequency: Option<Frequency>,
    beta_method: Option<BetaMethod>,
}

impl CapmConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = Some(risk_free_rate);
        self
    }

    /// Override the annualization factor. Defaults to the frequency's periods per year.
    pub fn annualization_factor(mut self, annualization_factor: f64) -> Self {
        self.annualization_factor = Some(annualization_factor);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn beta_method(mut self, beta_method: BetaMethod) -> Self {
        self.beta_method = Some(beta_method);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<CapmConfig> {
        let config = CapmConfig::from(self);
        config.validate()?;
        Ok(config)
    }
}

impl From<CapmConfigBuilder> for CapmConfig {
    /// Fill unset values with defaults. Does not validate.
    fn from(builder: CapmConfigBuilder) -> Self {
        let frequency = builder.frequency.unwrap_or_default();
        Self {
            risk_free_rate: builder.risk_free_rate.unwrap_or(DEFAULT_RISK_FREE_RATE),
            annualization_factor: builder
                .annualization_factor
                .unwrap_or_else(|| frequency.periods_per_year()),
            frequency,
            beta_method: builder.beta_method.unwrap_or_default(),
        }
    }
}
