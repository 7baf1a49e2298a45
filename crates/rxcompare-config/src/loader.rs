//! Loading, validation, and conversion of `ComparatorConfig`.

use std::path::Path;

use tracing::{debug, warn};

use rxcompare_contracts::{
    error::{CompareError, CompareResult},
    settings::{Settings, UnauthorizedCosts},
};

use crate::schema::{ComparatorConfig, DataFiles, UnauthorizedCostEntry};

impl Default for ComparatorConfig {
    /// The built-in configuration, including the two known Cigna overrides.
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            cash_channel_label: settings.cash_channel_label,
            trial_sequence: settings.trial_sequence,
            data: DataFiles::default(),
            unauthorized_costs: vec![
                UnauthorizedCostEntry {
                    insurance: "Cigna".to_string(),
                    medicine: "Empagliflozin".to_string(),
                    annual: 811.0,
                },
                UnauthorizedCostEntry {
                    insurance: "Cigna".to_string(),
                    medicine: "Januvia".to_string(),
                    annual: 721.0,
                },
            ],
        }
    }
}

impl ComparatorConfig {
    /// Parse and validate `s` as TOML.
    ///
    /// Returns `CompareError::ConfigError` if the TOML is malformed, does not
    /// match the schema, or fails [`ComparatorConfig::validate`].
    pub fn from_toml_str(s: &str) -> CompareResult<Self> {
        let config: ComparatorConfig = toml::from_str(s).map_err(|e| CompareError::ConfigError {
            reason: format!("failed to parse comparator TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            trial_steps = config.trial_sequence.len(),
            overrides = config.unauthorized_costs.len(),
            "comparator config parsed"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it.
    pub fn from_file(path: &Path) -> CompareResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CompareError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject configurations the comparator cannot serve.
    pub fn validate(&self) -> CompareResult<()> {
        if self.trial_sequence.is_empty() {
            return Err(CompareError::ConfigError {
                reason: "trial_sequence must name at least one medicine".to_string(),
            });
        }
        if let Some(pos) = self.trial_sequence.iter().position(|m| m.trim().is_empty()) {
            return Err(CompareError::ConfigError {
                reason: format!("trial_sequence entry {} is blank", pos),
            });
        }
        if self.cash_channel_label.trim().is_empty() {
            return Err(CompareError::ConfigError {
                reason: "cash_channel_label must not be blank".to_string(),
            });
        }
        for entry in &self.unauthorized_costs {
            if !entry.annual.is_finite() {
                return Err(CompareError::ConfigError {
                    reason: format!(
                        "unauthorized cost for '{}' / '{}' is not a finite number",
                        entry.insurance, entry.medicine
                    ),
                });
            }
        }
        Ok(())
    }

    /// Build the runtime settings. Duplicate override pairs resolve to the
    /// last entry.
    pub fn to_settings(&self) -> Settings {
        let mut unauthorized_costs = UnauthorizedCosts::default();
        for entry in &self.unauthorized_costs {
            if unauthorized_costs.get(&entry.insurance, &entry.medicine).is_some() {
                warn!(
                    insurance = %entry.insurance,
                    medicine = %entry.medicine,
                    "duplicate unauthorized cost entry; the later one wins"
                );
            }
            unauthorized_costs.insert(entry.insurance.clone(), entry.medicine.clone(), entry.annual);
        }

        Settings {
            trial_sequence: self.trial_sequence.iter().map(|m| m.trim().to_string()).collect(),
            unauthorized_costs,
            cash_channel_label: self.cash_channel_label.clone(),
        }
    }
}
