use serde::Deserialize;

use crate::error::ReconcileError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconcileConfig {
    pub name: String,
    /// Fuzzy-match threshold on the 0–100 similarity scale.
    pub threshold: u8,
    pub baseline: SideConfig,
    pub downstream: SideConfig,
    #[serde(default)]
    pub options: Options,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SideConfig {
    pub file: String,
    pub columns: FieldMapping,
}

// ---------------------------------------------------------------------------
// Field mapping
// ---------------------------------------------------------------------------

/// Semantic role → column name. The engine never guesses column names;
/// the caller resolves them before a run.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    pub material: String,
    pub vendor: String,
    pub consumption: String,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub divisor: Option<String>,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Independent policy toggles, both off by default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Options {
    /// Divide consumption quantities by a whitelisted scale divisor before
    /// comparison.
    #[serde(default)]
    pub normalize_divisor: bool,
    /// Summarize over the first outcome per baseline material key instead
    /// of every row.
    #[serde(default)]
    pub dedup_by_key: bool,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconcileConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconcileError> {
        let config: ReconcileConfig =
            toml::from_str(input).map_err(|e| ReconcileError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The single precondition gate: anything that fails here is reported
    /// once, before any record is processed.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if self.threshold > 100 {
            return Err(ReconcileError::ConfigValidation(format!(
                "threshold must be 0-100, got {}",
                self.threshold
            )));
        }

        for (side, mapping) in [("baseline", &self.baseline.columns), ("downstream", &self.downstream.columns)] {
            for (role, column) in [
                ("material", &mapping.material),
                ("vendor", &mapping.vendor),
                ("consumption", &mapping.consumption),
            ] {
                if column.trim().is_empty() {
                    return Err(ReconcileError::ConfigValidation(format!(
                        "{side}: required mapping '{role}' is not resolved to a column name"
                    )));
                }
            }
        }

        if self.options.normalize_divisor
            && self.baseline.columns.divisor.is_none()
            && self.downstream.columns.divisor.is_none()
        {
            return Err(ReconcileError::ConfigValidation(
                "normalize_divisor is enabled but no divisor column is mapped on either side".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
