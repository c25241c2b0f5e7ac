//! Site-wide composer settings, read from TOML.
//!
//! ```toml
//! is_dropdown_select_templates = true
//! row_floor = 1
//! ```

use crate::error::ConfigurationError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Site-wide composer settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DynamicFieldSettings {
    /// Offer widgets in a dropdown instead of thumbnail tabs.
    pub is_dropdown_select_templates: bool,
    /// Fewest components a widget can be reduced to.
    #[serde(alias = "min_rows")]
    pub row_floor: usize,
}

impl Default for DynamicFieldSettings {
    fn default() -> Self {
        DynamicFieldSettings {
            is_dropdown_select_templates: false,
            row_floor: 1,
        }
    }
}

impl DynamicFieldSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path)?;
        DynamicFieldSettings::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DynamicFieldSettings::from_toml_str("").unwrap();
        assert_eq!(settings, DynamicFieldSettings::default());
        assert_eq!(settings.row_floor, 1);
    }

    #[test]
    fn test_min_rows_alias() {
        let settings = DynamicFieldSettings::from_toml_str(
            "is_dropdown_select_templates = true\nmin_rows = 0",
        )
        .unwrap();
        assert!(settings.is_dropdown_select_templates);
        assert_eq!(settings.row_floor, 0);
    }

    #[test]
    fn test_wrong_type_is_error() {
        assert!(matches!(
            DynamicFieldSettings::from_toml_str("row_floor = \"one\""),
            Err(ConfigurationError::Settings(_))
        ));
    }
}
