use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CANDIDATE_SELECTOR: &str = ".draggable";
pub const DEFAULT_ACTIVE_CLASS: &str = "dragging";

/// Drag controller configuration.
///
/// Keys are snake_case in TOML. The camelCase aliases let a page pass a plain
/// JS object such as `{ candidateSelector: ".card" }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    /// Selector used to discover candidate elements
    #[serde(alias = "candidateSelector")]
    pub candidate_selector: String,
    /// Class applied to the element while it is being dragged
    #[serde(alias = "activeClass")]
    pub active_class: String,
    #[serde(alias = "logTransitions")]
    pub log_transitions: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            candidate_selector: DEFAULT_CANDIDATE_SELECTOR.to_string(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            log_transitions: false,
        }
    }
}

impl DragConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DragConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidate_selector.trim().is_empty() {
            return Err(ConfigError::EmptySelector);
        }
        // classList.add rejects empty tokens and tokens with whitespace
        if self.active_class.is_empty() || self.active_class.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidClassName(self.active_class.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_markup() {
        let config = DragConfig::default();
        assert_eq!(config.candidate_selector, ".draggable");
        assert_eq!(config.active_class, "dragging");
        assert!(!config.log_transitions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DragConfig::from_toml_str("active_class = \"lifted\"").unwrap();
        assert_eq!(config.candidate_selector, ".draggable");
        assert_eq!(config.active_class, "lifted");
    }

    #[test]
    fn test_full_toml() {
        let config = DragConfig::from_toml_str(
            r#"
            candidate_selector = "[data-drag]"
            active_class = "is-dragging"
            log_transitions = true
            "#,
        )
        .unwrap();
        assert_eq!(config.candidate_selector, "[data-drag]");
        assert_eq!(config.active_class, "is-dragging");
        assert!(config.log_transitions);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = DragConfig::from_toml_str("candidate_selector = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_empty_selector() {
        let result = DragConfig::from_toml_str("candidate_selector = \"  \"");
        assert!(matches!(result, Err(ConfigError::EmptySelector)));
    }

    #[test]
    fn test_rejects_class_with_whitespace() {
        let config = DragConfig {
            active_class: "drag ging".to_string(),
            ..DragConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClassName(name)) if name == "drag ging"
        ));
    }

    #[test]
    fn test_camel_case_object_keys() {
        let config: DragConfig = serde_json::from_str(
            r#"{ "candidateSelector": ".card", "logTransitions": true }"#,
        )
        .unwrap();
        assert_eq!(config.candidate_selector, ".card");
        assert_eq!(config.active_class, "dragging");
        assert!(config.log_transitions);
    }
}
