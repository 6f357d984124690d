//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, PatternOptions};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    let opts = &config.options;

    validate_pattern("options.header", &opts.header)?;
    validate_pattern("options.merges", &opts.merges)?;
    validate_pattern("options.reverts", &opts.reverts)?;

    if !opts.tag_filter_pattern.is_empty() {
        ConfigError::compile("options.tag_filter_pattern", &opts.tag_filter_pattern)?;
    }

    validate_words("options.issues.prefix", &opts.issues.prefix)?;
    validate_words("options.refs.actions", &opts.refs.actions)?;
    validate_words("options.notes.keywords", &opts.notes.keywords)?;

    debug!("configuration validation passed");
    Ok(())
}

fn validate_pattern(field: &str, options: &PatternOptions) -> Result<()> {
    if !options.pattern.is_empty() {
        ConfigError::compile(&format!("{}.pattern", field), &options.pattern)?;
    }

    for (i, name) in options.pattern_maps.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.pattern_maps[{}]", field, i),
                message: "field name cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_words(field: &str, words: &[String]) -> Result<()> {
    if let Some(i) = words.iter().position(|w| w.is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: format!("{}[{}]", field, i),
            message: "entry cannot be empty".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaglineError;

    #[test]
    fn test_validate_default_config() {
        let mut config = Config::default();
        config.normalize();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_header_pattern() {
        let mut config = Config::default();
        config.options.header.pattern = "^(\\w*".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TaglineError::Config(ConfigError::InvalidPattern { ref field, .. })
                if field == "options.header.pattern"
        ));
    }

    #[test]
    fn test_validate_empty_pattern_map() {
        let mut config = Config::default();
        config.options.header = PatternOptions::new("^(\\w*): (.*)$", &["Type", ""]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_invalid_tag_filter() {
        let mut config = Config::default();
        config.options.tag_filter_pattern = "[".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_note_keyword() {
        let mut config = Config::default();
        config.options.notes.keywords = vec!["BREAKING CHANGE".to_string(), String::new()];
        assert!(validate_config(&config).is_err());
    }
}
