use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::locale::Locale;
use crate::tui::Theme;

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// locale: ja
/// theme: dark
/// export_dir: ~/Documents/uwes
/// default_response: 3
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Language for items, labels and export headers (default: en)
    #[serde(default)]
    pub locale: Locale,

    /// TUI colour theme: auto, dark or light (default: auto)
    #[serde(default)]
    pub theme: Theme,

    /// Directory CSV exports are written to (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,

    /// Starting value when an unanswered item is first adjusted (default: 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_response: Option<u8>,
}

impl Config {
    /// Export directory with a leading `~` expanded.
    pub fn export_dir(&self) -> PathBuf {
        match self.export_dir.as_deref() {
            None | Some("") => PathBuf::from("."),
            Some(dir) => expand_home(dir),
        }
    }

    pub fn default_response(&self) -> u8 {
        self.default_response.unwrap_or(3)
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.theme, Theme::Auto);
        assert_eq!(config.export_dir(), PathBuf::from("."));
        assert_eq!(config.default_response(), 3);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
locale: ja
theme: light
export_dir: /tmp/uwes
default_response: 0
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/uwes"));
        assert_eq!(config.default_response(), 0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            locale: Locale::Ja,
            theme: Theme::Dark,
            export_dir: Some("out".to_string()),
            default_response: Some(4),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_home_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/uwes"), home.join("uwes"));
            assert_eq!(expand_home("~"), home);
        }
        assert_eq!(expand_home("~other/x"), PathBuf::from("~other/x"));
    }
}
