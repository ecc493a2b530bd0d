use serde::{Deserialize, Serialize};

/// Theme selector. `Auto` follows the environment in the original design;
/// terminals expose no such preference, so it resolves to dark at render
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    pub fn cycle(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
            Theme::Auto => Theme::Light,
        }
    }
}

/// Flat application settings.
///
/// Every field carries its own serde default so a partial persisted record
/// merges over the defaults by shallow combination; no validation is applied
/// to the stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: Theme,
    #[serde(default)]
    pub auto_sync: bool,
    #[serde(default = "default_true")]
    pub auto_export_pdf: bool,
    #[serde(default)]
    pub sync_path: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_theme() -> Theme {
    Theme::Light
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            auto_sync: false,
            auto_export_pdf: true,
            sync_path: String::new(),
            api_key: String::new(),
        }
    }
}

impl Settings {
    /// Whether cloud sync has everything it needs to pretend to run.
    pub fn sync_configured(&self) -> bool {
        self.auto_sync && !self.sync_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_configuration_record() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(!settings.auto_sync);
        assert!(settings.auto_export_pdf);
        assert!(settings.sync_path.is_empty());
        assert!(settings.api_key.is_empty());
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.auto_export_pdf, "unspecified field keeps default");
        assert!(!settings.auto_sync);
    }

    #[test]
    fn theme_round_trips_in_lowercase() {
        let json = serde_json::to_string(&Theme::Auto).unwrap();
        assert_eq!(json, r#""auto""#);
    }
}
