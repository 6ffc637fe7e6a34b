// src/domain/system_settings.rs

use super::system_setting_model;
use serde::{Deserialize, Serialize};

/// Typed view over the `system_settings` rows with explicit defaults.
/// Loaded fresh per operation; never cached across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub updates_enabled: bool,
    pub maintenance_mode: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            updates_enabled: true,
            maintenance_mode: false,
        }
    }
}

impl SystemSettings {
    pub const UPDATES_ENABLED: &'static str = "updates_enabled";
    pub const MAINTENANCE_MODE: &'static str = "maintenance_mode";

    /// Builds the typed view from raw rows. Unknown keys are ignored;
    /// missing or malformed values keep their defaults.
    pub fn from_rows(rows: &[system_setting_model::Model]) -> Self {
        let mut settings = Self::default();
        for row in rows {
            match row.key.as_str() {
                Self::UPDATES_ENABLED => {
                    if let Some(value) = row.value.as_bool() {
                        settings.updates_enabled = value;
                    }
                }
                Self::MAINTENANCE_MODE => {
                    if let Some(value) = row.value.as_bool() {
                        settings.maintenance_mode = value;
                    }
                }
                _ => {}
            }
        }
        settings
    }

    /// The (key, value) pairs this view persists as.
    pub fn to_rows(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            (Self::UPDATES_ENABLED, serde_json::json!(self.updates_enabled)),
            (
                Self::MAINTENANCE_MODE,
                serde_json::json!(self.maintenance_mode),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn row(key: &str, value: serde_json::Value) -> system_setting_model::Model {
        system_setting_model::Model {
            id: Uuid::new_v4(),
            key: key.to_string(),
            value,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = SystemSettings::from_rows(&[]);
        assert!(settings.updates_enabled);
        assert!(!settings.maintenance_mode);
    }

    #[test]
    fn test_from_rows() {
        let settings = SystemSettings::from_rows(&[
            row("updates_enabled", json!(false)),
            row("maintenance_mode", json!(true)),
        ]);
        assert!(!settings.updates_enabled);
        assert!(settings.maintenance_mode);
    }

    #[test]
    fn test_unknown_and_malformed_rows_ignored() {
        let settings = SystemSettings::from_rows(&[
            row("legacy_key", json!("whatever")),
            row("updates_enabled", json!("not-a-bool")),
        ]);
        assert_eq!(settings, SystemSettings::default());
    }

    #[test]
    fn test_to_rows_round_trip() {
        let settings = SystemSettings {
            updates_enabled: false,
            maintenance_mode: true,
        };
        let rows: Vec<_> = settings
            .to_rows()
            .into_iter()
            .map(|(key, value)| row(key, value))
            .collect();
        assert_eq!(SystemSettings::from_rows(&rows), settings);
    }
}
