//! # Application Settings
//!
//! Typed view over the `settings` table. Five keys are used: `app_name`,
//! `logo_url`, `currency` and `timezone` hold strings, `theme` holds an object
//! with `primary`, `secondary` and `accent` colours.

use crate::clients::SettingClient;
use crate::model::Setting;
use crate::session::Identity;
use crate::setting_table::SettingError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#C9A58A".to_string(),
            secondary: "#8B7355".to_string(),
            accent: "#D4B5A0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub app_name: String,
    pub logo_url: String,
    pub currency: String,
    pub timezone: String,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "Coffee Dashboard".to_string(),
            logo_url: String::new(),
            currency: "$".to_string(),
            timezone: "UTC".to_string(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(SettingError),

    /// Keys before `key` were saved; `key` and the ones after it were not.
    #[error("Error saving settings: {key}: {source}")]
    Save { key: String, source: SettingError },
}

/// Renders a stored value as the plain string the settings form shows.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string().replace('"', ""),
    }
}

fn theme_from(value: &Value) -> Option<Theme> {
    let object = value.as_object()?;
    let defaults = Theme::default();
    let pick = |name: &str, fallback: String| {
        object
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or(fallback)
    };
    Some(Theme {
        primary: pick("primary", defaults.primary),
        secondary: pick("secondary", defaults.secondary),
        accent: pick("accent", defaults.accent),
    })
}

impl AppSettings {
    /// Defaults overlaid with whatever `rows` contain. Unknown keys are ignored.
    pub fn from_rows(rows: &[Setting]) -> Self {
        let mut settings = Self::default();
        for row in rows {
            match row.key.as_str() {
                "app_name" => settings.app_name = as_text(&row.value),
                "logo_url" => settings.logo_url = as_text(&row.value),
                "currency" => settings.currency = as_text(&row.value),
                "timezone" => settings.timezone = as_text(&row.value),
                "theme" => match theme_from(&row.value) {
                    Some(theme) => settings.theme = theme,
                    None => warn!(value = %row.value, "Ignoring malformed theme"),
                },
                _ => {}
            }
        }
        settings
    }

    /// Key/value pairs in save order.
    pub fn to_entries(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("app_name", json!(self.app_name)),
            ("logo_url", json!(self.logo_url)),
            ("currency", json!(self.currency)),
            ("timezone", json!(self.timezone)),
            (
                "theme",
                json!({
                    "primary": self.theme.primary,
                    "secondary": self.theme.secondary,
                    "accent": self.theme.accent,
                }),
            ),
        ]
    }
}

#[derive(Clone)]
pub struct SettingsStore {
    settings: SettingClient,
}

impl SettingsStore {
    pub fn new(settings: SettingClient) -> Self {
        Self { settings }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<AppSettings, SettingsError> {
        let rows = self.settings.list_settings().await.map_err(SettingsError::Load)?;
        Ok(AppSettings::from_rows(&rows))
    }

    /// Upserts every key, stopping at the first failure.
    #[instrument(skip(self, settings, identity))]
    pub async fn save(
        &self,
        settings: &AppSettings,
        identity: Option<&Identity>,
    ) -> Result<(), SettingsError> {
        let updated_by = identity.map(|i| i.id);
        for (key, value) in settings.to_entries() {
            if let Err(source) = self.settings.upsert(key, value, updated_by).await {
                warn!(key, error = %source, "Saving settings stopped");
                return Err(SettingsError::Save {
                    key: key.to_string(),
                    source,
                });
            }
        }
        info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SettingId;
    use chrono::Utc;
    use table_actor::mock::MockTable;
    use table_actor::GatewayError;

    fn row(key: &str, value: Value) -> Setting {
        Setting {
            id: SettingId(1),
            key: key.to_string(),
            value,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.app_name, "Coffee Dashboard");
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.theme.primary, "#C9A58A");
    }

    #[test]
    fn test_rows_override_defaults() {
        let rows = vec![
            row("app_name", json!("Bean There")),
            row("timezone", json!(7)),
            row("theme", json!({ "primary": "#000000", "accent": "" })),
            row("unrelated", json!(true)),
        ];
        let settings = AppSettings::from_rows(&rows);

        assert_eq!(settings.app_name, "Bean There");
        assert_eq!(settings.timezone, "7");
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.theme.primary, "#000000");
        assert_eq!(settings.theme.secondary, "#8B7355");
        assert_eq!(settings.theme.accent, "#D4B5A0");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let (actor, client) = crate::setting_table::new(10);
        tokio::spawn(actor.run(()));
        let store = SettingsStore::new(client);

        let mut settings = AppSettings::default();
        settings.currency = "€".to_string();
        settings.theme.accent = "#FFFFFF".to_string();
        store.save(&settings, None).await.unwrap();
        store.save(&settings, None).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_save_stops_at_first_failure() {
        let mut mock = MockTable::<Setting>::new();
        // app_name: lookup finds nothing, insert succeeds
        mock.expect_select().return_ok(vec![]);
        mock.expect_insert().return_ok(row("app_name", json!("Coffee Dashboard")));
        // logo_url: lookup fails
        mock.expect_select().return_err(GatewayError::TableClosed);

        let store = SettingsStore::new(crate::clients::SettingClient::new(mock.client()));
        let result = store.save(&AppSettings::default(), None).await;

        assert!(matches!(result, Err(SettingsError::Save { ref key, .. }) if key == "logo_url"));
        assert_eq!(mock.calls(), 3);
        mock.verify();
    }
}
