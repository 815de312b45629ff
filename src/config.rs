//! Console settings.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `console.toml` in the working directory (optional), or an explicit file
//! 3. Environment variables, `CONSOLE__SECTION__KEY` (e.g. `CONSOLE__API__BASE_URL`)

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_FILE: &str = "console";
const ENV_PREFIX: &str = "CONSOLE";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeocodingSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub accept_language: String,
    /// Gap between two lookups; the public Nominatim instance allows one per second.
    pub delay_ms: u64,
}

impl GeocodingSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".into(),
            user_agent: concat!("elevator-console/", env!("CARGO_PKG_VERSION")).into(),
            accept_language: "pt-BR,pt;q=0.9".into(),
            delay_ms: 1100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NotificationSettings {
    pub dismiss_after_ms: u64,
    pub capacity: usize,
}

impl NotificationSettings {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActorSettings {
    pub buffer_size: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub geocoding: GeocodingSettings,
    pub notifications: NotificationSettings,
    pub actors: ActorSettings,
    /// Recorded as `updatedBy` on every order change.
    pub operator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://localhost:3000".into(),
                timeout_secs: 10,
            },
            geocoding: GeocodingSettings::default(),
            notifications: NotificationSettings {
                dismiss_after_ms: 3000,
                capacity: 64,
            },
            actors: ActorSettings { buffer_size: 32 },
            operator: "admin".into(),
        }
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let defaults = Settings::default();
    Config::builder()
        .set_default("api.base_url", defaults.api.base_url)?
        .set_default("api.timeout_secs", defaults.api.timeout_secs as i64)?
        .set_default("geocoding.endpoint", defaults.geocoding.endpoint)?
        .set_default("geocoding.user_agent", defaults.geocoding.user_agent)?
        .set_default("geocoding.accept_language", defaults.geocoding.accept_language)?
        .set_default("geocoding.delay_ms", defaults.geocoding.delay_ms as i64)?
        .set_default(
            "notifications.dismiss_after_ms",
            defaults.notifications.dismiss_after_ms as i64,
        )?
        .set_default("notifications.capacity", defaults.notifications.capacity as i64)?
        .set_default("actors.buffer_size", defaults.actors.buffer_size as i64)?
        .set_default("operator", defaults.operator)
}

/// Loads settings from defaults, the optional file and the environment.
///
/// With `path` the file is required; without it `console.toml` is used when present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_FILE).required(false),
    };
    builder()?
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let settings: Settings = builder().unwrap().build().unwrap().try_deserialize().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.geocoding.delay(), Duration::from_millis(1100));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("console-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "operator = \"marta\"\n[api]\nbase_url = \"http://api.local:8080\""
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.operator, "marta");
        assert_eq!(settings.api.base_url, "http://api.local:8080");
        assert_eq!(settings.api.timeout_secs, 10);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        assert!(load_settings(Some(Path::new("/nonexistent/console.toml"))).is_err());
    }
}
