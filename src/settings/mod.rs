pub mod store;

pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};

use crate::error::Result;
use crate::request::HttpMethod;

pub const ENDPOINT_KEY: &str = "api-url";
pub const METHOD_KEY: &str = "api-method";
pub const CREDENTIAL_KEY: &str = "api-key";

/// The three operator-editable fields, as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    pub endpoint: String,
    pub method: String,
    pub credential: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            method: HttpMethod::default().to_string(),
            credential: String::new(),
        }
    }
}

impl WidgetSettings {
    /// Read all fields; absent keys keep their defaults.
    pub fn load(store: &dyn SettingsStore) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(endpoint) = store.get(ENDPOINT_KEY)? {
            settings.endpoint = endpoint;
        }
        if let Some(method) = store.get(METHOD_KEY)?.filter(|m| !m.trim().is_empty()) {
            settings.method = method;
        }
        if let Some(credential) = store.get(CREDENTIAL_KEY)? {
            settings.credential = credential;
        }
        Ok(settings)
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        store.set(ENDPOINT_KEY, &self.endpoint)?;
        store.set(METHOD_KEY, &self.method)?;
        store.set(CREDENTIAL_KEY, &self.credential)?;
        tracing::debug!(endpoint = %self.endpoint, method = %self.method, "settings saved");
        Ok(())
    }

    /// Credential with the secret part hidden, for display.
    pub fn masked_credential(&self) -> String {
        let secret = self.credential.trim();
        match secret.chars().count() {
            0 => String::new(),
            n if n <= 4 => "*".repeat(n),
            n => {
                let tail: String = secret.chars().skip(n - 4).collect();
                format!("{}{tail}", "*".repeat(n - 4))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemorySettingsStore::new();
        let settings = WidgetSettings::load(&store).unwrap();
        assert_eq!(settings, WidgetSettings::default());
        assert_eq!(settings.method, "GET");
    }

    #[test]
    fn save_then_load() {
        let store = MemorySettingsStore::new();
        let settings = WidgetSettings {
            endpoint: "https://x.test/a".into(),
            method: "PATCH".into(),
            credential: "tok".into(),
        };
        settings.save(&store).unwrap();

        assert_eq!(store.get("api-url").unwrap().as_deref(), Some("https://x.test/a"));
        assert_eq!(store.get("api-method").unwrap().as_deref(), Some("PATCH"));
        assert_eq!(store.get("api-key").unwrap().as_deref(), Some("tok"));
        assert_eq!(WidgetSettings::load(&store).unwrap(), settings);
    }

    #[test]
    fn blank_method_falls_back_to_get() {
        let store = MemorySettingsStore::new();
        store.set(METHOD_KEY, " ").unwrap();
        assert_eq!(WidgetSettings::load(&store).unwrap().method, "GET");
    }

    #[test]
    fn masks_credential() {
        let mut settings = WidgetSettings::default();
        assert_eq!(settings.masked_credential(), "");
        settings.credential = "abc".into();
        assert_eq!(settings.masked_credential(), "***");
        settings.credential = "sk-123456789".into();
        assert_eq!(settings.masked_credential(), "********6789");
    }
}
