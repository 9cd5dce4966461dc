//! Bridge configuration.

use paybridge_events::hook_names;
use serde::Deserialize;

use crate::error::ConfigError;

/// Settings read from the host's plugin configuration. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Global function receiving `(rawMessage, source)`.
    pub payment_hook: String,
    /// Global function receiving the permission snapshot object.
    pub permissions_hook: String,
    /// Label of the webview hosting the web runtime.
    pub webview_label: String,
    /// Identifier matched against the listener registry. Defaults to the
    /// platform-reported package name.
    pub package_name: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            payment_hook: hook_names::PAYMENT_MESSAGE.to_string(),
            permissions_hook: hook_names::PERMISSIONS_UPDATE.to_string(),
            webview_label: "main".to_string(),
            package_name: None,
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for hook in [&self.payment_hook, &self.permissions_hook] {
            if !is_js_identifier(hook) {
                return Err(ConfigError::InvalidHookName(hook.clone()));
            }
        }
        if self.webview_label.trim().is_empty() {
            return Err(ConfigError::EmptyWebviewLabel);
        }
        Ok(())
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let is_start = |c: char| c.is_ascii_alphabetic() || c == '_' || c == '$';
    is_start(first) && chars.all(|c| is_start(c) || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.payment_hook, "onNativePaymentMessage");
        assert_eq!(config.permissions_hook, "onNativePermissionsUpdate");
        assert_eq!(config.webview_label, "main");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"paymentHook": "masarifyNativePaymentMessage", "packageName": "com.masarify.app"}"#;
        let config: BridgeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.payment_hook, "masarifyNativePaymentMessage");
        assert_eq!(config.permissions_hook, "onNativePermissionsUpdate");
        assert_eq!(config.package_name.as_deref(), Some("com.masarify.app"));
    }

    #[test]
    fn test_deserialize_empty() {
        let config: BridgeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_rejects_non_identifier_hooks() {
        let config = BridgeConfig {
            payment_hook: "alert(1);x".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHookName(_))));

        let config = BridgeConfig {
            permissions_hook: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BridgeConfig {
            payment_hook: "1hook".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accepts_identifier_hooks() {
        let config = BridgeConfig {
            payment_hook: "$_hook2".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_label() {
        let config = BridgeConfig {
            webview_label: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyWebviewLabel));
    }
}
