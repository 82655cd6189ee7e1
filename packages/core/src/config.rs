//! Identity-generation settings.
//!
//! A [`Config`] is owned by each [`Document`](crate::Document) and passed by
//! reference to standalone object construction. Changing it only affects
//! identities computed afterwards; existing objects keep their URIs.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `SBOL_NAMESPACE` | `http://examples.org` | `default_namespace` (empty = not set) |
//! | `SBOL_COMPLIANT_URIS` | `true` | `compliant_uris` |
//! | `SBOL_TYPED_URIS` | `true` | `typed_uris` |
//! | `SBOL_VERSION` | `1` | `default_version` (empty = no version) |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SbolError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace prefixed to every generated top-level identity.
    pub default_namespace: String,

    /// Compose identities from namespace, type path, display id and version.
    /// When off, callers supply full URIs and no composition happens.
    pub compliant_uris: bool,

    /// Insert the type name (e.g. `ModuleDefinition`) after the namespace in
    /// generated top-level identities.
    pub typed_uris: bool,

    /// Version given to newly created objects in compliant mode.
    pub default_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_namespace: "http://examples.org".into(),
            compliant_uris: true,
            typed_uris: true,
            default_version: "1".into(),
        }
    }
}

impl Config {
    /// Open-world settings: no namespace, no composition.
    pub fn open_world() -> Self {
        Config {
            default_namespace: String::new(),
            compliant_uris: false,
            typed_uris: false,
            default_version: String::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn with_compliant_uris(mut self, on: bool) -> Self {
        self.compliant_uris = on;
        self
    }

    pub fn with_typed_uris(mut self, on: bool) -> Self {
        self.typed_uris = on;
        self
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = version.into();
        self
    }

    /// The namespace, or `None` when unset.
    pub fn namespace(&self) -> Option<&str> {
        Some(self.default_namespace.as_str()).filter(|ns| !ns.is_empty())
    }

    /// The default version, or `None` when empty.
    pub fn version(&self) -> Option<&str> {
        Some(self.default_version.as_str()).filter(|v| !v.is_empty())
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        if let Ok(ns) = std::env::var("SBOL_NAMESPACE") {
            config.default_namespace = ns;
        }
        if let Some(on) = env_flag("SBOL_COMPLIANT_URIS")? {
            config.compliant_uris = on;
        }
        if let Some(on) = env_flag("SBOL_TYPED_URIS")? {
            config.typed_uris = on;
        }
        if let Ok(v) = std::env::var("SBOL_VERSION") {
            config.default_version = v;
        }
        Ok(config)
    }

    /// Load settings from a JSON file; missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SbolError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| SbolError::Config(format!("{}: {e}", path.display())))
    }
}

fn env_flag(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw)
            .map(Some)
            .ok_or_else(|| SbolError::Config(format!("{name} must be true or false, got {raw:?}"))),
        Err(_) => Ok(None),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.namespace(), Some("http://examples.org"));
        assert!(c.compliant_uris);
        assert!(c.typed_uris);
        assert_eq!(c.version(), Some("1"));
    }

    #[test]
    fn open_world_has_no_namespace() {
        let c = Config::open_world();
        assert_eq!(c.namespace(), None);
        assert_eq!(c.version(), None);
        assert!(!c.compliant_uris);
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    // the only test touching SBOL_* variables; keep it that way
    #[test]
    fn environment_overrides_defaults() {
        std::env::set_var("SBOL_NAMESPACE", "http://lab.example");
        std::env::set_var("SBOL_COMPLIANT_URIS", "yes");
        std::env::set_var("SBOL_TYPED_URIS", "off");
        std::env::set_var("SBOL_VERSION", "");
        let c = Config::from_env().unwrap();
        assert_eq!(c.namespace(), Some("http://lab.example"));
        assert!(c.compliant_uris);
        assert!(!c.typed_uris);
        assert_eq!(c.version(), None);

        std::env::set_var("SBOL_TYPED_URIS", "sometimes");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, SbolError::Config(ref m) if m.contains("SBOL_TYPED_URIS")));

        for name in ["SBOL_NAMESPACE", "SBOL_COMPLIANT_URIS", "SBOL_TYPED_URIS", "SBOL_VERSION"] {
            std::env::remove_var(name);
        }
        assert_eq!(Config::from_env().unwrap(), Config::default());
    }

    #[test]
    fn json_partial_uses_defaults() {
        let c: Config = serde_json::from_str(r#"{"typed_uris": false}"#).unwrap();
        assert!(!c.typed_uris);
        assert!(c.compliant_uris);
        assert_eq!(c.default_namespace, "http://examples.org");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sbol.json");
        std::fs::write(&path, r#"{"default_namespace": "http://lab.example"}"#).unwrap();
        let c = Config::load(&path).unwrap();
        assert_eq!(c.namespace(), Some("http://lab.example"));

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(SbolError::Config(_))));
    }
}
