//! Interceptor configuration: declarative overrides.
//!
//! Interceptors are registered in code; configuration can only disable
//! them or change their order.
//!
//! # Example TOML
//!
//! ```toml
//! [[interceptors]]
//! id = "trim-input"
//! order = 50
//!
//! [[interceptors]]
//! id = "audit"
//! enabled = false
//! ```

use serde::{Deserialize, Serialize};

use crate::ProxyError;

/// Top-level interceptor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InterceptorsConfig {
    /// Per-interceptor overrides.
    pub interceptors: Vec<InterceptorDef>,
}

/// Overrides for one interceptor, matched by ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterceptorDef {
    /// ID of the interceptor to override.
    pub id: String,

    /// New order. `None` keeps the interceptor's own order.
    #[serde(default)]
    pub order: Option<i32>,

    /// Whether the interceptor runs. Default: true.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl InterceptorsConfig {
    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Config`] if the TOML is malformed or an entry has a
    /// blank `id`.
    pub fn from_toml(content: &str) -> Result<Self, ProxyError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ProxyError::Config(e.to_string()))?;
        if let Some(pos) = config.interceptors.iter().position(|d| d.id.trim().is_empty()) {
            return Err(ProxyError::Config(format!(
                "interceptor entry {pos} has a blank id"
            )));
        }
        Ok(config)
    }

    /// Merges another config into this one.
    ///
    /// An entry in `other` replaces any entry with the same ID here;
    /// new IDs are appended.
    pub fn merge(&mut self, other: &Self) {
        for def in &other.interceptors {
            self.interceptors.retain(|d| d.id != def.id);
            self.interceptors.push(def.clone());
        }
    }

    /// Returns the override for `id`, if any.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&InterceptorDef> {
        self.interceptors.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_defaults() {
        let config = InterceptorsConfig::from_toml(
            r#"
[[interceptors]]
id = "trim"
order = 50

[[interceptors]]
id = "audit"
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(config.interceptors.len(), 2);
        let trim = config.find("trim").unwrap();
        assert_eq!(trim.order, Some(50));
        assert!(trim.enabled);

        let audit = config.find("audit").unwrap();
        assert_eq!(audit.order, None);
        assert!(!audit.enabled);
    }

    #[test]
    fn parse_empty() {
        let config = InterceptorsConfig::from_toml("").unwrap();
        assert_eq!(config, InterceptorsConfig::default());
    }

    #[test]
    fn parse_rejects_blank_id() {
        let err = InterceptorsConfig::from_toml("[[interceptors]]\nid = \" \"\n").unwrap_err();
        assert!(matches!(err, ProxyError::Config(_)));
    }

    #[test]
    fn parse_rejects_malformed() {
        let err =
            InterceptorsConfig::from_toml("[[interceptors]]\norder = \"high\"\n").unwrap_err();
        assert!(matches!(err, ProxyError::Config(_)));
    }

    #[test]
    fn merge_overrides_by_id() {
        let mut base = InterceptorsConfig::from_toml(
            "[[interceptors]]\nid = \"a\"\norder = 1\n\n[[interceptors]]\nid = \"b\"\n",
        )
        .unwrap();
        let overlay = InterceptorsConfig::from_toml(
            "[[interceptors]]\nid = \"a\"\nenabled = false\n\n[[interceptors]]\nid = \"c\"\n",
        )
        .unwrap();

        base.merge(&overlay);

        let ids: Vec<_> = base.interceptors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        let a = base.find("a").unwrap();
        assert!(!a.enabled);
        assert_eq!(a.order, None);
    }
}
