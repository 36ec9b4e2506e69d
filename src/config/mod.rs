use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

/// What the edit handler does when a page cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditFallback {
    /// Any load failure starts a blank page, including genuine I/O errors.
    #[default]
    Blank,
    /// Only a missing page starts blank; other failures are server errors.
    NotFoundOnly,
}

impl FromStr for EditFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" => Ok(EditFallback::Blank),
            "not-found-only" | "not_found_only" => Ok(EditFallback::NotFoundOnly),
            other => Err(format!("unknown edit fallback {other:?}")),
        }
    }
}

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub pages_dir: PathBuf,
    /// Directory holding `view.html` / `edit.html` overrides.
    pub templates_dir: Option<PathBuf>,
    pub port: u16,
    pub host: String,
    pub edit_fallback: EditFallback,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            templates_dir: None,
            port: 8080,
            host: "0.0.0.0".to_string(),
            edit_fallback: EditFallback::Blank,
        }
    }

    /// Defaults overlaid with `WIKI_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(dir) = lookup("WIKI_PAGES_DIR") {
            config.pages_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WIKI_TEMPLATES_DIR") {
            config.templates_dir = Some(PathBuf::from(dir));
        }
        if let Some(host) = lookup("WIKI_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("WIKI_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(e) => warn!("Ignoring WIKI_PORT={:?}: {}", port, e),
            }
        }
        if let Some(fallback) = lookup("WIKI_EDIT_FALLBACK") {
            match fallback.parse() {
                Ok(fallback) => config.edit_fallback = fallback,
                Err(e) => warn!("Ignoring WIKI_EDIT_FALLBACK: {}", e),
            }
        }

        config
    }

    /// Address string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_fixed_layout() {
        let config = config_from(&[]);
        assert_eq!(config.pages_dir, PathBuf::from("pages"));
        assert_eq!(config.templates_dir, None);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.edit_fallback, EditFallback::Blank);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("WIKI_PAGES_DIR", "/srv/wiki"),
            ("WIKI_TEMPLATES_DIR", "tmpl"),
            ("WIKI_HOST", "127.0.0.1"),
            ("WIKI_PORT", "9000"),
            ("WIKI_EDIT_FALLBACK", "not-found-only"),
        ]);
        assert_eq!(config.pages_dir, PathBuf::from("/srv/wiki"));
        assert_eq!(config.templates_dir, Some(PathBuf::from("tmpl")));
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.edit_fallback, EditFallback::NotFoundOnly);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = config_from(&[("WIKI_PORT", "eighty"), ("WIKI_EDIT_FALLBACK", "maybe")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.edit_fallback, EditFallback::Blank);
    }
}
