use std::path::Path;

use anyhow::Context;
use glossa_config::Config;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.json";

/// Load `path` if it exists, otherwise fall back to built-in defaults
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::info!("No {} found, using default settings", path.display());
        return Ok(Config::default());
    }

    tracing::info!("Loading settings from {}", path.display());
    Config::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "matching": {{ "min_similarity": 0.4 }} }}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.matching.min_similarity, Some(0.4));
        assert_eq!(config.capture.width, 2000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "capture": {{ "width": 0 }} }}"#).unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("capture"));
    }
}
