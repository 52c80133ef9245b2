//! Configuration file loading.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load configuration from `explicit` or the platform-specific path.
///
/// Returns default config if no config file exists or the platform has no
/// config directory.
pub fn load_default_config(explicit: Option<&Path>) -> Result<Config> {
    super::config_file_path(explicit)
        .map_or_else(|_| Ok(Config::default()), |path| load_config_file(&path))
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save configuration to `explicit` or the platform-specific path.
pub fn save_default_config(config: &Config, explicit: Option<&Path>) -> Result<PathBuf> {
    let path = super::config_file_path(explicit)?;
    save_config(config, &path)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_file(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[defaults]
thresh = 0.02
min_clip = 0.75
keep_tail = true
output_dir = "trimmed"

[render]
preset = "medium"
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.defaults.thresh, 0.02);
        assert_eq!(config.defaults.min_clip, 0.75);
        assert!(config.defaults.keep_tail);
        assert_eq!(config.defaults.output_dir, PathBuf::from("trimmed"));
        assert_eq!(config.render.preset, "medium");
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        assert!(matches!(
            load_config_file(file.path()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_save_then_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.render.crf = 18;
        let saved = save_default_config(&config, Some(&path)).unwrap();

        assert_eq!(saved, path);
        assert_eq!(load_default_config(Some(&path)).unwrap(), config);
    }
}
