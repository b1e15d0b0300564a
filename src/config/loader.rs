// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::{LauncherConfig, RawLauncherConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// File name of the optional launcher configuration.
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Location of `launcher.toml` for a launcher living in `bundle_dir`
/// (`<bundle_dir>/../Resources/launcher.toml`).
pub fn config_path_for(bundle_dir: &Path) -> PathBuf {
    bundle_dir
        .join("..")
        .join("Resources")
        .join(CONFIG_FILE_NAME)
}

/// Parse a config file without validation.
pub fn load_from_path(fs: &dyn FileSystem, path: &Path) -> Result<RawLauncherConfig> {
    let contents = fs.read_to_string(path)?;
    let config: RawLauncherConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load and validate `path`, or return the defaults when it does not exist.
///
/// Runs before logging is initialised (the file may set the level), so it
/// logs nothing itself; the caller reports [`ConfigSource`] afterwards.
pub fn load_or_default(fs: &dyn FileSystem, path: &Path) -> Result<(LauncherConfig, ConfigSource)> {
    if !fs.exists(path) {
        return Ok((LauncherConfig::default(), ConfigSource::Defaults));
    }

    let raw = load_from_path(fs, path)?;
    Ok((LauncherConfig::try_from(raw)?, ConfigSource::File))
}

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LauncherError;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn config_sits_in_sibling_resources_dir() {
        assert_eq!(
            config_path_for(Path::new("/A.app/Contents/MacOS")),
            PathBuf::from("/A.app/Contents/MacOS/../Resources/launcher.toml")
        );
    }

    #[test]
    fn missing_file_means_defaults() {
        let fs = MockFileSystem::new();
        let (cfg, source) = load_or_default(&fs, Path::new("/nope/launcher.toml")).unwrap();
        assert_eq!(cfg.interpreter, "ChroniclerPython");
        assert_eq!(source, ConfigSource::Defaults);
    }

    #[test]
    fn present_file_is_parsed() {
        let fs = MockFileSystem::new();
        fs.add_file("/b/launcher.toml", "[launcher]\nforward_args = true\n");
        let (cfg, source) = load_or_default(&fs, Path::new("/b/launcher.toml")).unwrap();
        assert!(cfg.forward_args);
        assert_eq!(source, ConfigSource::File);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let fs = MockFileSystem::new();
        fs.add_dir("/b/launcher.toml");
        assert!(matches!(
            load_or_default(&fs, Path::new("/b/launcher.toml")),
            Err(LauncherError::Other(_))
        ));
    }
}
