use std::env;
use std::path::{Path, PathBuf};

use crate::app::services::storage::PREFERENCES_KEY;

pub const APP_DIR: &str = "formbuilder";

/// Environment variable that overrides the preferences directory.
pub const CONFIG_DIR_ENV: &str = "FORMBUILDER_CONFIG_DIR";

/// Where preferences live on disk and under which key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub key: String,
}

impl StorageConfig {
    /// Resolve the directory: explicit override, then `FORMBUILDER_CONFIG_DIR`,
    /// then the platform config dir (cross-platform), then the working directory.
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        let env_dir = env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self::resolve_with(override_dir, env_dir)
    }

    fn resolve_with(override_dir: Option<&Path>, env_dir: Option<PathBuf>) -> Self {
        let dir = match (override_dir, env_dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => dir,
            (None, None) => {
                let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
                path.push(APP_DIR);
                path
            }
        };
        Self {
            dir,
            key: PREFERENCES_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = StorageConfig::resolve_with(Some(Path::new("/tmp/a")), Some(PathBuf::from("/tmp/b")));
        assert_eq!(config.dir, PathBuf::from("/tmp/a"));
        assert_eq!(config.key, "preferences-storage");
    }

    #[test]
    fn test_env_before_platform_dir() {
        let config = StorageConfig::resolve_with(None, Some(PathBuf::from("/tmp/b")));
        assert_eq!(config.dir, PathBuf::from("/tmp/b"));
    }

    #[test]
    fn test_platform_default_ends_with_app_dir() {
        let config = StorageConfig::resolve_with(None, None);
        assert!(config.dir.ends_with(APP_DIR));
    }
}
