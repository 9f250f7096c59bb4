use super::types::{
    DEFAULT_HOST, DEFAULT_PORT, PlaceholdrConfig, RawPlaceholdrConfig, RawServerConfig,
    RawStatsConfig, ServerConfig, StatsConfig,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use placeholdr_core::{DEFAULT_HIT_BUCKETS_MS, DEFAULT_LIMIT};
use std::path::{Path, PathBuf};

/// Environment variable that relocates the project config directory
pub const PROJECT_CONFIG_DIR_ENV: &str = "PLACEHOLDR_PROJECT_CONFIG_DIR";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<PlaceholdrConfig> {
        Self::load_from_paths(
            Self::user_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load and merge the given config files; missing files are skipped
    pub fn load_from_paths(user: Option<&Path>, project: &Path) -> Result<PlaceholdrConfig> {
        let mut raw = RawPlaceholdrConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project)?);
        }

        // Convert to final config with defaults applied
        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<RawPlaceholdrConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "placeholdr").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with PLACEHOLDR_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var(PROJECT_CONFIG_DIR_ENV) {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".placeholdr/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawPlaceholdrConfig, overlay: RawPlaceholdrConfig) -> RawPlaceholdrConfig {
        RawPlaceholdrConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            stats: RawStatsConfig {
                default_limit: overlay.stats.default_limit.or(base.stats.default_limit),
                hit_buckets_ms: overlay.stats.hit_buckets_ms.or(base.stats.hit_buckets_ms),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawPlaceholdrConfig) -> PlaceholdrConfig {
        PlaceholdrConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            stats: StatsConfig {
                default_limit: raw.stats.default_limit.unwrap_or(DEFAULT_LIMIT),
                hit_buckets_ms: raw
                    .stats
                    .hit_buckets_ms
                    .unwrap_or_else(|| DEFAULT_HIT_BUCKETS_MS.to_vec()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let config = ConfigLoader::load_from_paths(Some(&missing), &missing).unwrap();

        assert_eq!(config, PlaceholdrConfig::default());
    }

    #[test]
    fn test_project_overrides_user() {
        let temp_dir = TempDir::new().unwrap();
        let user = write(
            &temp_dir,
            "user.toml",
            "[server]\nhost = \"127.0.0.1\"\nport = 7000\n\n[stats]\ndefault_limit = 5\n",
        );
        let project = write(&temp_dir, "project.toml", "[server]\nport = 9000\n");

        let config = ConfigLoader::load_from_paths(Some(&user), &project).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.stats.default_limit, 5);
        assert_eq!(config.stats.hit_buckets_ms, DEFAULT_HIT_BUCKETS_MS.to_vec());
    }

    #[test]
    fn test_hit_buckets_replace_not_merge() {
        let temp_dir = TempDir::new().unwrap();
        let user = write(&temp_dir, "user.toml", "[stats]\nhit_buckets_ms = [1000, 2000]\n");
        let project = write(&temp_dir, "project.toml", "[stats]\nhit_buckets_ms = [60000]\n");

        let config = ConfigLoader::load_from_paths(Some(&user), &project).unwrap();

        assert_eq!(config.stats.hit_buckets_ms, vec![60_000]);
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(&temp_dir, "broken.toml", "[server\nport = ");

        let err = ConfigLoader::load_from_paths(None, &project).unwrap_err();

        assert!(format!("{:#}", err).contains("broken.toml"));
    }

    #[test]
    #[serial]
    fn test_project_config_path_env_override() {
        let temp_dir = TempDir::new().unwrap();

        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe {
            std::env::set_var(PROJECT_CONFIG_DIR_ENV, temp_dir.path());
        }
        let path = ConfigLoader::project_config_path();
        unsafe {
            std::env::remove_var(PROJECT_CONFIG_DIR_ENV);
        }

        assert_eq!(path, temp_dir.path().join("config.toml"));
    }

    #[test]
    #[serial]
    fn test_project_config_path_default() {
        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe {
            std::env::remove_var(PROJECT_CONFIG_DIR_ENV);
        }
        assert_eq!(
            ConfigLoader::project_config_path(),
            PathBuf::from(".placeholdr/config.toml")
        );
    }
}
