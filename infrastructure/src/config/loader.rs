//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use super::ConfigError;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./council.toml` or `./.council.toml`
    /// 3. XDG config: `~/.config/council/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// The global config file path under the user's config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("council").join("config.toml"))
    }

    /// The project-level config file, if one exists.
    pub fn project_config_path() -> Option<PathBuf> {
        ["council.toml", ".council.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_files_exist() {
        let config = ConfigLoader::load_defaults();
        assert!(config.council.participants.is_empty());
        assert!(config.retrieval.endpoint.is_none());
    }

    #[test]
    fn explicit_path_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[council.participants]]
id = "deepseek"
provider = "deepseek"
model = "deepseek-chat"
api_key_env = "DEEPSEEK_API_KEY"

[retrieval]
endpoint = "http://localhost:8900/retrieve"
"#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.council.participants.len(), 1);
        assert_eq!(
            config.retrieval.endpoint.as_deref(),
            Some("http://localhost:8900/retrieve")
        );
        // Untouched sections keep their defaults.
        assert!(config.providers.openai.contains("openai.com"));
    }

    #[test]
    fn global_config_path_is_under_council() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("council"));
        }
    }
}
