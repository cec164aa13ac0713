use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Geometry, Player};

/// Search settings for the machine player.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched before falling back to the heuristic
    pub depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: 7 }
    }
}

/// Which side the machine plays. The other side takes keyboard input.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub machine: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            machine: Player::PlayerTwo,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: Geometry,
    pub search: SearchConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board, Geometry::new(6, 7, 4));
        assert_eq!(config.game.machine, Player::PlayerTwo);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
rows = 8
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.rows, 8);
        // Other fields should be defaults
        assert_eq!(config.board.cols, 7);
        assert_eq!(config.board.connection_length, 4);
        assert_eq!(config.search.depth, 7);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.board, Geometry::default());
        assert_eq!(config.search.depth, SearchConfig::default().depth);
    }

    #[test]
    fn test_machine_side_parses() {
        let config: AppConfig = toml::from_str("[game]\nmachine = \"PlayerOne\"\n").unwrap();
        assert_eq!(config.game.machine, Player::PlayerOne);
        assert!(toml::from_str::<AppConfig>("[game]\nmachine = \"Nobody\"\n").is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_short_connection() {
        let mut config = AppConfig::default();
        config.board.connection_length = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Board(_))));
    }

    #[test]
    fn test_validation_rejects_oversized_connection() {
        let mut config = AppConfig::default();
        config.board = Geometry::new(4, 4, 5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_huge_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.toml");
        std::fs::write(&path, "[board]\nrows = 1000000000\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Board(_))));
    }

    #[test]
    fn test_validation_rejects_empty_board() {
        let mut config = AppConfig::default();
        config.board.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.search.depth, 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
depth = 4
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search.depth, 4);
        // Others are defaults
        assert_eq!(config.board, Geometry::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nrows = 2\ncols = 2\nconnection_length = 4\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Board(_))));

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = AppConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config.board, Geometry::default());
    }
}
