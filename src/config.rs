use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default wait for the disassembler before giving up
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Interpreter and disassembler settings
    #[serde(default)]
    pub python: PythonConfig,

    /// Bytecode panel behaviour
    #[serde(default)]
    pub panel: PanelConfig,
}

/// Interpreter and disassembler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PythonConfig {
    /// Interpreter executable, or the root of a Python installation.
    /// When unset, `python3` and then `python` are looked up on PATH.
    #[serde(default)]
    pub interpreter: Option<PathBuf>,

    /// Maximum time in milliseconds to wait for the disassembler
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Script to run instead of the bundled disassembler helper.
    /// It is invoked as `<interpreter> <script> <source file>`.
    #[serde(default)]
    pub helper_script: Option<PathBuf>,

    /// File extensions treated as Python source
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_source_extensions() -> Vec<String> {
    vec!["py".to_string(), "pyw".to_string()]
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            interpreter: None,
            timeout_ms: default_timeout_ms(),
            helper_script: None,
            source_extensions: default_source_extensions(),
        }
    }
}

impl PythonConfig {
    /// Whether `path` has one of the configured source extensions
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.source_extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

/// Bytecode panel behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PanelConfig {
    /// Scroll the panel to reveal the highlighted block after each cursor move
    #[serde(default = "default_true")]
    pub scroll_to_highlight: bool,

    /// Background color of highlighted blocks as [r, g, b]
    #[serde(default = "default_highlight_color")]
    pub highlight_color: [u8; 3],
}

fn default_true() -> bool {
    true
}

fn default_highlight_color() -> [u8; 3] {
    [38, 79, 120]
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            scroll_to_highlight: true,
            highlight_color: default_highlight_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: PythonConfig::default(),
            panel: PanelConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    #[cfg(feature = "runtime")]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bytesight").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    #[cfg(feature = "runtime")]
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.python.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "python.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.python.timeout_ms, 5_000);
        assert!(config.python.interpreter.is_none());
        assert!(config.python.helper_script.is_none());
        assert!(config.panel.scroll_to_highlight);
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "python": { "interpreter": "/opt/py/bin/python3" } }"#)
                .unwrap();
        assert_eq!(
            config.python.interpreter,
            Some(PathBuf::from("/opt/py/bin/python3"))
        );
        assert_eq!(config.python.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.python.source_extensions, vec!["py", "pyw"]);
        assert_eq!(config.panel, PanelConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = Config::default();
        config.python.timeout_ms = 1_500;
        config.panel.scroll_to_highlight = false;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = Config::load_from_file(temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));

        let broken = temp_dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from_file(&broken),
            Err(ConfigError::ParseError(_))
        ));

        let zero = temp_dir.path().join("zero.json");
        std::fs::write(&zero, r#"{ "python": { "timeout_ms": 0 } }"#).unwrap();
        assert!(matches!(
            Config::load_from_file(&zero),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_is_source_file() {
        let python = PythonConfig::default();
        assert!(python.is_source_file(Path::new("main.py")));
        assert!(python.is_source_file(Path::new("/a/b/App.PYW")));
        assert!(!python.is_source_file(Path::new("main.rs")));
        assert!(!python.is_source_file(Path::new("Makefile")));
    }
}
