//! Configuration management for the career assistant

use crate::error::{CareerForgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub graph: GraphConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (chat completions + transcriptions)
    pub api_base: String,
    /// Environment variable the API key is read from
    pub api_key_env: String,
    pub default_model: String,
    pub transcription_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub available_models: Vec<AvailableModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableModel {
    pub name: String,
    pub context_window: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Related topics listed when a lookup has no abstract
    pub max_topics: usize,
    /// Missing skills that get a tutorial lookup in the roadmap
    pub tutorial_skill_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                api_base: "https://api.groq.com/openai/v1".to_string(),
                api_key_env: "GROQ_API_KEY".to_string(),
                default_model: "llama-3.3-70b-versatile".to_string(),
                transcription_model: "whisper-large-v3".to_string(),
                temperature: 0.1,
                max_tokens: 2048,
                timeout_secs: 120,
                available_models: vec![
                    AvailableModel {
                        name: "llama-3.3-70b-versatile".to_string(),
                        context_window: 131_072,
                        description: "Large model for detailed analysis and rewriting".to_string(),
                    },
                    AvailableModel {
                        name: "llama-3.1-8b-instant".to_string(),
                        context_window: 131_072,
                        description: "Fast, inexpensive model for quick scans".to_string(),
                    },
                ],
            },
            search: SearchConfig {
                enabled: true,
                endpoint: "https://api.duckduckgo.com/".to_string(),
                max_topics: 3,
                tutorial_skill_limit: 5,
            },
            graph: GraphConfig {
                width: 1000,
                height: 600,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration, writing defaults on first use
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CareerForgeError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CareerForgeError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-forge")
            .join("config.toml")
    }

    /// Resolve the API key: explicit value first, then the configured environment variable.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Result<String> {
        let from_env = std::env::var(&self.llm.api_key_env).ok();
        explicit
            .map(str::to_string)
            .or(from_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CareerForgeError::MissingInput(format!(
                    "no API key; set {} or pass --api-key",
                    self.llm.api_key_env
                ))
            })
    }

    pub fn get_model_by_name(&self, name: &str) -> Option<&AvailableModel> {
        self.llm.available_models.iter().find(|m| m.name == name)
    }

    /// Set a scalar value by dotted key, e.g. `llm.temperature`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value.parse::<T>().map_err(|_| {
                CareerForgeError::Configuration(format!("Invalid value for {}: {}", key, value))
            })
        }

        match key {
            "llm.api_base" => self.llm.api_base = value.to_string(),
            "llm.api_key_env" => self.llm.api_key_env = value.to_string(),
            "llm.default_model" => self.llm.default_model = value.to_string(),
            "llm.transcription_model" => self.llm.transcription_model = value.to_string(),
            "llm.temperature" => {
                let temperature: f32 = parse(key, value)?;
                if !(0.0..=1.0).contains(&temperature) {
                    return Err(CareerForgeError::Configuration(
                        "llm.temperature must be between 0.0 and 1.0".to_string(),
                    ));
                }
                self.llm.temperature = temperature;
            }
            "llm.max_tokens" => self.llm.max_tokens = parse(key, value)?,
            "llm.timeout_secs" => self.llm.timeout_secs = parse(key, value)?,
            "search.enabled" => self.search.enabled = parse(key, value)?,
            "search.endpoint" => self.search.endpoint = value.to_string(),
            "search.max_topics" => self.search.max_topics = parse(key, value)?,
            "search.tutorial_skill_limit" => self.search.tutorial_skill_limit = parse(key, value)?,
            "graph.width" => self.graph.width = parse(key, value)?,
            "graph.height" => self.graph.height = parse(key, value)?,
            "output.detailed" => self.output.detailed = parse(key, value)?,
            "output.color_output" => self.output.color_output = parse(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(CareerForgeError::Configuration)?
            }
            _ => {
                return Err(CareerForgeError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.llm.default_model, "llama-3.3-70b-versatile");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.graph.width, 1000);
        assert_eq!(reloaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("llm.temperature", "0.5").unwrap();
        config.set_value("output.format", "md").unwrap();
        config.set_value("search.enabled", "false").unwrap();

        assert_eq!(config.llm.temperature, 0.5);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.search.enabled);

        assert!(config.set_value("llm.temperature", "1.5").is_err());
        assert!(config.set_value("graph.width", "wide").is_err());
        assert!(config.set_value("nope.key", "1").is_err());
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = Config::default();
        config.llm.api_key_env = "CAREER_FORGE_TEST_UNSET_KEY".to_string();

        assert_eq!(config.resolve_api_key(Some(" abc ")).unwrap(), "abc");
        let err = config.resolve_api_key(Some("   ")).unwrap_err();
        assert!(err.is_missing_input());
        assert!(config.resolve_api_key(None).unwrap_err().is_missing_input());
    }

    #[test]
    fn test_known_models() {
        let config = Config::default();
        assert!(config.get_model_by_name("llama-3.1-8b-instant").is_some());
        assert!(config.get_model_by_name("gpt-2").is_none());
    }
}
