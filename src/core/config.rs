//! Battle configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose.
//! The config is passed explicitly to whatever needs it; there is no global
//! instance.

/// Configuration for a battle and its surrounding services
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Side length of the square battlefield, in tiles
    ///
    /// Units and range computations index tiles in [0, map_size) on both
    /// axes. The default scenario uses the classic 16x16 layout.
    pub map_size: usize,

    /// Number of entries the combat log retains
    ///
    /// The log is most-recent-first; pushing onto a full log evicts the
    /// oldest entry.
    pub log_capacity: usize,

    /// Chat endpoint of the inference service
    ///
    /// Expected to speak the Ollama /api/chat protocol: a POST of
    /// {model, messages, stream:false} answered by {message{role,content}}.
    pub inference_url: String,

    /// Model identifier sent with every inference request
    pub inference_model: String,

    /// Per-request timeout for inference calls, in seconds
    ///
    /// A timed-out request degrades to "no command this turn" for the unit
    /// being decided; it never stalls the battle.
    pub inference_timeout_secs: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            map_size: 16,
            log_capacity: 10,
            inference_url: "http://localhost:11434/api/chat".into(),
            inference_model: "llama3".into(),
            inference_timeout_secs: 60,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from environment variables
    ///
    /// Optional: OLLAMA_URL (chat endpoint), OLLAMA_MODEL (model name).
    /// Everything else keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.inference_url = url;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            config.inference_model = model;
        }
        config
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.map_size == 0 {
            return Err("map_size must be at least 1".into());
        }
        if self.log_capacity == 0 {
            return Err("log_capacity must be at least 1".into());
        }
        if self.inference_timeout_secs == 0 {
            return Err("inference_timeout_secs must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BattleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.map_size, 16);
        assert_eq!(config.log_capacity, 10);
    }

    #[test]
    fn test_zero_map_size_rejected() {
        let config = BattleConfig {
            map_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
