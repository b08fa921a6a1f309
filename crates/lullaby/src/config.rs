//! Layered configuration for the lullaby CLI.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (include_str! from lullaby.toml)
//! - `~/.config/lullaby/lullaby.toml`
//! - `./lullaby.toml`

use config::{Config, File, FileFormat};
use lullaby_error::{ConfigError, LullabyError, LullabyResult};
use lullaby_models::OpenAICompatibleClient;
use lullaby_story::{FinalPassPolicy, PhaseSettings, PipelineOptions, REPETITION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../lullaby.toml");

/// Where requests are sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DriverConfig {
    /// Label reported in logs, e.g. "openai", "groq" or "ollama"
    #[serde(default = "default_provider")]
    pub provider: String,
    /// API base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Environment variable holding the API key; unset for keyless local servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

/// Sampling settings per phase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PhasesConfig {
    /// Planning phase
    pub outline: PhaseSettings,
    /// Draft phase
    pub draft: PhaseSettings,
    /// Polishing phase
    #[serde(rename = "final")]
    pub final_pass: PhaseSettings,
}

/// Repetition policy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Trigram ratio above which a draft counts as repetitive
    pub repetition_threshold: f64,
    /// When the polishing phase runs
    pub final_pass: FinalPassPolicy,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            repetition_threshold: REPETITION_THRESHOLD,
            final_pass: FinalPassPolicy::default(),
        }
    }
}

/// Top-level lullaby configuration.
///
/// # Example
///
/// ```no_run
/// use lullaby::LullabyConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LullabyConfig::load()?;
/// println!("Model: {}", config.driver.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LullabyConfig {
    /// Model endpoint
    pub driver: DriverConfig,
    /// Per-phase sampling settings
    #[serde(default)]
    pub phases: PhasesConfig,
    /// Repetition policy
    #[serde(default)]
    pub quality: QualityConfig,
}

impl LullabyConfig {
    /// Load the bundled defaults overridden by the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> LullabyResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                LullabyError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;
        Self::deserialize_from(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> LullabyResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/lullaby/lullaby.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("lullaby").required(false));

        let config = builder.build().map_err(|e| {
            LullabyError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?;
        Self::deserialize_from(config)
    }

    fn deserialize_from(config: Config) -> LullabyResult<Self> {
        config.try_deserialize().map_err(|e| {
            LullabyError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
    }

    /// Pipeline options assembled from the phase and quality sections.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            model: Some(self.driver.model.clone()),
            outline: self.phases.outline,
            draft: self.phases.draft,
            final_pass: self.phases.final_pass,
            repetition_threshold: self.quality.repetition_threshold,
            final_pass_policy: self.quality.final_pass,
        }
    }

    /// Build the model client described by the `[driver]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key_env` names a variable that is unset.
    pub fn client(&self) -> LullabyResult<OpenAICompatibleClient> {
        let endpoint = OpenAICompatibleClient::endpoint_for(&self.driver.base_url);
        let client = match self.driver.api_key_env.as_deref() {
            Some(var) if !var.trim().is_empty() => {
                OpenAICompatibleClient::from_env(var, &self.driver.model, endpoint)?
            }
            _ => OpenAICompatibleClient::new("", &self.driver.model, endpoint),
        };
        Ok(client.with_provider(provider_label(&self.driver.provider)))
    }
}

fn provider_label(name: &str) -> &'static str {
    match name.trim().to_lowercase().as_str() {
        "openai" => "openai",
        "groq" => "groq",
        "ollama" => "ollama",
        "openrouter" => "openrouter",
        "together" => "together",
        _ => "openai-compatible",
    }
}
