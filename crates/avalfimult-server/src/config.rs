//! Server configuration
//!
//! Settings are layered, later sources winning: built-in defaults, the YAML
//! config file (optional), `AVALFIMULT__*` environment variables, then CLI
//! flags. Nested keys use `__` in environment variables, e.g.
//! `AVALFIMULT__ARTIFACTS__DIR=/srv/models`.

use avalfimult_model::ArtifactConfig;
use avalfimult_policy::{Policy, PolicyEngine, NET_EQUITY_FLOOR, NET_EQUITY_MESSAGE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub listen: String,

    /// Listen port
    pub port: u16,

    /// Scaler and classifier artifact locations
    pub artifacts: ArtifactConfig,

    /// What a successful `/avalfimult` response contains
    pub response_mode: ResponseMode,

    /// Business rule settings
    pub policy: PolicySettings,

    /// Cross-origin settings
    pub cors: CorsSettings,

    /// External documentation that `/doc` redirects to
    pub docs_url: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0".to_string(),
            port: 5001,
            artifacts: ArtifactConfig::default(),
            response_mode: ResponseMode::default(),
            policy: PolicySettings::default(),
            cors: CorsSettings::default(),
            docs_url: "https://github.com/Moriblo/PUC_EngSoft_MVP4".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file, environment and CLI overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(Path::new(&cli.config))
                    .format(::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("AVALFIMULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse configuration from a YAML string, without environment or CLI layers
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(yaml, ::config::FileFormat::Yaml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Apply CLI overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }

        if let Some(dir) = &cli.models_dir {
            self.artifacts.dir = dir.clone();
        }

        if let Some(mode) = cli.response_mode {
            self.response_mode = mode;
        }
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

/// Body of a successful scoring response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// "Viable" / "Not Viable"
    #[default]
    Verdict,
    /// Raw classifier label "1" / "0", for clients of the original service
    Label,
}

/// Business rule settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Minimum net equity (`patliq`), inclusive
    pub min_net_equity: f64,

    /// Message returned when net equity is below the floor
    pub message: String,

    /// Additional YAML policy files, evaluated after the net equity floor
    pub files: Vec<PathBuf>,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            min_net_equity: NET_EQUITY_FLOOR,
            message: NET_EQUITY_MESSAGE.to_string(),
            files: Vec::new(),
        }
    }
}

impl PolicySettings {
    /// Build the policy engine these settings describe
    pub fn build_engine(&self) -> avalfimult_core::Result<PolicyEngine> {
        let mut engine = PolicyEngine::new();
        engine.add_policy(Policy::net_equity_floor(
            self.min_net_equity,
            self.message.clone(),
        ));
        for file in &self.files {
            engine.load_policy(file)?;
        }
        Ok(engine)
    }
}

/// Cross-origin resource sharing settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Allowed origins; empty allows any origin (without credentials)
    pub allowed_origins: Vec<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}
