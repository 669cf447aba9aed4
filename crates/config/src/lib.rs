//! Configuration loading, validation, and management for Parley.
//!
//! Loads configuration from `~/.parley/config.toml` with environment
//! variable overrides. Validates all settings at startup.
//!
//! The intent routes and context passages are configuration, not code:
//! their order in the file is their evaluation order.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.parley/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation backend connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// Orchestration loop behaviour
    #[serde(default)]
    pub session: SessionConfig,

    /// Latency of the simulated collaborators
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Ordered intent routes (first match wins)
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,

    /// Keyword-triggered context passages
    #[serde(default)]
    pub context: ContextConfig,
}

/// Which request shape the backend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Single flat prompt over `/api/generate`
    Generate,
    /// Role-tagged message list over `/api/chat`
    Chat,
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generate" => Ok(Self::Generate),
            "chat" => Ok(Self::Chat),
            other => Err(ConfigError::ValidationError(format!(
                "unknown backend kind '{other}' (expected 'generate' or 'chat')"
            ))),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generate => f.write_str("generate"),
            Self::Chat => f.write_str("chat"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_kind")]
    pub kind: BackendKind,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_backend_kind() -> BackendKind {
    BackendKind::Generate
}
fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "llama3.1".into()
}
fn default_connect_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: None,
            max_tokens: None,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inputs that end the session (case-insensitive)
    #[serde(default = "default_exit_commands")]
    pub exit_commands: Vec<String>,

    /// Framing turn seeded at the start of every session
    #[serde(default = "default_system_prompt", skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Instruction appended after the history in every prompt
    #[serde(default = "default_instruction")]
    pub instruction: String,

    /// Abort a generation turn after this many seconds
    #[serde(default = "default_turn_timeout", skip_serializing_if = "Option::is_none")]
    pub turn_timeout_secs: Option<u64>,

    /// Only the most recent N non-system turns are sent to the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_max_turns: Option<usize>,

    /// Append local answers to the history as a user/assistant pair
    #[serde(default)]
    pub record_local_answers: bool,
}

fn default_exit_commands() -> Vec<String> {
    vec!["sair".into()]
}
fn default_system_prompt() -> Option<String> {
    Some(
        "Você é um assistente do sistema SICON, especializado em auxiliar usuários \
         sobre contratos, clientes, notas fiscais, relatórios e integrações com órgãos públicos. \
         Responda sempre de forma clara e contextualizada ao sistema descrito."
            .into(),
    )
}
fn default_instruction() -> String {
    "Answer clearly, grounded in the context above.".into()
}
fn default_turn_timeout() -> Option<u64> {
    Some(120)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exit_commands: default_exit_commands(),
            system_prompt: default_system_prompt(),
            instruction: default_instruction(),
            turn_timeout_secs: default_turn_timeout(),
            history_max_turns: None,
            record_local_answers: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_handler_latency")]
    pub handler_latency_ms: u64,

    #[serde(default = "default_context_latency")]
    pub context_latency_ms: u64,
}

fn default_handler_latency() -> u64 {
    200
}
fn default_context_latency() -> u64 {
    100
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            handler_latency_ms: default_handler_latency(),
            context_latency_ms: default_context_latency(),
        }
    }
}

/// One intent route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Name of the handler to run
    pub handler: String,

    /// Identifier passed to the handler
    pub subject_id: String,

    /// Keywords that must all be present
    #[serde(default)]
    pub all_of: Vec<String>,

    /// Keywords of which at least one must be present (ignored when empty)
    #[serde(default)]
    pub any_of: Vec<String>,
}

fn route(handler: &str, subject_id: &str, all_of: &[&str], any_of: &[&str]) -> RouteConfig {
    RouteConfig {
        handler: handler.into(),
        subject_id: subject_id.into(),
        all_of: all_of.iter().map(|s| s.to_string()).collect(),
        any_of: any_of.iter().map(|s| s.to_string()).collect(),
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        route("contract_lookup", "445", &["contrato"], &["consult", "status", "situa"]),
        route("balance_lookup", "123", &["saldo", "cliente"], &[]),
        route("invoice_issue", "200", &["nota"], &["emitir", "gerar"]),
    ]
}

/// A passage selected when any of its keywords appears in the user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageConfig {
    pub keywords: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Used when no passage matches or retrieval fails
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Checked in order; the first passage with a matching keyword wins
    #[serde(default = "default_passages")]
    pub passages: Vec<PassageConfig>,
}

fn passage(keyword: &str, text: &str) -> PassageConfig {
    PassageConfig {
        keywords: vec![keyword.into()],
        text: text.into(),
    }
}

fn default_passages() -> Vec<PassageConfig> {
    vec![
        passage(
            "nota",
            "No sistema SICON, o módulo de Notas Fiscais é responsável por registrar a prestação de serviços \
             vinculada a contratos ativos. Cada nota é emitida após a autorização de desconto e enviada ao órgão contratante.",
        ),
        passage(
            "contrato",
            "No sistema SICON, o módulo de Contratos gerencia os vínculos entre a empresa e os órgãos públicos. \
             Cada contrato contém dados do órgão, prazo, valores e status de vigência.",
        ),
        passage(
            "saldo",
            "No sistema SICON, o saldo representa o valor disponível para novas consignações em folha, \
             calculado com base nos descontos e limites autorizados.",
        ),
    ]
}

fn default_fallback() -> String {
    "Você é um assistente do sistema SICON, especializado em auxiliar usuários \
     sobre contratos, clientes, notas fiscais, relatórios e integrações com órgãos públicos."
        .into()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            passages: default_passages(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.parley/config.toml).
    ///
    /// Environment variables override the file:
    /// - `PARLEY_BACKEND` (`generate` or `chat`)
    /// - `PARLEY_BASE_URL`
    /// - `PARLEY_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `PARLEY_BACKEND`, `PARLEY_BASE_URL` and `PARLEY_MODEL`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(kind) = std::env::var("PARLEY_BACKEND") {
            self.backend.kind = kind.parse()?;
        }
        if let Ok(url) = std::env::var("PARLEY_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Ok(model) = std::env::var("PARLEY_MODEL") {
            self.backend.model = model;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parley")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(t) = self.backend.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::ValidationError(
                    "backend.temperature must be between 0.0 and 2.0".into(),
                ));
            }
        }

        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("backend.base_url is empty".into()));
        }

        if self.backend.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("backend.model is empty".into()));
        }

        if self.session.exit_commands.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "session.exit_commands needs at least one non-empty entry".into(),
            ));
        }

        if let Some(route) = self
            .routes
            .iter()
            .find(|r| r.all_of.is_empty() && r.any_of.is_empty())
        {
            return Err(ConfigError::ValidationError(format!(
                "route for handler '{}' has no keywords",
                route.handler
            )));
        }

        if self
            .context
            .passages
            .iter()
            .any(|p| p.keywords.is_empty() || p.text.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(
                "every context passage needs keywords and non-empty text".into(),
            ));
        }

        if self.context.fallback.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "context.fallback must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            session: SessionConfig::default(),
            simulation: SimulationConfig::default(),
            routes: default_routes(),
            context: ContextConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
