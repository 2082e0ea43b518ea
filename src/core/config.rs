//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.labeldesk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::chat::{ChatSettings, DEFAULT_MODEL, DEFAULT_SYSTEM_INSTRUCTION};
use crate::inference::providers::gemini::DEFAULT_GEMINI_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LabeldeskConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub model: Option<String>,
    pub system_instruction: Option<String>,
    pub system_instruction_file: Option<String>,
    pub grounding: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub grounding: bool,
}

// ============================================================================
// Resolved Config (concrete values, credential left raw)
// ============================================================================

#[derive(Clone)]
pub struct ResolvedConfig {
    pub chat: ChatSettings,
    /// Raw credential; blankness is judged by `ChatSession::initialize`.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("chat", &self.chat)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.labeldesk/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".labeldesk"))
}

/// Returns the path to `~/.labeldesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.labeldesk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LabeldeskConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LabeldeskConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LabeldeskConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LabeldeskConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LabeldeskConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LabeldeskConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!(
        "Config: model={:?}, grounding={:?}, api_key set={}",
        config.assistant.model,
        config.assistant.grounding,
        config.gemini.api_key.is_some()
    );
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# labeldesk Configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [assistant]
# model = "gemini-2.5-flash"                # Or set LABELDESK_MODEL
# system_instruction = "You are an expert AI assistant for the record label system."
# system_instruction_file = "assistant.md"  # Path relative to ~/.labeldesk/
# grounding = false                          # Enable search grounding (adds Sources)

# [gemini]
# api_key = "AIza..."                        # Or set API_KEY / GEMINI_API_KEY
# base_url = "https://generativelanguage.googleapis.com/v1beta"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LabeldeskConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as `resolve`, reading environment variables through `env`.
pub fn resolve_with_env<E>(config: &LabeldeskConfig, cli: &CliOverrides, env: E) -> ResolvedConfig
where
    E: Fn(&str) -> Option<String>,
{
    // Model: CLI → env → config → default
    let model = cli
        .model
        .clone()
        .or_else(|| env("LABELDESK_MODEL"))
        .or_else(|| config.assistant.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Credential: env → config. Read once here and never again.
    let api_key = env("API_KEY")
        .or_else(|| env("GEMINI_API_KEY"))
        .or_else(|| config.gemini.api_key.clone());

    // Base URL: env → config → default
    let base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    ResolvedConfig {
        chat: ChatSettings {
            model,
            system_instruction: resolve_system_instruction(config),
            grounding: cli.grounding || config.assistant.grounding.unwrap_or(false),
        },
        api_key,
        base_url,
    }
}

/// Resolves the system instruction: inline wins over file, both win over default.
fn resolve_system_instruction(config: &LabeldeskConfig) -> String {
    if let Some(ref instruction) = config.assistant.system_instruction {
        return instruction.clone();
    }

    // Try loading from system_instruction_file (relative to ~/.labeldesk/)
    if let Some(ref file) = config.assistant.system_instruction_file
        && let Some(dir) = config_dir()
    {
        let path = dir.join(file);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim().to_string();
                if !trimmed.is_empty() {
                    info!("Loaded system instruction from {}", path.display());
                    return trimmed;
                }
                warn!("System instruction file is empty: {}", path.display());
            }
            Err(e) => {
                warn!(
                    "Failed to read system instruction file {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    DEFAULT_SYSTEM_INSTRUCTION.to_string()
}
