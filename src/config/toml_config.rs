use crate::adapters::http::DEFAULT_BASE_URL;
use crate::domain::model::DecodingParams;
use crate::utils::error::{NoteError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env placeholder regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub store: StoreConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        let params = DecodingParams::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: params.model,
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_tokens,
            timeout_seconds: 60,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: "data.json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "tiptap_output".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NoteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GROQ_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Config value first, then `GROQ_API_KEY`. Unresolved placeholders count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty() && !ENV_PLACEHOLDER.is_match(key))
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn decoding_params(&self) -> DecodingParams {
        DecodingParams {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            top_p: self.llm.top_p,
            max_tokens: self.llm.max_tokens,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e: std::net::AddrParseError| NoteError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: addr.clone(),
                reason: e.to_string(),
            })
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("llm.base_url", &self.llm.base_url)?;
        validation::validate_non_empty_string("llm.model", &self.llm.model)?;
        validation::validate_range("llm.temperature", self.llm.temperature, 0.0, 2.0)?;
        validation::validate_range("llm.top_p", self.llm.top_p, 0.0, 1.0)?;
        validation::validate_positive_number("llm.max_tokens", self.llm.max_tokens as usize, 1)?;
        validation::validate_positive_number(
            "llm.timeout_seconds",
            self.llm.timeout_seconds as usize,
            1,
        )?;
        validation::validate_positive_number("server.port", self.server.port as usize, 1)?;
        validation::validate_path("store.data_path", &self.store.data_path)?;
        validation::validate_path("output.directory", &self.output.directory)?;

        let api_key = self.resolve_api_key();
        validation::validate_required_field("llm.api_key", &api_key)?;

        self.bind_addr()?;
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
