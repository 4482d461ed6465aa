use crate::error::{Result, UploaderError};
use acta_common::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const SERVER_URL_ENV: &str = "ACTAS_SERVER_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub batch_size: usize,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            batch_size: DEFAULT_CHUNK_SIZE,
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルがなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| UploaderError::Config("No se encontró el directorio personal".into()))?;
        Ok(home.join(".config").join("acta-uploader").join("config.json"))
    }

    /// 接続先サーバーURLを決定する
    ///
    /// 優先順位: `--server` > 環境変数 `ACTAS_SERVER_URL` > 設定ファイル。
    /// どこから来たURLでも送信前に検証する。
    pub fn resolve_server_url(&self, cli_override: Option<&str>) -> Result<String> {
        self.resolve_server_url_with(cli_override, std::env::var(SERVER_URL_ENV).ok())
    }

    fn resolve_server_url_with(
        &self,
        cli_override: Option<&str>,
        env_value: Option<String>,
    ) -> Result<String> {
        let url = non_empty(cli_override.map(str::to_string))
            .or_else(|| non_empty(env_value))
            .unwrap_or_else(|| self.server_url.clone());
        validate_server_url(&url)?;
        Ok(url)
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        validate_server_url(&url)?;
        self.server_url = url;
        Ok(())
    }

    pub fn set_batch_size(&mut self, size: usize) -> Result<()> {
        validate_batch_size(size)?;
        self.batch_size = size;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_server_url(&self.server_url)?;
        validate_batch_size(self.batch_size)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_server_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(UploaderError::Config(format!(
            "la URL del servidor debe empezar con http:// o https://: {}",
            url
        )))
    }
}

fn validate_batch_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(UploaderError::Config("el tamaño de lote debe ser al menos 1".into()));
    }
    Ok(())
}
