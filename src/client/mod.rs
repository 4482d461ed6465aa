//! サーバーAPIクライアント
//!
//! - `POST /procesar-carpeta`: ロット送信（multipart、`files` を繰り返し）
//! - `GET /descargar`: 処理済みアクタのZIP
//! - `GET /health`: 稼働確認

use crate::config::Config;
use crate::error::{Result, UploaderError};
use crate::scanner::FileHandle;
use acta_common::{BatchResponse, ErrorBody, HealthStatus};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const SUBMIT_PATH: &str = "procesar-carpeta";
const DOWNLOAD_PATH: &str = "descargar";
const HEALTH_PATH: &str = "health";
const FILES_FIELD: &str = "files";
const PDF_MIME: &str = "application/pdf";

pub const DEFAULT_ARCHIVE_NAME: &str = "Actas_Procesadas_Organizadas.zip";

/// 1ロットを送信して結果を受け取る
#[async_trait]
pub trait BatchSubmitter: Send + Sync {
    async fn submit(&self, batch: &[FileHandle]) -> Result<BatchResponse>;
}

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 設定から生成（`server` 指定があれば優先）
    ///
    /// URLが不正なら通信前に `Config` エラー
    pub fn from_config(config: &Config, server: Option<&str>) -> Result<Self> {
        let url = config.resolve_server_url(server)?;
        Self::new(&url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        let response = error_for_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// 処理済みZIPを `dest` に保存し、書き込んだバイト数を返す
    pub async fn download_results(&self, dest: &Path) -> Result<u64> {
        let response = self.client.get(self.url(DOWNLOAD_PATH)).send().await?;
        let response = error_for_status(response).await?;
        let bytes = response.bytes().await?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}

#[async_trait]
impl BatchSubmitter for HttpClient {
    async fn submit(&self, batch: &[FileHandle]) -> Result<BatchResponse> {
        let form = build_form(batch).await?;
        debug!(files = batch.len(), url = %self.url(SUBMIT_PATH), "ロット送信");

        let response = self
            .client
            .post(self.url(SUBMIT_PATH))
            .multipart(form)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let body = response.text().await?;
        Ok(BatchResponse::parse(&body)?)
    }
}

async fn build_form(batch: &[FileHandle]) -> Result<Form> {
    let mut form = Form::new();
    for file in batch {
        let content = file.read_content().await?;
        let part = Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str(PDF_MIME)?;
        form = form.part(FILES_FIELD, part);
    }
    Ok(form)
}

/// 2xx以外を `Api` エラーに変換（`{ detail }` があれば取り出す）
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = ErrorBody::parse(&body).and_then(|b| b.message());
    Err(UploaderError::Api {
        status: status.as_u16(),
        detail,
    })
}
