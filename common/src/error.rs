//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tamaño de lote inválido: {0} (debe ser al menos 1)")]
    InvalidChunkSize(usize),

    #[error("Respuesta del servidor con formato inválido: {0}")]
    MalformedResponse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
