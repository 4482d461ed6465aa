use acta_common::GENERIC_BATCH_ERROR;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Ruta no encontrada: {0}")]
    PathNotFound(String),

    #[error("No se detectaron archivos PDF en la selección.")]
    NoPdfFound,

    #[error("Error de conexión: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error del servidor (HTTP {status}): {}", .detail.as_deref().unwrap_or(GENERIC_BATCH_ERROR))]
    Api { status: u16, detail: Option<String> },

    #[error("Respuesta del servidor con formato inválido: {0}")]
    MalformedResponse(String),

    #[error("Error al interpretar JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de entrada: {0}")]
    Prompt(String),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(acta_common::Error),
}

impl From<acta_common::Error> for UploaderError {
    fn from(err: acta_common::Error) -> Self {
        match err {
            acta_common::Error::MalformedResponse(msg) => UploaderError::MalformedResponse(msg),
            other => UploaderError::Common(other),
        }
    }
}

impl UploaderError {
    /// ロット失敗時にユーザーへ見せるメッセージ
    ///
    /// サーバーの `detail` があればそれを、なければ汎用メッセージ
    pub fn user_message(&self) -> String {
        match self {
            UploaderError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_BATCH_ERROR.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UploaderError>;
