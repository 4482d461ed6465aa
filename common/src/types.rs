//! 処理結果の型定義
//!
//! サーバー（`/procesar-carpeta`）とやり取りするワイヤ型:
//! - FileOutcome: 1ファイル分の処理結果
//! - BatchResponse: 1ロット分のレスポンス
//! - ErrorBody: 失敗時の `{ detail }` ボディ
//!
//! フィールド名はサーバー側（スペイン語）の名前に合わせてリネームする。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// ファイル単位の処理ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    /// 実サーバーが返す成功ステータス。表示・レポートではワイヤ値のまま残す
    Exito,
    Error,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Exito => "exito",
            OutcomeStatus::Error => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Success | OutcomeStatus::Exito)
    }

    /// 表示用ラベル（大文字）
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 抽出されたメタデータ（すべて任意）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeMetadata {
    #[serde(rename = "anio", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(rename = "nivel", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(rename = "grado_seccion", skip_serializing_if = "Option::is_none")]
    pub grade_section: Option<String>,

    #[serde(rename = "archivo_original", skip_serializing_if = "Option::is_none")]
    pub original_file_name: Option<String>,

    #[serde(rename = "codigo_modular", skip_serializing_if = "Option::is_none")]
    pub modular_code: Option<String>,

    #[serde(rename = "anexo", skip_serializing_if = "Option::is_none")]
    pub annex: Option<String>,

    #[serde(rename = "nombre_ie", skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,

    #[serde(rename = "es_recuperacion", skip_serializing_if = "Option::is_none")]
    pub is_recovery: Option<bool>,
}

/// 1ファイル分の処理結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    #[serde(rename = "estado")]
    pub status: OutcomeStatus,

    #[serde(rename = "archivo", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(rename = "nuevo_nombre", default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,

    #[serde(rename = "mensaje", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OutcomeMetadata>,

    #[serde(rename = "ruta_final", default, skip_serializing_if = "Option::is_none")]
    pub final_path: Option<String>,
}

impl FileOutcome {
    pub fn success(new_name: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            file_name: None,
            new_name: Some(new_name.into()),
            message: None,
            metadata: None,
            final_path: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            file_name: None,
            new_name: None,
            message: Some(message.into()),
            metadata: None,
            final_path: None,
        }
    }

    pub fn with_metadata(mut self, metadata: OutcomeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }

    /// 表示テキスト: 新しいファイル名、なければメッセージ
    ///
    /// 空文字列は「なし」と同じ扱い
    pub fn display_text(&self) -> Option<&str> {
        [self.new_name.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// 1ロット分のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(rename = "exitosos")]
    pub success_count: usize,

    #[serde(rename = "fallidos")]
    pub failure_count: usize,

    #[serde(rename = "resultados")]
    pub outcomes: Vec<FileOutcome>,

    #[serde(rename = "total_procesados", default, skip_serializing_if = "Option::is_none")]
    pub total_processed: Option<usize>,
}

impl BatchResponse {
    /// 結果リストから件数を数えてレスポンスを組み立てる
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let failure_count = outcomes.iter().filter(|o| o.is_error()).count();
        Self {
            success_count: outcomes.len() - failure_count,
            failure_count,
            total_processed: Some(outcomes.len()),
            outcomes,
        }
    }

    /// JSONボディをパースして件数の整合性を検証する
    ///
    /// スキーマ違反・件数不一致はすべて `MalformedResponse`
    pub fn parse(body: &str) -> Result<Self> {
        let response: BatchResponse = serde_json::from_str(body)
            .map_err(|e| Error::MalformedResponse(format!("JSON inválido: {}", e)))?;
        response.validate()?;
        Ok(response)
    }

    /// `exitosos + fallidos == len(resultados)` を検証
    pub fn validate(&self) -> Result<()> {
        let counted = self.success_count + self.failure_count;
        if counted != self.outcomes.len() {
            return Err(Error::MalformedResponse(format!(
                "conteos inconsistentes: exitosos({}) + fallidos({}) != resultados({})",
                self.success_count,
                self.failure_count,
                self.outcomes.len()
            )));
        }

        if let Some(total) = self.total_processed {
            if total != self.outcomes.len() {
                return Err(Error::MalformedResponse(format!(
                    "total_procesados({}) != resultados({})",
                    total,
                    self.outcomes.len()
                )));
            }
        }

        Ok(())
    }
}

/// 失敗レスポンスのボディ
///
/// FastAPIのバリデーションエラーでは `detail` が配列になるため `Value` で受ける
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// 表示用の詳細メッセージ
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// `/health` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_response() {
        let body = r#"{
            "exitosos": 1,
            "fallidos": 1,
            "resultados": [
                {
                    "estado": "success",
                    "nuevo_nombre": "2023_PRIMARIA_3A.pdf",
                    "metadata": { "anio": "2023", "nivel": "PRIMARIA", "grado_seccion": "3A" }
                },
                { "estado": "error", "mensaje": "No se encontró el año" }
            ]
        }"#;

        let response = BatchResponse::parse(body).expect("パース失敗");
        assert_eq!(response.success_count, 1);
        assert_eq!(response.failure_count, 1);
        assert_eq!(response.outcomes.len(), 2);

        let first = &response.outcomes[0];
        assert_eq!(first.status, OutcomeStatus::Success);
        assert_eq!(first.new_name.as_deref(), Some("2023_PRIMARIA_3A.pdf"));
        let meta = first.metadata.as_ref().expect("metadataなし");
        assert_eq!(meta.year.as_deref(), Some("2023"));
        assert_eq!(meta.grade_section.as_deref(), Some("3A"));

        assert!(response.outcomes[1].is_error());
    }

    #[test]
    fn test_parse_backend_exito_and_full_metadata() {
        // 実サーバーのレスポンス形式（estado: "exito"、追加フィールドあり）
        let body = r#"{
            "resultados": [{
                "archivo": "scan001.pdf",
                "estado": "exito",
                "mensaje": null,
                "metadata": {
                    "archivo_original": "scan001.pdf",
                    "anio": "2022",
                    "codigo_modular": "0512345",
                    "anexo": "0",
                    "nombre_ie": "IE 123",
                    "nivel": "SECUNDARIA",
                    "grado_seccion": "5B",
                    "es_recuperacion": false,
                    "nuevo_nombre": "x.pdf"
                },
                "nuevo_nombre": "2022_0512345_SECUNDARIA_5B.pdf",
                "ruta_final": "ActasProcesadas/2022/x.pdf"
            }],
            "total_procesados": 1,
            "exitosos": 1,
            "fallidos": 0
        }"#;

        let response = BatchResponse::parse(body).expect("パース失敗");
        let outcome = &response.outcomes[0];
        assert_eq!(outcome.status, OutcomeStatus::Exito);
        assert!(outcome.status.is_success());
        assert!(!outcome.is_error());
        assert_eq!(outcome.file_name.as_deref(), Some("scan001.pdf"));
        assert_eq!(outcome.message, None);
        let meta = outcome.metadata.as_ref().unwrap();
        assert_eq!(meta.school_name.as_deref(), Some("IE 123"));
        assert_eq!(meta.is_recovery, Some(false));
    }

    #[test]
    fn test_parse_rejects_count_mismatch() {
        let body = r#"{"exitosos": 2, "fallidos": 0, "resultados": [{"estado": "success"}]}"#;
        let err = BatchResponse::parse(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_rejects_total_mismatch() {
        let body = r#"{"exitosos": 1, "fallidos": 0, "total_procesados": 3, "resultados": [{"estado": "success"}]}"#;
        assert!(matches!(
            BatchResponse::parse(body),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_schema_violations() {
        let cases = [
            "not json",
            r#"{"exitosos": 0, "fallidos": 0}"#,
            r#"{"exitosos": -1, "fallidos": 1, "resultados": [{"estado": "error"}]}"#,
            r#"{"exitosos": 1, "fallidos": 0, "resultados": [{"estado": "pending"}]}"#,
            r#"{"exitosos": "1", "fallidos": 0, "resultados": [{"estado": "success"}]}"#,
        ];
        for body in cases {
            assert!(
                matches!(BatchResponse::parse(body), Err(Error::MalformedResponse(_))),
                "受け入れてはいけない: {}",
                body
            );
        }
    }

    #[test]
    fn test_display_text_prefers_new_name() {
        let mut outcome = FileOutcome::success("nuevo.pdf");
        outcome.message = Some("ok".to_string());
        assert_eq!(outcome.display_text(), Some("nuevo.pdf"));

        outcome.new_name = Some(String::new());
        assert_eq!(outcome.display_text(), Some("ok"));

        let error = FileOutcome::error("PDF ilegible");
        assert_eq!(error.display_text(), Some("PDF ilegible"));

        let empty = FileOutcome {
            message: None,
            ..FileOutcome::error("")
        };
        assert_eq!(empty.display_text(), None);
    }

    #[test]
    fn test_from_outcomes_counts() {
        let response = BatchResponse::from_outcomes(vec![
            FileOutcome::success("a.pdf"),
            FileOutcome::error("x"),
            FileOutcome::success("b.pdf"),
        ]);
        assert_eq!(response.success_count, 2);
        assert_eq!(response.failure_count, 1);
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let outcome = FileOutcome::success("a.pdf").with_metadata(OutcomeMetadata {
            year: Some("2024".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"estado\":\"success\""));
        assert!(json.contains("\"nuevo_nombre\":\"a.pdf\""));
        assert!(json.contains("\"anio\":\"2024\""));
        assert!(!json.contains("mensaje"));
    }

    #[test]
    fn test_error_body_message() {
        let body = ErrorBody::parse(r#"{"detail": "server overloaded"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("server overloaded"));

        let validation = ErrorBody::parse(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert!(validation.message().unwrap().contains("field required"));

        let empty = ErrorBody::parse(r#"{"detail": ""}"#).unwrap();
        assert_eq!(empty.message(), None);

        assert!(ErrorBody::parse("<html>502</html>").is_none());
    }

    #[test]
    fn test_status_label() {
        assert_eq!(OutcomeStatus::Success.label(), "SUCCESS");
        assert_eq!(OutcomeStatus::Error.label(), "ERROR");
        // サーバーが "exito" を返した行はそのまま大文字化して表示
        assert_eq!(OutcomeStatus::Exito.label(), "EXITO");
        assert!(!OutcomeStatus::Error.is_success());
    }

    #[test]
    fn test_exito_round_trips_on_wire() {
        let outcome: FileOutcome =
            serde_json::from_str(r#"{"estado": "exito", "nuevo_nombre": "a.pdf"}"#).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["estado"], "exito");
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "ok", "message": "Sistema funcionando"}"#).unwrap();
        assert!(health.is_ok());
        assert!(!HealthStatus::default().is_ok());
    }
}
