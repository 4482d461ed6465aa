//! 結果行の生成
//!
//! FileOutcomeを表示用の行に変換する。描画（端末・HTML等）は呼び出し側の責務。

use crate::types::{FileOutcome, OutcomeStatus};
use serde::Serialize;

/// 値がない項目の表示
pub const PLACEHOLDER: &str = "-";

/// ロット失敗時の汎用メッセージ
pub const GENERIC_BATCH_ERROR: &str = "Error en el procesamiento del lote";

/// 結果テーブルの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub year: String,
    pub level: String,
    pub grade_section: String,
    pub status: OutcomeStatus,
    pub status_label: String,
    /// 新しいファイル名またはメッセージ（全文）
    pub detail: String,
}

impl ResultRow {
    pub fn from_outcome(outcome: &FileOutcome) -> Self {
        let meta = outcome.metadata.as_ref();
        Self {
            year: or_placeholder(meta.and_then(|m| m.year.as_deref())),
            level: or_placeholder(meta.and_then(|m| m.level.as_deref())),
            grade_section: or_placeholder(meta.and_then(|m| m.grade_section.as_deref())),
            status: outcome.status,
            status_label: outcome.status.label(),
            detail: or_placeholder(outcome.display_text()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }

    /// 表示幅に合わせて詳細を切り詰める（全文は `detail` に残る）
    pub fn truncated_detail(&self, max_chars: usize) -> String {
        truncate_text(&self.detail, max_chars)
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 結果を入力順に行へ変換
pub fn render_rows(outcomes: &[FileOutcome]) -> Vec<ResultRow> {
    outcomes.iter().map(ResultRow::from_outcome).collect()
}

/// 集計カウンタ（上書き表示）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub success: usize,
    pub failure: usize,
}

impl Counters {
    pub fn success_label(&self) -> String {
        format!("{} Éxitos", self.success)
    }

    pub fn failure_label(&self) -> String {
        format!("{} Errores", self.failure)
    }
}

/// ロット失敗の通知文
pub fn batch_alert(message: &str) -> String {
    format!("Error en lote: {}", message)
}

/// 文字数で切り詰め、末尾に `…` を付ける
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        kept + "…"
    } else {
        text.to_string()
    }
}
