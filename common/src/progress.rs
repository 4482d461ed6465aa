//! 実行状態と進捗計算

use serde::{Deserialize, Serialize};

pub const STATUS_STARTING: &str = "Iniciando procesamiento...";
pub const STATUS_COMPLETED: &str = "¡Todo el procesamiento completado!";

/// 実行ごとに採番される識別子（単調増加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// 1回の実行中の集計値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub run_id: RunId,
    pub total_files: usize,
    /// 応答（成功・失敗を問わず）が確定したロットのファイル数
    pub processed_files: usize,
    pub cumulative_success: usize,
    pub cumulative_failure: usize,
}

impl RunState {
    pub fn new(run_id: RunId, total_files: usize) -> Self {
        Self {
            run_id,
            total_files,
            processed_files: 0,
            cumulative_success: 0,
            cumulative_failure: 0,
        }
    }

    /// 成功したロットの件数を加算する
    pub fn record_batch(&mut self, success: usize, failure: usize) {
        self.cumulative_success += success;
        self.cumulative_failure += failure;
    }

    pub fn advance(&mut self, batch_len: usize) {
        self.processed_files = (self.processed_files + batch_len).min(self.total_files);
    }

    /// サーバーから結果が返ってきたファイル数
    pub fn reported_files(&self) -> usize {
        self.cumulative_success + self.cumulative_failure
    }
}

/// 進捗通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub percent: u8,
    /// `None` の場合は直前のステータス表示を維持する
    pub status: Option<String>,
}

impl ProgressUpdate {
    pub fn starting() -> Self {
        Self {
            percent: 0,
            status: Some(STATUS_STARTING.to_string()),
        }
    }

    /// ロット送信前の通知
    ///
    /// バーは送信前の割合、ラベルは送信後の件数を示す
    pub fn before_batch(batch_index: usize, processed_before: usize, batch_len: usize, total: usize) -> Self {
        Self {
            percent: percent_of(processed_before, total),
            status: Some(batch_status(batch_index, processed_before + batch_len, total)),
        }
    }

    pub fn after_batch(processed: usize, total: usize) -> Self {
        Self {
            percent: percent_of(processed, total),
            status: None,
        }
    }

    pub fn completed() -> Self {
        Self {
            percent: 100,
            status: Some(STATUS_COMPLETED.to_string()),
        }
    }
}

/// `round(done / total * 100)`（0.5は切り上げ）
///
/// 全件完了前は99で頭打ちにし、100は最終通知だけに使う
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 || done >= total {
        return 100;
    }
    let rounded = (done as u128 * 200 + total as u128) / (total as u128 * 2);
    rounded.min(99) as u8
}

/// `Procesando lote 2... (20/25)`
pub fn batch_status(batch_index: usize, counter: usize, total: usize) -> String {
    format!("Procesando lote {}... ({}/{})", batch_index + 1, counter, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_rounding() {
        assert_eq!(percent_of(0, 25), 0);
        assert_eq!(percent_of(10, 25), 40);
        assert_eq!(percent_of(20, 25), 80);
        assert_eq!(percent_of(25, 25), 100);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        // 12.5% → 13%
        assert_eq!(percent_of(1, 8), 13);
    }

    #[test]
    fn test_percent_of_never_100_before_done() {
        assert_eq!(percent_of(199, 200), 99);
        assert_eq!(percent_of(999, 1000), 99);
    }

    #[test]
    fn test_percent_of_monotonic() {
        for total in 1..300usize {
            let mut prev = 0;
            for done in 0..=total {
                let p = percent_of(done, total);
                assert!(p >= prev, "{}/{} で減少", done, total);
                prev = p;
            }
        }
    }

    #[test]
    fn test_before_batch_label_anticipates_count() {
        let update = ProgressUpdate::before_batch(1, 10, 10, 25);
        assert_eq!(update.percent, 40);
        assert_eq!(update.status.as_deref(), Some("Procesando lote 2... (20/25)"));
    }

    #[test]
    fn test_run_state_accumulates() {
        let mut state = RunState::new(RunId(1), 25);
        state.record_batch(9, 1);
        state.advance(10);
        state.record_batch(10, 0);
        state.advance(10);
        assert_eq!(state.cumulative_success, 19);
        assert_eq!(state.cumulative_failure, 1);
        assert_eq!(state.processed_files, 20);
        assert_eq!(state.reported_files(), 20);
    }

    #[test]
    fn test_run_id_ordering() {
        assert!(RunId(2) > RunId(1));
        assert_eq!(RunId(7).to_string(), "run-7");
    }
}
