//! 実行イベント
//!
//! オーケストレーターが発行し、描画側（RunObserver）が受け取る。
//! すべてのイベントは発行元の `RunId` を持つ。

use crate::progress::{ProgressUpdate, RunId, RunState};
use crate::types::FileOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// 実行開始（表示をクリアする）
    Started {
        run_id: RunId,
        total_files: usize,
        total_batches: usize,
    },
    Progress {
        run_id: RunId,
        update: ProgressUpdate,
    },
    /// ロット成功: 結果と新しい累計
    BatchSucceeded {
        run_id: RunId,
        batch_index: usize,
        outcomes: Vec<FileOutcome>,
        cumulative_success: usize,
        cumulative_failure: usize,
    },
    /// ロット失敗: ユーザーに1回だけ通知する
    BatchFailed {
        run_id: RunId,
        batch_index: usize,
        message: String,
    },
    Finished {
        state: RunState,
    },
}

impl RunEvent {
    pub fn run_id(&self) -> RunId {
        match self {
            RunEvent::Started { run_id, .. }
            | RunEvent::Progress { run_id, .. }
            | RunEvent::BatchSucceeded { run_id, .. }
            | RunEvent::BatchFailed { run_id, .. } => *run_id,
            RunEvent::Finished { state } => state.run_id,
        }
    }
}

/// 描画境界
pub trait RunObserver {
    fn on_event(&mut self, event: &RunEvent);
}

/// イベントをそのまま記録する（テスト・レポート用）
impl RunObserver for Vec<RunEvent> {
    fn on_event(&mut self, event: &RunEvent) {
        self.push(event.clone());
    }
}
