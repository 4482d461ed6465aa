//! 表示モデル
//!
//! 結果テーブル・カウンタ・進捗バーの状態を保持する。
//! アクティブな実行以外のイベント（古い実行の遅延応答など）は破棄する。

use crate::events::{RunEvent, RunObserver};
use crate::progress::RunId;
use crate::render::{batch_alert, render_rows, Counters, ResultRow};

#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    active_run: Option<RunId>,
    rows: Vec<ResultRow>,
    counters: Counters,
    percent: u8,
    status: String,
    alerts: Vec<String>,
    finished: bool,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// イベントを適用する。破棄した場合は `false`
    pub fn apply(&mut self, event: &RunEvent) -> bool {
        if let RunEvent::Started { run_id, .. } = event {
            if self.active_run.is_some_and(|active| *run_id < active) {
                return false;
            }
            self.reset(*run_id);
            return true;
        }

        if self.active_run != Some(event.run_id()) {
            return false;
        }

        match event {
            RunEvent::Started { .. } => {}
            RunEvent::Progress { update, .. } => {
                self.percent = update.percent;
                if let Some(status) = &update.status {
                    self.status = status.clone();
                }
            }
            RunEvent::BatchSucceeded {
                outcomes,
                cumulative_success,
                cumulative_failure,
                ..
            } => {
                self.rows.extend(render_rows(outcomes));
                self.counters = Counters {
                    success: *cumulative_success,
                    failure: *cumulative_failure,
                };
            }
            RunEvent::BatchFailed { message, .. } => {
                self.alerts.push(batch_alert(message));
            }
            RunEvent::Finished { .. } => {
                self.finished = true;
            }
        }
        true
    }

    fn reset(&mut self, run_id: RunId) {
        *self = Self {
            active_run: Some(run_id),
            ..Self::default()
        };
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active_run
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RunObserver for ResultsView {
    fn on_event(&mut self, event: &RunEvent) {
        self.apply(event);
    }
}
