//! ロット送信オーケストレーター
//!
//! ## 処理フロー
//! 1. PDFのみに絞り込み（0件なら通信せずに中断）
//! 2. `batch_size` 件ずつに分割
//! 3. ロットを1つずつ送信し、応答を待ってから次へ進む
//! 4. 成功したロットだけ累計に加算し、結果を描画側へ渡す
//! 5. 失敗したロットは1回通知して次へ（再送しない）
//!
//! 状態（RunState）は実行ごとに新しく作り、イベントとして描画側へ流す。

use crate::client::BatchSubmitter;
use crate::error::{Result, UploaderError};
use crate::scanner::FileHandle;
use acta_common::{
    filter_pdfs, partition, FileOutcome, ProgressUpdate, RunEvent, RunId, RunObserver, RunState,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// 失敗したロット
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedBatch {
    pub batch_index: usize,
    pub files: Vec<String>,
    pub message: String,
}

/// 1回の実行結果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub state: RunState,
    /// 成功したロットの結果（送信順）
    pub outcomes: Vec<FileOutcome>,
    pub failed_batches: Vec<FailedBatch>,
}

pub struct Uploader<S: BatchSubmitter> {
    submitter: S,
    batch_size: usize,
    last_run: u64,
}

impl<S: BatchSubmitter> Uploader<S> {
    pub fn new(submitter: S, batch_size: usize) -> Self {
        Self {
            submitter,
            batch_size,
            last_run: 0,
        }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    fn next_run_id(&mut self) -> RunId {
        self.last_run += 1;
        RunId(self.last_run)
    }

    /// 候補ファイル群を送信する
    ///
    /// ロット単位の失敗では中断しない。`Err` になるのはPDFが0件の場合と
    /// バッチサイズが不正な場合のみ（どちらも通信前）。
    pub async fn run(
        &mut self,
        candidates: Vec<FileHandle>,
        observer: &mut dyn RunObserver,
    ) -> Result<RunSummary> {
        let candidate_count = candidates.len();
        let files = filter_pdfs(candidates);
        if files.is_empty() {
            warn!(candidates = candidate_count, "PDFが見つかりません");
            return Err(UploaderError::NoPdfFound);
        }

        let total = files.len();
        let batches = partition(files, self.batch_size)?;
        let run_id = self.next_run_id();
        let mut state = RunState::new(run_id, total);
        let mut outcomes = Vec::with_capacity(total);
        let mut failed_batches = Vec::new();

        info!(
            run = %run_id,
            files = total,
            skipped = candidate_count - total,
            batches = batches.len(),
            "送信開始"
        );

        observer.on_event(&RunEvent::Started {
            run_id,
            total_files: total,
            total_batches: batches.len(),
        });
        observer.on_event(&RunEvent::Progress {
            run_id,
            update: ProgressUpdate::starting(),
        });

        for (index, batch) in batches.iter().enumerate() {
            let processed_before = state.processed_files;
            observer.on_event(&RunEvent::Progress {
                run_id,
                update: ProgressUpdate::before_batch(index, processed_before, batch.len(), total),
            });

            // 応答（または失敗）が確定するまで次のロットは送らない
            match self.submitter.submit(batch).await {
                Ok(response) => {
                    state.record_batch(response.success_count, response.failure_count);
                    state.advance(batch.len());
                    debug!(
                        run = %run_id,
                        batch = index + 1,
                        success = response.success_count,
                        failure = response.failure_count,
                        "ロット完了"
                    );

                    observer.on_event(&RunEvent::BatchSucceeded {
                        run_id,
                        batch_index: index,
                        outcomes: response.outcomes.clone(),
                        cumulative_success: state.cumulative_success,
                        cumulative_failure: state.cumulative_failure,
                    });
                    observer.on_event(&RunEvent::Progress {
                        run_id,
                        update: ProgressUpdate::after_batch(state.processed_files, total),
                    });
                    outcomes.extend(response.outcomes);
                }
                Err(err) => {
                    warn!(run = %run_id, batch = index + 1, error = %err, "ロット失敗");
                    state.advance(batch.len());

                    let message = err.user_message();
                    observer.on_event(&RunEvent::BatchFailed {
                        run_id,
                        batch_index: index,
                        message: message.clone(),
                    });
                    failed_batches.push(FailedBatch {
                        batch_index: index,
                        files: batch.iter().map(|f| f.name.clone()).collect(),
                        message,
                    });
                }
            }
        }

        observer.on_event(&RunEvent::Progress {
            run_id,
            update: ProgressUpdate::completed(),
        });
        observer.on_event(&RunEvent::Finished { state });

        info!(
            run = %run_id,
            success = state.cumulative_success,
            failure = state.cumulative_failure,
            failed_batches = failed_batches.len(),
            "送信完了"
        );

        Ok(RunSummary {
            state,
            outcomes,
            failed_batches,
        })
    }
}
