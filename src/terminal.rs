//! 端末への描画
//!
//! ResultsViewに適用できたイベントだけを描画する。
//! 進捗はindicatifのバー、結果行とカウンタは標準出力。

use acta_common::render::truncate_text;
use acta_common::{ResultRow, ResultsView, RunEvent, RunObserver};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tracing::debug;

const DETAIL_WIDTH: usize = 48;
const BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}";

pub struct TerminalView {
    view: ResultsView,
    bar: ProgressBar,
    verbose: bool,
    out: Box<dyn Write + Send>,
}

impl TerminalView {
    pub fn new(verbose: bool) -> Self {
        Self {
            view: ResultsView::new(),
            bar: new_bar(),
            verbose,
            out: Box::new(std::io::stdout()),
        }
    }

    /// 出力先を差し替える（進捗バーは描画しない）
    pub fn with_output(verbose: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            view: ResultsView::new(),
            bar: ProgressBar::hidden(),
            verbose,
            out,
        }
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    fn print(&mut self, line: String) {
        let out = &mut self.out;
        self.bar.suspend(|| {
            // 出力先が閉じていても送信は続ける
            let _ = writeln!(out, "{}", line);
        });
    }

    fn print_new_rows(&mut self, count: usize) {
        let rows = self.view.rows();
        let lines: Vec<String> = rows[rows.len() - count..]
            .iter()
            .map(|row| format_row(row, self.verbose))
            .collect();
        for line in lines {
            self.print(line);
        }
    }

    fn print_counters(&mut self) {
        let counters = self.view.counters();
        let line = format!(
            "  ✔ {}  ✖ {}",
            counters.success_label(),
            counters.failure_label()
        );
        self.print(line);
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

impl RunObserver for TerminalView {
    fn on_event(&mut self, event: &RunEvent) {
        let rows_before = self.view.rows().len();
        if !self.view.apply(event) {
            debug!(run = %event.run_id(), "アクティブでない実行のイベントを破棄");
            return;
        }

        match event {
            RunEvent::Started {
                total_files,
                total_batches,
                ..
            } => {
                if !self.bar.is_hidden() {
                    self.bar = new_bar();
                }
                self.print(format!(
                    "📄 {} archivos PDF en {} lote(s)\n",
                    total_files, total_batches
                ));
                self.print(table_header());
            }
            RunEvent::Progress { .. } => {
                self.bar.set_position(self.view.percent() as u64);
                self.bar.set_message(self.view.status().to_string());
            }
            RunEvent::BatchSucceeded { .. } => {
                self.print_new_rows(self.view.rows().len() - rows_before);
                self.print_counters();
            }
            RunEvent::BatchFailed { .. } => {
                if let Some(alert) = self.view.alerts().last().cloned() {
                    self.print(format!("  ⚠ {}", alert));
                }
            }
            RunEvent::Finished { .. } => {
                self.bar.finish_with_message(self.view.status().to_string());
                self.print(String::new());
                self.print_counters();
            }
        }
    }
}

fn table_header() -> String {
    format!(
        "{:<6} {:<12} {:<8} {:<8} {}\n{}",
        "Año",
        "Nivel",
        "Grado",
        "Estado",
        "Archivo / Mensaje",
        "─".repeat(6 + 12 + 8 + 8 + 4 + DETAIL_WIDTH)
    )
}

/// 結果1行（verboseでなければ詳細を切り詰める）
pub fn format_row(row: &ResultRow, verbose: bool) -> String {
    let detail = if verbose {
        row.detail.clone()
    } else {
        row.truncated_detail(DETAIL_WIDTH)
    };
    format!(
        "{:<6} {:<12} {:<8} {:<8} {}",
        truncate_text(&row.year, 6),
        truncate_text(&row.level, 12),
        truncate_text(&row.grade_section, 8),
        row.status_label,
        detail
    )
}
