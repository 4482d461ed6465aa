//! Acta Uploader Common Library
//!
//! ロット分割・結果集計・表示モデルなど、I/Oを持たない共通ロジック

pub mod error;
pub mod events;
pub mod filter;
pub mod partition;
pub mod progress;
pub mod render;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use events::{RunEvent, RunObserver};
pub use filter::{filter_pdfs, is_pdf_name, NamedFile};
pub use partition::{partition, DEFAULT_CHUNK_SIZE};
pub use progress::{percent_of, ProgressUpdate, RunId, RunState};
pub use render::{render_rows, Counters, ResultRow, GENERIC_BATCH_ERROR};
pub use types::{BatchResponse, ErrorBody, FileOutcome, HealthStatus, OutcomeMetadata, OutcomeStatus};
pub use view::ResultsView;
