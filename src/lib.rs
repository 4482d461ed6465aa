//! acta-uploader
//!
//! PDFのアクタをロットに分けて処理サーバーへ順番に送信するCLI。
//! I/Oを持たないロジック（分割・集計・表示モデル）は `acta_common` にある。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod terminal;
pub mod uploader;
