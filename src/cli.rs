use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acta-upload")]
#[command(about = "Carga por lotes de actas PDF al servidor de procesamiento", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（結果の全文も表示）
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// サーバーURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// PDFをロットに分けて送信
    Upload {
        /// PDFファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 1リクエストあたりのファイル数（デフォルト: 設定値）
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 実行レポート（JSON）の出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 完了後に処理済みZIPをダウンロード
        #[arg(long)]
        download: Option<PathBuf>,

        /// ダウンロード確認を表示しない
        #[arg(long)]
        no_prompt: bool,
    },

    /// 処理済みアクタのZIPをダウンロード
    Download {
        /// 保存先（デフォルト: Actas_Procesadas_Organizadas.zip）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// サーバーの稼働確認
    Health,

    /// 設定を表示/編集
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// バッチサイズを設定
        #[arg(long)]
        set_batch_size: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
