use acta_uploader::client::{HttpClient, DEFAULT_ARCHIVE_NAME};
use acta_uploader::report::RunReport;
use acta_uploader::terminal::TerminalView;
use acta_uploader::uploader::Uploader;
use acta_uploader::{cli, config, error, logging, scanner};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{Result, UploaderError};
use std::io::IsTerminal;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Upload { paths, batch_size, recursive, output, download, no_prompt } => {
            println!("📤 acta-upload - Carga de actas\n");

            let batch_size = batch_size.unwrap_or(config.batch_size);
            let client = HttpClient::from_config(&config, cli.server.as_deref())?;
            let server = client.base_url().to_string();

            // 1. ファイル収集
            println!("[1/3] Buscando archivos...");
            let candidates = scanner::collect_candidates(&paths, recursive)?;
            println!("✔ {} archivo(s) encontrados\n", candidates.len());

            // 2. ロット送信
            println!("[2/3] Enviando a {} (lotes de {})...\n", server, batch_size);
            let mut uploader = Uploader::new(client, batch_size);
            let mut view = TerminalView::new(cli.verbose);
            let summary = uploader.run(candidates, &mut view).await?;

            if !summary.failed_batches.is_empty() {
                println!("⚠ {} lote(s) con error", summary.failed_batches.len());
            }

            // 3. レポート・ダウンロード
            println!("\n[3/3] Finalizando...");
            if let Some(output) = output {
                RunReport::new(&summary, &server).write(&output)?;
                println!("✔ Reporte guardado: {}", output.display());
            }

            let target = match download {
                Some(path) => Some(path),
                None if summary.state.cumulative_success > 0
                    && !no_prompt
                    && std::io::stdin().is_terminal() =>
                {
                    confirm_download()?
                }
                None => None,
            };

            if let Some(dest) = target {
                let bytes = uploader.submitter().download_results(&dest).await?;
                println!("✔ ZIP descargado: {} ({} bytes)", dest.display(), bytes);
            }

            println!("\n✅ Completado");
        }

        Commands::Download { output } => {
            let client = HttpClient::from_config(&config, cli.server.as_deref())?;
            let dest = output.unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME));

            println!("📦 Descargando desde {}...", client.base_url());
            let bytes = client.download_results(&dest).await?;
            println!("✔ ZIP descargado: {} ({} bytes)", dest.display(), bytes);
        }

        Commands::Health => {
            let client = HttpClient::from_config(&config, cli.server.as_deref())?;
            let health = client.health().await?;
            if health.is_ok() {
                println!("✔ {} - {}", client.base_url(), health.message);
            } else {
                println!("⚠ {} - estado: {} {}", client.base_url(), health.status, health.message);
            }
        }

        Commands::Config { set_server, set_batch_size, show } => {
            let mut config = config;
            let changed = set_server.is_some() || set_batch_size.is_some();

            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ URL del servidor actualizada");
            }

            if let Some(size) = set_batch_size {
                config.set_batch_size(size)?;
                println!("✔ Tamaño de lote actualizado");
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("Configuración:");
                println!("  Servidor: {}", config.resolve_server_url(cli.server.as_deref())?);
                println!("  Tamaño de lote: {}", config.batch_size);
                println!("  Timeout: {} s", config.timeout_seconds);
                println!("  Archivo: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn confirm_download() -> Result<Option<PathBuf>> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt("¿Descargar el ZIP de actas procesadas?")
        .default(true)
        .interact()
        .map_err(|e| UploaderError::Prompt(e.to_string()))?;

    Ok(confirmed.then(|| PathBuf::from(DEFAULT_ARCHIVE_NAME)))
}
