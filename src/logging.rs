use tracing_subscriber::EnvFilter;

/// ログ初期化（RUST_LOG があればそれを優先）
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "warn,acta_uploader=debug,acta_common=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 2回目以降の初期化は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
