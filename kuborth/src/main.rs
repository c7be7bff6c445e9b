use std::sync::mpsc::channel;

use clap::Parser;
use kuborth::app::settings::config_dirs::project_config_dir;
use kuborth::app::types::StartOptions;
use kuborth::runner::terminal::init_terminal;
use kuborth::runner::run_app;

/// Dual-panel orthodox browser for Kubernetes clusters.
#[derive(Parser, Debug)]
#[command(name = "kuborth", version, about)]
struct Cli {
    /// Path to a kubeconfig file. Defaults to the usual kubectl discovery order.
    #[arg(long)]
    kubeconfig: Option<String>,

    /// Context to start in. Defaults to the kubeconfig's current-context.
    #[arg(long)]
    context: Option<String>,

    /// Color theme to start with, overriding the saved setting.
    #[arg(long)]
    theme: Option<String>,

    /// Disable mouse capture, for terminals that render mouse events poorly.
    #[arg(long)]
    no_mouse: bool,
}

impl From<Cli> for StartOptions {
    fn from(cli: Cli) -> Self {
        StartOptions {
            kubeconfig: cli.kubeconfig,
            context: cli.context,
            theme: cli.theme,
            no_mouse: cli.no_mouse,
        }
    }
}

fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = project_config_dir().join("logs");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(&log_dir, "kuborth.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();
    kuborth::panic_hook::install_panic_hook();

    let (shutdown_tx, shutdown_rx) = channel::<()>();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })?;

    let terminal = init_terminal()?;
    let start_opts: StartOptions = cli.into();

    let result = run_app(terminal, shutdown_rx, start_opts);
    if let Err(e) = &result {
        tracing::error!(error = %e, "kuborth exited with an error");
    }
    result
}
