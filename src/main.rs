use std::process::ExitCode;

pub mod config;
use config::app_config::load_config;
pub mod console;
use console::Console;
pub mod error;
pub mod http_probe;
pub mod pipeline;
use pipeline::Supervisor;

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl+C"),
        _ = terminate => log::info!("Received SIGTERM"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Using config file {}", app_config.config_file.display());
    let settings = app_config.settings;

    let targets = settings.targets();
    let console = Console::for_targets(&targets);
    let supervisor = Supervisor::new(
        targets,
        settings.probe_options(),
        settings.log_filename.clone(),
        console,
    );

    match supervisor.run(shutdown_signal()).await {
        Ok(written) => {
            log::info!("Stopped after recording {written} observation(s)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Monitor stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
