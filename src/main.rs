use clap::Parser;
use greeter::utils::validation::Validate;
use greeter::{Application, CliConfig, HelloGreeter, LogManager};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = CliConfig::parse();
    let log_config = config.log_config();

    if let Err(e) = log_config.validate() {
        eprintln!("Critical error during application startup: {}", e);
        return ExitCode::from(e.exit_code());
    }

    // Lives until main returns so the file sink is flushed on every exit path.
    let mut log_manager = LogManager::new(log_config);
    if let Err(e) = log_manager.initialize() {
        eprintln!("Critical error during application startup: {}", e);
        eprintln!("Unable to initialize logging system.");
        return ExitCode::from(e.exit_code());
    }
    let Some(dispatch) = log_manager.dispatch().cloned() else {
        eprintln!("Critical error during application startup: logging dispatch missing");
        return ExitCode::from(1);
    };

    tracing::dispatcher::with_default(&dispatch, || {
        match serde_json::to_string(&config) {
            Ok(args) => tracing::debug!("Command line arguments: {}", args),
            Err(e) => tracing::debug!("Command line arguments unavailable: {}", e),
        }
        let settings = log_manager.config();
        tracing::debug!(
            "Log directory: {} (retention: {} days)",
            settings.log_directory.display(),
            settings.retention_days
        );
    });

    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No handler could be installed; never report an interruption.
            std::future::pending::<()>().await;
        }
    };

    let mut app = Application::new(HelloGreeter::default(), dispatch);
    let outcome = app
        .run(interrupt, &mut std::io::stdout(), &mut std::io::stderr())
        .await;

    ExitCode::from(outcome.exit_code())
}
