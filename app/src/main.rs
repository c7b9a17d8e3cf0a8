use bigboard::lifecycle::{ApplicationLifecycle, TokenAction};
use bigboard::logger;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Terminal host for the BigBoard application shell
#[derive(Debug, Parser)]
#[command(name = "bigboard", version, about)]
struct Args {
    /// Configuration file (defaults to an optional config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store this credential once startup has finished
    #[arg(long, conflicts_with = "logout")]
    token: Option<String>,

    /// Remove the stored credential once startup has finished
    #[arg(long)]
    logout: bool,
}

impl Args {
    fn token_action(&self) -> TokenAction {
        match (&self.token, self.logout) {
            (Some(token), _) => TokenAction::Set(token.clone()),
            (None, true) => TokenAction::Clear,
            (None, false) => TokenAction::Keep,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match ApplicationLifecycle::load_configuration(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::setup_logger(config.logging()) {
        eprintln!("Failed to initialize logger: {e}");
    }

    if let Err(e) = ApplicationLifecycle::validate_configuration(config) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let app = match ApplicationLifecycle::build(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to assemble application: {e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C, shutting down: {e}");
        }
    };

    let mut stdout = std::io::stdout();
    match app.run(args.token_action(), &mut stdout, shutdown).await {
        Ok(()) => {
            log::info!("BigBoard terminated");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
