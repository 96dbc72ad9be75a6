use clap::Parser;
use gwvalidate::{
    cli::{run_cli, Cli},
    config::load_settings,
    observability::{init_logging, log_settings_info},
    GwValidateError, APP_NAME, VERSION,
};
use tracing::{debug, error};

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists; settings read the environment afterwards
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings);
    init_logging(&settings.observability)?;

    debug!(app_name = APP_NAME, version = VERSION, "starting");
    log_settings_info(&settings);

    match run_cli(&cli, &settings) {
        Ok(()) => Ok(()),
        Err(e @ GwValidateError::Validation { .. }) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
        Err(e) => {
            error!(error = %e, "check aborted");
            let code = e.exit_code();
            eprintln!("{:#}", anyhow::Error::from(e));
            std::process::exit(code);
        }
    }
}
