use defgw::config::Config;
use defgw::output;
use defgw::routes::source;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("defgw: {:#}", e);
            return ExitCode::from(2);
        }
    };

    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(config.log_level).into())
                .from_env_lossy(),
        )
        .init();
    if let Some(path) = &config.config_path {
        tracing::info!("Loaded configuration from: {}", path.display());
    }
    tracing::debug!("Configuration: {:?}", config);

    let rendered = source::resolve(&config.source)
        .and_then(|lookup| output::render(&lookup, config.format, config.all));

    match rendered {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Gateway lookup failed: {}", e);
            eprintln!("defgw: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
