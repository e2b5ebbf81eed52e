use clap::Parser;
use service_adapter::utils::{logger, validation::Validate};
use service_adapter::{AdapterConfig, Cli, CommandLineHandler, TemplateAdapter};

fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Loading configuration from {}", cli.config.display());
    let config = match AdapterConfig::from_file(&cli.config).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config '{}': {}", cli.config.display(), e);
            println!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    let adapter = TemplateAdapter::new(config);
    let handler = CommandLineHandler::new()
        .with_manifest_generator(&adapter)
        .with_binder(&adapter);

    match handler.handle(&cli.invocation) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            // the orchestrator relays stdout to the operator on failure
            println!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
