use crate::adapter::handler::Invocation;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "service-adapter")]
#[command(about = "Generates BOSH manifests and bindings for an on-demand service")]
pub struct Cli {
    /// Path to the adapter's TOML configuration
    #[arg(long, env = "SERVICE_ADAPTER_CONFIG", default_value = "service-adapter.toml")]
    pub config: PathBuf,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub invocation: Invocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_manifest() {
        let cli = Cli::try_parse_from([
            "service-adapter",
            "--config",
            "/etc/adapter.toml",
            "generate-manifest",
            r#"{"deployment_name":"d"}"#,
            "{}",
            "{}",
            "",
            "null",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/adapter.toml"));
        assert!(cli.verbose);
        match cli.invocation {
            Invocation::GenerateManifest {
                previous_manifest,
                previous_plan,
                ..
            } => {
                assert!(previous_manifest.is_empty());
                assert_eq!(previous_plan, "null");
            }
            other => panic!("unexpected invocation: {other:?}"),
        }
    }

    #[test]
    fn test_create_binding_requires_all_arguments() {
        assert!(Cli::try_parse_from(["service-adapter", "create-binding", "b1", "{}"]).is_err());
    }
}
