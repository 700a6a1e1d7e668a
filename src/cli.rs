use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::WizardSettings;
use crate::types::ProviderId;

/// storagewiz - configure a third-party cloud storage destination
#[derive(Parser, Debug)]
#[command(name = "storagewiz")]
#[command(about = "A terminal wizard for configuring AWS / Google Cloud storage destinations")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON); missing keys use defaults
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Artificial latency of the mock validation backend, in milliseconds
    #[arg(long, global = true)]
    pub remote_delay_ms: Option<u64>,

    /// Deadline for remote validation, in milliseconds
    #[arg(long, global = true)]
    pub remote_timeout_ms: Option<u64>,

    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive wizard (default)
    Wizard,
    /// Validate form values from a JSON file and print the destination
    Check {
        /// JSON file with provider, bucket, path, region, key and secret
        values: PathBuf,
    },
    /// Print the provider catalog's field descriptors as JSON
    Providers {
        /// Only this provider
        #[arg(short, long)]
        provider: Option<ProviderId>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Apply command-line overrides on top of file settings.
    pub fn apply_overrides(&self, settings: &mut WizardSettings) {
        if let Some(delay) = self.remote_delay_ms {
            settings.remote_delay_ms = delay;
        }
        if let Some(timeout) = self.remote_timeout_ms {
            settings.remote_timeout_ms = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to TUI mode)
        let cli = Cli::try_parse_from(["storagewiz"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_check_command() {
        let cli = Cli::try_parse_from(["storagewiz", "check", "values.json"]).unwrap();
        match cli.command {
            Some(Commands::Check { values }) => assert_eq!(values, PathBuf::from("values.json")),
            other => panic!("Expected Check command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_providers_filter() {
        let cli = Cli::try_parse_from(["storagewiz", "providers", "--provider", "gcp"]).unwrap();
        match cli.command {
            Some(Commands::Providers { provider }) => assert_eq!(provider, Some(ProviderId::Gcp)),
            other => panic!("Expected Providers command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["storagewiz", "providers", "--provider", "azure"]).is_err());
    }

    #[test]
    fn test_global_overrides_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "storagewiz",
            "check",
            "v.json",
            "--remote-timeout-ms",
            "900",
        ])
        .unwrap();
        let mut settings = WizardSettings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.remote_timeout_ms, 900);
        assert_eq!(settings.remote_delay_ms, 450);
    }
}
