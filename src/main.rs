//! store-review - submit App Store builds for review
//!
//! CLI binary wrapping the submission workflow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use store_review::types::{SubmissionInformation, SubmitOptions};

mod cli;

/// Environment variable consulted when `--token` is not given
const TOKEN_ENV: &str = "APP_STORE_CONNECT_TOKEN";

#[derive(Parser)]
#[command(name = "store-review")]
#[command(about = "Submit App Store builds for review")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a build of an app for review
    Submit {
        /// App Store Connect app identifier
        #[arg(long)]
        app_id: String,

        /// Platform to submit for (ios, osx, appletvos)
        #[arg(long, default_value = "ios")]
        platform: String,

        /// Build number to submit, or "latest" for the newest processed build
        #[arg(long)]
        build_number: Option<String>,

        /// Marketing version the build belongs to
        #[arg(long)]
        app_version: Option<String>,

        /// Local ipa file to derive version expectations from
        #[arg(long)]
        ipa: Option<PathBuf>,

        /// Local pkg file to derive version expectations from
        #[arg(long)]
        pkg: Option<PathBuf>,

        /// Whether the build uses non-exempt encryption (omit to leave undeclared)
        #[arg(long)]
        uses_encryption: Option<bool>,

        /// Whether the app uses the advertising identifier (omit to leave untouched)
        #[arg(long)]
        uses_idfa: Option<bool>,

        /// Whether the app contains third-party content (omit to leave untouched)
        #[arg(long)]
        third_party_content: Option<bool>,

        /// App Store Connect API bearer token (falls back to APP_STORE_CONNECT_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Override the API base URL (for testing)
        #[arg(long, hide = true)]
        api_base: Option<String>,

        /// Seconds between build processing checks
        #[arg(long, default_value_t = 15)]
        poll_interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            app_id,
            platform,
            build_number,
            app_version,
            ipa,
            pkg,
            uses_encryption,
            uses_idfa,
            third_party_content,
            token,
            api_base,
            poll_interval,
        } => {
            let token = token
                .or_else(|| env::var(TOKEN_ENV).ok())
                .with_context(|| format!("no API token given (--token or {TOKEN_ENV})"))?;

            let options = SubmitOptions {
                app_id,
                platform,
                build_number,
                app_version,
                ipa,
                pkg,
                submission_information: SubmissionInformation {
                    export_compliance_uses_encryption: uses_encryption,
                    add_id_info_uses_idfa: uses_idfa,
                    content_rights_contains_third_party_content: third_party_content,
                },
            };

            cli::run_submit(options, token, api_base, poll_interval).await?;
        }
    }

    Ok(())
}
