//! Submit command - send a build for store review

use crate::cli::style::{Stylize, check, spinner_style, warning};
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::time::Duration;
use store_review::client::ConnectClient;
use store_review::error::Result;
use store_review::inspect::NoopInspector;
use store_review::submit::{Reporter, SubmitForReview};
use store_review::types::SubmitOptions;

/// CLI reporter backed by a spinner.
///
/// Status messages become the spinner label; successes and warnings are
/// printed above it so they survive the spinner clearing.
struct CliReporter {
    spinner: ProgressBar,
}

impl CliReporter {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[async_trait]
impl Reporter for CliReporter {
    async fn info(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    async fn warn(&self, message: &str) {
        self.spinner
            .println(format!("{} {}", warning(), message.warn()));
    }

    async fn success(&self, message: &str) {
        self.spinner
            .println(format!("{} {}", check(), message.success()));
    }
}

/// Run the submit command
pub async fn run_submit(
    options: SubmitOptions,
    token: String,
    api_base: Option<String>,
    poll_interval_secs: u64,
) -> Result<()> {
    let client = match api_base {
        Some(base) => ConnectClient::with_base_url(token, base),
        None => ConnectClient::new(token),
    };

    let reporter = CliReporter::new();

    let result = SubmitForReview::new(&client, &NoopInspector, &reporter)
        .with_poll_interval(Duration::from_secs(poll_interval_secs))
        .submit(&options)
        .await;

    reporter.finish();
    result
}
