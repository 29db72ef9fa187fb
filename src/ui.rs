// UI layer: the interactive reporting flow, prompts driven by `dialoguer`.
// Collects the four report fields, echoes them back and hands them to the
// API client.

use crate::api::{Outcome, ReportClient, ReportRequest, Transport};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;

const BANNER: &str = r#"
 _____  ____    ____   _____  ____    ___   ____   _____
|  ___|| __ )   |  _ \ | ____||  _ \  / _ \ |  _ \ |_   _|
| |_   |  _ \   | |_) ||  _|  | |_) || | | || |_) |  | |
|  _|  | |_) |  |  _ < | |___ |  __/ | |_| ||  _ <   | |
|_|    |____/   |_| \_\|_____||_|     \___/ |_| \_\  |_|
"#;

/// Run the reporting flow start to finish: banner, prompts, echo,
/// submission, final status. Returns the outcome so `main` can map it to
/// an exit code.
pub fn run<T: Transport>(client: ReportClient<T>) -> Result<Outcome> {
    print_banner();

    let report = collect_report()?;
    echo_report(&report);

    // Spinner while the submission is handed off.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Submitting report...");
    thread::sleep(Duration::from_millis(300));
    spinner.finish_and_clear();

    let outcome = client.submit(&report);
    match outcome {
        Outcome::Success => println!("{}", "Report filed.".green()),
        Outcome::ValidationFailed => {
            println!("{}", "Report not sent: missing required fields.".red())
        }
        Outcome::RequestFailed => println!("{}", "Report could not be filed.".red()),
    }
    Ok(outcome)
}

/// Decorative start-up banner.
fn print_banner() {
    println!("{}", BANNER.red());
}

/// Prompt for the four report fields in order. Empty strings are accepted
/// here; required-field checks belong to the client. The token prompt
/// hides what is typed.
fn collect_report() -> Result<ReportRequest> {
    let account_id: String = Input::new()
        .with_prompt("Facebook account ID to report")
        .allow_empty(true)
        .interact_text()?;
    let access_token: String = Password::new()
        .with_prompt("Facebook Graph API access token")
        .allow_empty_password(true)
        .interact()?;
    let reason: String = Input::new()
        .with_prompt("Reason for reporting")
        .allow_empty(true)
        .interact_text()?;
    let category: String = Input::new()
        .with_prompt("Category for reporting")
        .allow_empty(true)
        .interact_text()?;
    Ok(ReportRequest {
        account_id,
        access_token,
        reason,
        category,
    })
}

/// Echo the collected values back before sending. The token is a
/// credential and would otherwise land in terminal scrollback, so it is
/// shown redacted.
fn echo_report(report: &ReportRequest) {
    println!(
        "Reporting account {} with access token {}.",
        report.account_id,
        redact(&report.access_token)
    );
    println!("Reason: {}", report.reason);
    println!("Category: {}", report.category);
}

/// Redacted rendering of a secret: everything but the last four characters
/// masked.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        "*".repeat(chars.len())
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_masks_all_of_a_short_secret() {
        assert_eq!(redact("abcd"), "****");
        assert_eq!(redact(""), "");
    }

    #[test]
    fn it_keeps_the_last_four_characters_of_a_long_secret() {
        assert_eq!(redact("EAABsbCS1iHg"), "********1iHg");
    }
}
