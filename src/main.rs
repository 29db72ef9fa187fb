// Entrypoint for the CLI application.
// - Keeps `main` small: create an API client from the environment and hand
//   it to the reporting flow.
// - The submission outcome maps onto the process exit code so scripted
//   callers can branch on it.

use fbreport_cli::{api::ReportClient, ui};
use std::process;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Settings come from the environment where set, otherwise the built-in
    // defaults. See `api::Settings::from_env`.
    let client = ReportClient::from_env()?;

    let outcome = ui::run(client)?;
    process::exit(outcome.exit_code())
}
