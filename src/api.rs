// API client module: a small blocking HTTP client for the Facebook Graph
// API abuse-report endpoint. Validates the collected fields, drives the
// bounded retry loop around a single form POST and records every outcome
// in the audit log.

use crate::audit::AuditLog;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::thread;
use std::time::Duration;

/// Graph API host the report is filed against.
pub const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com";

/// Graph API version segment of the endpoint path.
pub const API_VERSION: &str = "v12.0";

/// Default audit log path, relative to the working directory.
pub const LOG_FILE: &str = "facebook_report.log";

/// Pause between failed attempts. Fixed, no backoff.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(2);

/// Attempts per submission. Not configuration-driven.
pub const MAX_ATTEMPTS: u32 = 3;

/// Runtime settings for the client. Defaults mirror the constants above;
/// [`Settings::from_env`] lets each be overridden without a rebuild.
#[derive(Clone, Debug)]
pub struct Settings {
    pub base_url: String,
    pub api_version: String,
    pub log_file: String,
    pub retry_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: GRAPH_API_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            log_file: LOG_FILE.to_string(),
            retry_delay: RATE_LIMIT_DELAY,
        }
    }
}

impl Settings {
    /// Read settings from `GRAPH_API_BASE_URL`, `GRAPH_API_VERSION`,
    /// `REPORT_LOG_FILE` and `REPORT_RETRY_DELAY_SECS`, falling back to the
    /// defaults for anything unset. A delay that does not parse as whole
    /// seconds falls back too; a bad value must not abort the run.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let retry_delay = env::var("REPORT_RETRY_DELAY_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.retry_delay);
        Self {
            base_url: env::var("GRAPH_API_BASE_URL").unwrap_or(defaults.base_url),
            api_version: env::var("GRAPH_API_VERSION").unwrap_or(defaults.api_version),
            log_file: env::var("REPORT_LOG_FILE").unwrap_or(defaults.log_file),
            retry_delay,
        }
    }
}

/// One abuse report as collected from the user. The three serialized
/// fields form the POST body; the account id is addressed in the URL only.
#[derive(Debug, Serialize)]
pub struct ReportRequest {
    #[serde(skip)]
    pub account_id: String,
    pub access_token: String,
    pub reason: String,
    pub category: String,
}

/// Result of one submission, after validation and up to [`MAX_ATTEMPTS`]
/// POST attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The endpoint answered HTTP 200.
    Success,
    /// A required field was empty; no request was made.
    ValidationFailed,
    /// Every attempt failed with a transport error or a non-200 status.
    RequestFailed,
}

impl Outcome {
    /// Process exit code for this outcome, so scripted callers can branch
    /// on the result.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::RequestFailed => 1,
            Outcome::ValidationFailed => 2,
        }
    }
}

/// Failure below the HTTP layer: DNS, connect, TLS or timeout. A response
/// with a bad status is not a transport error, see [`FormReply`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),
}

/// Status and raw body of a completed POST.
#[derive(Clone, Debug)]
pub struct FormReply {
    pub status: u16,
    pub body: String,
}

/// Seam between the retry loop and the network. Production code goes
/// through [`HttpTransport`]; tests script replies without a network.
pub trait Transport {
    /// POST `report`'s body fields, form-encoded, to `url`.
    fn post_form(&self, url: &str, report: &ReportRequest) -> Result<FormReply, TransportError>;
}

/// [`Transport`] backed by a blocking reqwest client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the underlying HTTP client: 10 s to connect, 30 s per request.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, report: &ReportRequest) -> Result<FormReply, TransportError> {
        // `form` percent-encodes the values and sets
        // `Content-Type: application/x-www-form-urlencoded`.
        let resp = self
            .client
            .post(url)
            .form(report)
            .send()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        Ok(FormReply { status, body })
    }
}

/// Error envelope the Graph API wraps failures in. Only the message is
/// surfaced to the user.
#[derive(Debug, Deserialize)]
struct GraphError {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: String,
}

/// Readable description of a failed reply: the Graph error message when the
/// body carries one, otherwise the bare status code.
fn describe_failure(reply: &FormReply) -> String {
    match serde_json::from_str::<GraphError>(&reply.body) {
        Ok(graph) => format!("HTTP {}: {}", reply.status, graph.error.message),
        Err(_) => format!("HTTP {}", reply.status),
    }
}

/// Client that files abuse reports against the Graph API.
pub struct ReportClient<T = HttpTransport> {
    transport: T,
    settings: Settings,
    audit: AuditLog,
}

impl ReportClient<HttpTransport> {
    /// Create a client configured from the environment. See
    /// [`Settings::from_env`] for the recognized variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?, Settings::from_env()))
    }
}

impl<T: Transport> ReportClient<T> {
    /// Create a client over an explicit transport and settings.
    pub fn with_transport(transport: T, settings: Settings) -> Self {
        let audit = AuditLog::new(&settings.log_file);
        Self {
            transport,
            settings,
            audit,
        }
    }

    /// URL of the abuse-report endpoint for `account_id`.
    pub fn endpoint(&self, account_id: &str) -> String {
        format!(
            "{}/{}/{}/abuse_reports",
            self.settings.base_url, self.settings.api_version, account_id
        )
    }

    /// Submit one report: validate, then POST up to [`MAX_ATTEMPTS`] times,
    /// sleeping the configured delay between attempts (never after the
    /// last). Per-attempt status goes to the console and the audit log; the
    /// first HTTP 200 wins.
    pub fn submit(&self, report: &ReportRequest) -> Outcome {
        if report.account_id.is_empty() || report.access_token.is_empty() {
            eprintln!("Error: Both account ID and access token are required.");
            return Outcome::ValidationFailed;
        }

        let url = self.endpoint(&report.account_id);
        log::debug!("filing abuse report at {url}");

        for attempt in 1..=MAX_ATTEMPTS {
            match self.transport.post_form(&url, report) {
                Ok(reply) if reply.status == 200 => {
                    println!(
                        "Success! Account {} reported successfully.",
                        report.account_id
                    );
                    self.audit.append("Reported account successfully");
                    return Outcome::Success;
                }
                Ok(reply) => {
                    eprintln!("Failed to report. Response: {}", describe_failure(&reply));
                    self.audit.append("Failed to report account");
                }
                Err(err) => {
                    eprintln!("Request error: {err}");
                    self.audit.append("Request error");
                }
            }

            if attempt < MAX_ATTEMPTS {
                self.audit.append("Retrying...");
                thread::sleep(self.settings.retry_delay);
            }
        }

        Outcome::RequestFailed
    }
}
