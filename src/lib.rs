// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive reporting
// flow.
//
// Module responsibilities:
// - `api`: Encapsulates the abuse-report client for the Facebook Graph
//   API (validation, endpoint construction, bounded retries) behind a
//   transport seam.
// - `audit`: The append-only audit log every submission outcome is
//   recorded in.
// - `ui`: Implements the terminal flow that collects the report fields
//   and delegates submission to `api`.
//
// Keeping this separation makes it possible to exercise the submission
// logic against a scripted transport without touching the network.
pub mod api;
pub mod audit;
pub mod ui;
