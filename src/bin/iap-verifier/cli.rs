//! Command-line interface definition.

use std::{io::Read, path::PathBuf};

use clap::Parser;
use iap_verifier::domain::entities::invocation::InvocationInput;

/// Runs one in-app purchase verification task and prints the result as JSON.
///
/// Policy and credentials are read from the environment (IAP_CREDENTIAL_MODE,
/// IAP_PLAY_STORE_POST_VERIFICATION, IAP_TASK_ROUTING, ...).
#[derive(Parser, Debug)]
#[command(name = "iap-verifier")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Invocation JSON ({"taskName": ..., "taskData": ...}). Read from stdin
    /// when omitted.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Log level.
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "IAP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Cli {
    /// Reads and parses the invocation document.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or is not an invocation.
    pub fn read_invocation(&self) -> color_eyre::Result<InvocationInput> {
        let raw = match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut raw = String::new();
                std::io::stdin().read_to_string(&mut raw)?;
                raw
            }
        };
        Ok(serde_json::from_str(&raw)?)
    }
}
