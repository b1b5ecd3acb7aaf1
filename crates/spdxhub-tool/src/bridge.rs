//! The toolchain process bridge.
//!
//! One child process per request; no retries, no timeout, no shared mutable
//! state. The availability probe (java binary runs, jar exists) executes at
//! most once per process, behind a `OnceCell` so concurrent first requests
//! cannot race it.

use crate::format::ConversionKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::OnceCell;

/// Toolchain failure taxonomy.
///
/// `Reported` is the toolchain rejecting the document(s) - a terminal
/// per-request outcome whose message is recorded verbatim. The other
/// variants are infrastructure failures.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The toolchain ran and rejected the input; message is its diagnostic.
    #[error("{message}")]
    Reported { message: String },

    /// The toolchain cannot be started at all.
    #[error("SPDX toolchain unavailable: {reason}")]
    Unavailable { reason: String },

    /// Spawn or pipe failure while driving the child process.
    #[error("Toolchain I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// True for outcomes that should be recorded as the request's result
    /// rather than surfaced as a server error.
    pub fn is_reported(&self) -> bool {
        matches!(self, ToolError::Reported { .. })
    }
}

/// Validate that a configured executable path contains no shell-hostile
/// characters. Arguments never pass through a shell, but a configured
/// binary path with metacharacters is a misconfiguration worth rejecting.
fn validate_executable_path(path: &str) -> Result<(), ToolError> {
    let dangerous = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous.contains(&c)) {
        return Err(ToolError::Unavailable {
            reason: format!("java path contains invalid characters: {}", path),
        });
    }
    Ok(())
}

/// Handle on the external SPDX toolchain.
pub struct SpdxToolchain {
    java_path: String,
    jar_path: PathBuf,
    probe: OnceCell<()>,
}

impl SpdxToolchain {
    pub fn new(java_path: impl Into<String>, jar_path: impl Into<PathBuf>) -> Self {
        SpdxToolchain {
            java_path: java_path.into(),
            jar_path: jar_path.into(),
            probe: OnceCell::const_new(),
        }
    }

    pub fn jar_path(&self) -> &Path {
        &self.jar_path
    }

    /// Whether the availability probe has already succeeded.
    pub fn is_ready(&self) -> bool {
        self.probe.initialized()
    }

    /// Probe toolchain availability, at most once per process.
    ///
    /// A failed probe is not cached: the next request retries, so an
    /// operator can drop the jar in place without restarting the service.
    pub async fn ensure_available(&self) -> Result<(), ToolError> {
        self.probe
            .get_or_try_init(|| async {
                validate_executable_path(&self.java_path)?;

                if !tokio::fs::try_exists(&self.jar_path).await.unwrap_or(false) {
                    return Err(ToolError::Unavailable {
                        reason: format!("tool jar not found at {}", self.jar_path.display()),
                    });
                }

                let probe = Command::new(&self.java_path)
                    .arg("-version")
                    .output()
                    .await
                    .map_err(|e| ToolError::Unavailable {
                        reason: format!("failed to run {}: {}", self.java_path, e),
                    })?;

                if !probe.status.success() {
                    return Err(ToolError::Unavailable {
                        reason: format!("{} -version exited with {}", self.java_path, probe.status),
                    });
                }

                tracing::info!(
                    java = %self.java_path,
                    jar = %self.jar_path.display(),
                    "SPDX toolchain available"
                );
                Ok(())
            })
            .await
            .map(|_| ())
    }

    /// Run one toolchain entry point with file-path arguments.
    async fn run(&self, entry_point: &str, args: &[&Path]) -> Result<(), ToolError> {
        self.ensure_available().await?;

        let start = std::time::Instant::now();

        let output = Command::new(&self.java_path)
            .arg("-jar")
            .arg(&self.jar_path)
            .arg(entry_point)
            .args(args)
            .output()
            .await?;

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        if output.status.success() {
            tracing::info!(entry_point, duration_ms, "Toolchain invocation succeeded");
            return Ok(());
        }

        let message = diagnostic_from_output(&output, entry_point);
        tracing::debug!(entry_point, duration_ms, %message, "Toolchain rejected input");
        Err(ToolError::Reported { message })
    }

    /// Verify a document. The entry point auto-detects the serialization.
    pub async fn verify(&self, document: &Path) -> Result<(), ToolError> {
        self.run("Verify", &[document]).await
    }

    /// Convert a document between serializations.
    pub async fn convert(
        &self,
        kind: ConversionKind,
        input: &Path,
        output: &Path,
    ) -> Result<(), ToolError> {
        self.run(kind.entry_point(), &[input, output]).await
    }

    /// Compare documents, writing a spreadsheet report to `report`.
    pub async fn compare(&self, report: &Path, documents: &[&Path]) -> Result<(), ToolError> {
        let mut args: Vec<&Path> = Vec::with_capacity(documents.len() + 1);
        args.push(report);
        args.extend_from_slice(documents);
        self.run("CompareMultipleSpdxDocs", &args).await
    }
}

/// The toolchain writes its diagnostics to stderr, occasionally to stdout.
fn diagnostic_from_output(output: &std::process::Output, entry_point: &str) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    format!("{} exited with {}", entry_point, output.status)
}
