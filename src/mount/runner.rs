//! External command execution
//!
//! Provisioning shells out to OS utilities. Going through [`CommandRunner`]
//! lets tests substitute a recorder instead of touching real devices.

use crate::error::{VaultenvError, VaultenvResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs a program to completion and returns its stdout
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`; a spawn failure or non-zero exit is an error
    async fn run(&self, program: &str, args: &[String]) -> VaultenvResult<Vec<u8>>;
}

/// Render a command line for logs and error messages
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs commands on the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> VaultenvResult<Vec<u8>> {
        let line = command_line(program, args);
        debug!("Executing: {}", line);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| VaultenvError::command_failed(line.clone(), e))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(VaultenvError::command_exec(line, stderr.trim()))
        }
    }
}
