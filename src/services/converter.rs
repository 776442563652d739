use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::CompileError;
use crate::models::ConverterConfig;

/// An external picture converter: PNG in, `.s` hires table out
#[async_trait]
pub trait Converter: Send + Sync {
    /// Convert `input` into a picture labelled `label` at `output`.
    ///
    /// Returns the tool's combined stdout/stderr on success. A tool that
    /// exits cleanly but writes nothing is detected by the caller.
    async fn convert(&self, input: &Path, output: &Path, label: &str)
        -> Result<String, CompileError>;
}

/// PictConv (OSDK) driven as a subprocess
///
/// Runs `<path> <extra_args> -f6 -d0 -o4<label> <input> <output>`: hires
/// format, no dithering, assembler source output.
pub struct PictConv {
    program: PathBuf,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl PictConv {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
            timeout,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            program: config.path.clone(),
            extra_args: config.extra_args.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Full argument list for one conversion
    pub fn args(&self, input: &Path, output: &Path, label: &str) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.push("-f6".to_string());
        args.push("-d0".to_string());
        args.push(format!("-o4{label}"));
        args.push(input.display().to_string());
        args.push(output.display().to_string());
        args
    }
}

#[async_trait]
impl Converter for PictConv {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        label: &str,
    ) -> Result<String, CompileError> {
        let args = self.args(input, output, label);
        tracing::debug!(program = %self.program.display(), ?args, "Running converter");

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CompileError::ConverterFailed {
                exit_code: None,
                log: format!("failed to start {}: {e}", self.program.display()),
            })?;

        // Dropping the child on timeout kills it.
        let result = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Converter timed out");
                return Err(CompileError::ConverterFailed {
                    exit_code: None,
                    log: format!("timed out after {}s", self.timeout.as_secs()),
                });
            }
        };

        let mut log = String::from_utf8_lossy(&result.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&result.stderr));

        if !result.status.success() {
            return Err(CompileError::ConverterFailed {
                exit_code: result.status.code(),
                log,
            });
        }
        Ok(log)
    }
}
