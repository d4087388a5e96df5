//! Invocation bridge: one event in, one PHP child process, one result out.
//!
//! The child writes its return value to `<tmp>/output.json`; the bridge owns
//! that path and clears it before every dispatch, so a stale result can never
//! leak into a new invocation. At most one invocation may be in flight per
//! process instance — the hosting environment guarantees this.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

const DEFAULT_TMP_DIRECTORY: &str = "/tmp/.bref";
const DEFAULT_HANDLER: &str = "bref.php";
const OUTPUT_FILE: &str = "output.json";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("PHP exited with status code {code}")]
    ChildFailed { code: i32 },

    #[error("Failed to spawn PHP: {0}")]
    Spawn(std::io::Error),

    #[error("Invalid JSON in the result file: {0}")]
    Result(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct Bridge {
    /// Interpreter spawned for every event.
    pub interpreter: String,
    /// Entry-point file passed to the interpreter.
    pub handler: PathBuf,
    /// Directory holding the side-channel result file.
    pub tmp_dir: PathBuf,
    /// Runtime binary directory prepended to the child's PATH.
    pub bin_dir: Option<PathBuf>,
}

impl Bridge {
    /// Production defaults from the Lambda environment: `LAMBDA_TASK_ROOT`
    /// for the install root, `PHP_HANDLER` for the entry point (default
    /// `bref.php`), `TMP_DIRECTORY` for the temp path (default `/tmp/.bref`).
    pub fn from_env() -> Self {
        let task_root =
            std::env::var("LAMBDA_TASK_ROOT").unwrap_or_else(|_| ".".to_string());
        let handler =
            std::env::var("PHP_HANDLER").unwrap_or_else(|_| DEFAULT_HANDLER.to_string());
        let tmp_dir = std::env::var("TMP_DIRECTORY")
            .unwrap_or_else(|_| DEFAULT_TMP_DIRECTORY.to_string());
        Self {
            interpreter: "php".to_string(),
            handler: Path::new(&task_root).join(handler),
            tmp_dir: PathBuf::from(tmp_dir),
            bin_dir: Some(Path::new(&task_root).join(".bref").join("bin")),
        }
    }

    /// Run one invocation to completion: reset, dispatch, stream, collect,
    /// resolve. A fresh invocation always starts a fresh child process.
    pub async fn invoke(&self, event: &Value) -> Result<Option<Value>, BridgeError> {
        self.reset()?;
        let code = self.dispatch(event).await?;
        if code != 0 {
            return Err(BridgeError::ChildFailed { code });
        }
        self.collect()
    }

    /// Delete any leftover result file; otherwise make sure the temp
    /// directory exists for the child to write into.
    fn reset(&self) -> Result<(), BridgeError> {
        let file = self.result_file();
        if file.exists() {
            std::fs::remove_file(&file)?;
        } else {
            std::fs::create_dir_all(&self.tmp_dir)?;
        }
        Ok(())
    }

    /// Spawn the child with the serialized event as its single argument and
    /// forward its output line-wise until both streams close: stdout goes to
    /// the host log unmodified, stderr with a `[STDERR]` prefix.
    async fn dispatch(&self, event: &Value) -> Result<i32, BridgeError> {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.handler)
            .arg(event.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref bin) = self.bin_dir {
            let path = std::env::var("PATH").unwrap_or_default();
            cmd.env("PATH", format!("{}:{}", bin.display(), path));
        }
        let mut child = cmd.spawn().map_err(BridgeError::Spawn)?;

        let mut stdout = child.stdout.take().map(|s| BufReader::new(s).lines());
        let mut stderr = child.stderr.take().map(|s| BufReader::new(s).lines());
        let mut stdout_done = stdout.is_none();
        let mut stderr_done = stderr.is_none();

        while !stdout_done || !stderr_done {
            tokio::select! {
                line = async {
                    match stdout.as_mut() {
                        Some(reader) => reader.next_line().await,
                        None => std::future::pending().await,
                    }
                }, if !stdout_done => {
                    match line {
                        Ok(Some(line)) => info!("{}", line),
                        Ok(None) => stdout_done = true,
                        Err(e) => {
                            warn!(error = %e, "Error reading child stdout");
                            stdout_done = true;
                        }
                    }
                }
                line = async {
                    match stderr.as_mut() {
                        Some(reader) => reader.next_line().await,
                        None => std::future::pending().await,
                    }
                }, if !stderr_done => {
                    match line {
                        Ok(Some(line)) => info!("[STDERR] {}", line),
                        Ok(None) => stderr_done = true,
                        Err(e) => {
                            warn!(error = %e, "Error reading child stderr");
                            stderr_done = true;
                        }
                    }
                }
            }
        }

        let status = child.wait().await?;
        Ok(status.code().unwrap_or(-1))
    }

    /// Read the side-channel result, if the child wrote one. A missing file
    /// is a valid null result, not an error.
    fn collect(&self) -> Result<Option<Value>, BridgeError> {
        let file = self.result_file();
        if !file.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&file)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn result_file(&self) -> PathBuf {
        self.tmp_dir.join(OUTPUT_FILE)
    }
}
