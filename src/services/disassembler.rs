//! Disassembly provider
//!
//! Runs the interpreter on a snapshot of the source buffer and returns the
//! listing it prints. Every failure collapses into a sentinel string; nothing
//! escapes this module as an error and no call waits longer than the timeout.

use crate::config::PythonConfig;
use crate::model::sentinel::Sentinel;
use crate::services::toolchain;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// The helper script shipped with the binary
pub const BUNDLED_HELPER: &str = include_str!("helper/disassemble.py");

/// How often a running disassembler is polled for completion
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Minimum time allowed to drain the pipes of a process that already exited
const PIPE_GRACE: Duration = Duration::from_millis(100);

/// Where the helper script comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelperSource {
    /// Contents written to a scratch file before each run
    Inline(String),
    /// A script on disk, used in place
    File(PathBuf),
}

/// Result of running the disassembler once
#[derive(Debug)]
enum RunOutcome {
    /// Process finished without writing to stderr
    Success(String),
    /// Process wrote to stderr (fatal regardless of exit status)
    Stderr(String),
    /// Process was still running when the timeout expired
    TimedOut,
    /// Process could not be started
    LaunchFailed(io::Error),
}

/// Produces disassembly text for a source buffer
#[derive(Debug, Clone)]
pub struct DisassemblyProvider {
    timeout: Duration,
    helper: HelperSource,
}

impl DisassemblyProvider {
    /// Create a provider from the interpreter settings
    pub fn new(config: &PythonConfig) -> Self {
        let helper = match &config.helper_script {
            Some(path) => HelperSource::File(path.clone()),
            None => HelperSource::Inline(BUNDLED_HELPER.to_string()),
        };
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            helper,
        }
    }

    /// Override the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use `script` as the helper instead of the configured one
    pub fn with_helper_source(mut self, script: impl Into<String>) -> Self {
        self.helper = HelperSource::Inline(script.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Disassemble `source_text` with the interpreter at `toolchain`.
    ///
    /// Returns the listing verbatim, or one of the sentinel strings.
    pub fn produce(&self, source_text: &str, toolchain: Option<&Path>) -> String {
        let Some(toolchain) = toolchain else {
            return Sentinel::NoToolchain.to_text();
        };

        let scratch = match ScratchFiles::create(source_text, &self.helper) {
            Ok(scratch) => scratch,
            Err(e) => {
                tracing::warn!("Failed to create scratch files for disassembly: {}", e);
                return Sentinel::CompilationError.to_text();
            }
        };

        self.execute(toolchain, scratch.helper_path(), scratch.source_path())
            .unwrap_or_else(|| Sentinel::CompilationError.to_text())
        // `scratch` is dropped here, removing both files
    }

    /// Run `<interpreter> <helper> <target>` and return its stdout, or `None`
    /// on any failure.
    pub fn execute(&self, toolchain: &Path, helper: &Path, target: &Path) -> Option<String> {
        let Some(interpreter) = toolchain::interpreter_executable(toolchain) else {
            tracing::warn!("Malformed toolchain path: {}", toolchain.display());
            return None;
        };

        match self.run(&interpreter, helper, target) {
            RunOutcome::Success(output) => Some(output),
            RunOutcome::Stderr(stderr) => {
                tracing::debug!(
                    "Disassembler wrote to stderr: {}",
                    stderr.lines().last().unwrap_or_default()
                );
                None
            }
            RunOutcome::TimedOut => {
                tracing::warn!(
                    "Disassembler '{}' timed out after {}ms",
                    interpreter.display(),
                    self.timeout.as_millis()
                );
                None
            }
            RunOutcome::LaunchFailed(e) => {
                tracing::warn!("Failed to run '{}': {}", interpreter.display(), e);
                None
            }
        }
    }

    fn run(&self, interpreter: &Path, helper: &Path, target: &Path) -> RunOutcome {
        let start = Instant::now();

        let mut child = match Command::new(interpreter)
            .arg(helper)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => return RunOutcome::LaunchFailed(e),
        };

        // Drain both pipes off-thread so a chatty child never blocks on a full pipe
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    tracing::debug!("Disassembler exited with {}", status);
                    break;
                }
                Ok(None) => {
                    if start.elapsed() > self.timeout {
                        kill(&mut child);
                        return RunOutcome::TimedOut;
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    kill(&mut child);
                    return RunOutcome::LaunchFailed(e);
                }
            }
        }

        // A grandchild may still hold the pipes open; never wait past the deadline
        let deadline = start + self.timeout;
        let Some(stderr) = collect(stderr, deadline) else {
            return RunOutcome::TimedOut;
        };
        if !stderr.is_empty() {
            return RunOutcome::Stderr(String::from_utf8_lossy(&stderr).into_owned());
        }
        let Some(stdout) = collect(stdout, deadline) else {
            return RunOutcome::TimedOut;
        };
        RunOutcome::Success(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        // A read error just truncates what we captured
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a pipe to reach EOF. `None` if it is still open at the deadline,
/// in which case whatever was captured is incomplete.
fn collect(reader: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<Vec<u8>> {
    let Some(reader) = reader else {
        return Some(Vec::new());
    };
    let remaining = deadline
        .saturating_duration_since(Instant::now())
        .max(PIPE_GRACE);
    reader.recv_timeout(remaining).ok()
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    // Reap it so no zombie is left behind
    let _ = child.wait();
}

/// Scratch directory holding the source snapshot and the helper script.
///
/// Removed when dropped, on every return path.
struct ScratchFiles {
    _dir: TempDir,
    source: PathBuf,
    helper: PathBuf,
}

impl ScratchFiles {
    fn create(source_text: &str, helper: &HelperSource) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("bytesight-").tempdir()?;

        let source = dir.path().join("snapshot.py");
        write_file(&source, source_text)?;

        let helper = match helper {
            HelperSource::Inline(contents) => {
                let path = dir.path().join("disassemble_helper");
                write_file(&path, contents)?;
                path
            }
            HelperSource::File(path) => path.clone(),
        };

        Ok(Self {
            _dir: dir,
            source,
            helper,
        })
    }

    fn source_path(&self) -> &Path {
        &self.source
    }

    fn helper_path(&self) -> &Path {
        &self.helper
    }

    #[cfg(test)]
    fn dir_path(&self) -> &Path {
        self._dir.path()
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
