use crate::app::error::FormatError;
use crate::app::models::RuntimeConfig;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the external formatter on one file at a time.
///
/// The file path is always appended as the last argument, after `args`.
#[derive(Debug, Clone)]
pub struct Formatter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Formatter {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// `<formatter> -style=<style> -i <path>`
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(
            config.formatter.clone(),
            vec![format!("-style={}", config.style), "-i".to_string()],
            config.timeout,
        )
    }

    /// Formats `path` in place. Any output on stderr, a non-zero exit or the
    /// deadline passing is a failure; on timeout the child is killed first.
    pub fn format_file(&self, path: &Path) -> Result<(), FormatError> {
        log::debug!("{} {} {}", self.program, self.args.join(" "), path.display());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Both the exit and the pipes closing must happen before the deadline.
        let deadline = Instant::now() + self.timeout;

        let (tx, rx) = mpsc::channel();
        let mut pending = 0;
        if let Some(pipe) = child.stdout.take() {
            drain(pipe, Stream::Stdout, tx.clone());
            pending += 1;
        }
        if let Some(pipe) = child.stderr.take() {
            drain(pipe, Stream::Stderr, tx.clone());
            pending += 1;
        }
        drop(tx);

        let status = match wait_until(&mut child, path, deadline)? {
            Some(status) => status,
            None => {
                if let Err(e) = child.kill() {
                    log::warn!("Failed to kill formatter for {}: {}", path.display(), e);
                }
                if let Err(e) = child.wait() {
                    log::warn!("Failed to reap formatter for {}: {}", path.display(), e);
                }
                // The reader threads are left detached: a grandchild may still hold the pipes.
                return Err(self.timed_out(path));
            }
        };

        let mut out = Vec::new();
        let mut err = Vec::new();
        for _ in 0..pending {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((Stream::Stdout, bytes)) => out = bytes,
                Ok((Stream::Stderr, bytes)) => err = bytes,
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "Formatter for {} exited but its output is still held open",
                        path.display()
                    );
                    return Err(self.timed_out(path));
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let out = String::from_utf8_lossy(&out);
        if !out.trim().is_empty() {
            log::trace!("formatter stdout for {}: {}", path.display(), out.trim_end());
        }

        let err = String::from_utf8_lossy(&err).into_owned();
        if !err.is_empty() {
            return Err(FormatError::FormatterFailure {
                path: path.to_path_buf(),
                stderr: err,
            });
        }
        if !status.success() {
            return Err(FormatError::FormatterFailure {
                path: path.to_path_buf(),
                stderr: format!("formatter exited with {}", status),
            });
        }

        Ok(())
    }

    fn timed_out(&self, path: &Path) -> FormatError {
        FormatError::Timeout {
            path: path.to_path_buf(),
            timeout: self.timeout,
        }
    }
}

enum Stream {
    Stdout,
    Stderr,
}

/// Returns `None` once the deadline has passed with the child still running.
fn wait_until(
    child: &mut Child,
    path: &Path,
    deadline: Instant,
) -> Result<Option<ExitStatus>, FormatError> {
    loop {
        let polled = child.try_wait().map_err(|source| FormatError::Wait {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(status) = polled {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R, stream: Stream, tx: Sender<(Stream, Vec<u8>)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        // The receiver is gone once the run has timed out.
        let _ = tx.send((stream, buf));
    });
}
