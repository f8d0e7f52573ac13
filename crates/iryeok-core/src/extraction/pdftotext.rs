use crate::error::IryeokError;
use crate::extraction::{EngineTag, PdfExtractor};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout -enc UTF-8` so that column alignment and the blank
/// lines between résumé sections survive extraction.
pub struct PdftotextExtractor {
    executable: PathBuf,
    timeout: Duration,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        Self::with_executable("pdftotext")
    }

    /// Use an alternate pdftotext binary (e.g. a bundled poppler build).
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        PdftotextExtractor {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if the configured pdftotext is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, IryeokError> {
        // Write PDF bytes to a temp file
        let mut tmpfile = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| IryeokError::Engine(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| IryeokError::Engine(e.to_string()))?;

        let mut command = Command::new(&self.executable);
        command
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-"); // output to stdout

        let output = run_with_timeout(&mut command, self.timeout)?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(IryeokError::PdftotextFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }

    fn engine(&self) -> EngineTag {
        EngineTag::Primary
    }
}

#[derive(Debug)]
struct CapturedOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Run a command to completion, killing it once `timeout` elapses.
///
/// Both pipes are drained on helper threads so a chatty child cannot block
/// on a full pipe while we poll for its exit.
fn run_with_timeout(command: &mut Command, timeout: Duration) -> Result<CapturedOutput, IryeokError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IryeokError::PdftotextNotFound
            } else {
                IryeokError::Engine(format!("pdftotext failed to start: {}", e))
            }
        })?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(IryeokError::PdftotextTimeout { timeout });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    Ok(CapturedOutput {
        status,
        stdout: stdout.map(collect).unwrap_or_default(),
        stderr: stderr.map(collect).unwrap_or_default(),
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: JoinHandle<Vec<u8>>) -> Vec<u8> {
    handle.join().unwrap_or_default()
}
