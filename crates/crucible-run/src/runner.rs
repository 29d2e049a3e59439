//! Bounded-wait execution of compiled test binaries.

use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, RunError};
use crate::report::ExitOutcome;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output and classified outcome of one run.
#[derive(Debug)]
pub struct RunCapture {
    pub stdout: String,
    pub stderr: String,
    pub outcome: ExitOutcome,
}

/// Spawn `binary` with no arguments and wait up to `timeout` for it to
/// finish.
///
/// stdout and stderr are drained on background threads, so a chatty test
/// cannot fill a pipe and stall the wait. On timeout the process is killed;
/// the outcome is [`ExitOutcome::Timeout`] and whatever output was captured
/// before the kill is still returned.
pub fn run_binary(binary: &Path, timeout: Duration) -> Result<RunCapture> {
    let mut child = Command::new(binary)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunError::Spawn {
            binary: binary.to_path_buf(),
            source,
        })?;

    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let deadline = Instant::now() + timeout;
    let outcome = loop {
        match child.try_wait().map_err(RunError::Wait)? {
            Some(status) => break classify_exit(status),
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                break ExitOutcome::Timeout;
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    Ok(RunCapture {
        stdout: join_reader(stdout_reader),
        stderr: join_reader(stderr_reader),
        outcome,
    })
}

/// Classify how a process finished: zero exit is OK, the segmentation-fault
/// signal is distinguished, every other signal or code carries a raw number
/// (signals negated).
pub fn classify_exit(status: ExitStatus) -> ExitOutcome {
    if let Some(signal) = status.signal() {
        if signal == libc::SIGSEGV {
            return ExitOutcome::Segfault;
        }
        return ExitOutcome::Code(-signal);
    }
    match status.code() {
        Some(0) | None => ExitOutcome::Ok,
        Some(code) => ExitOutcome::Code(code),
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(reader: Option<thread::JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
