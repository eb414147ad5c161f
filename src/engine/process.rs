//! Child process execution with a deadline and cancellation

use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::errors::ToolError;

/// Interval between child status polls
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Shared flag that cancels in-flight tool runs when raised
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear the flag so later runs proceed
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a finished tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Run `program` with `args`, killing it at `timeout` or on cancellation
///
/// Stdout is discarded; stderr is captured for diagnostics. A non-zero
/// exit is reported as [`ToolError::Failed`].
pub fn run_tool(
    program: &Path,
    args: &[OsString],
    timeout: Duration,
    cancel: &CancelFlag,
) -> Result<ToolOutput, ToolError> {
    let name = program.display().to_string();
    if cancel.is_cancelled() {
        return Err(ToolError::Cancelled { program: name });
    }
    debug!("Running {} {:?}", name, args);

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    // Own process group, so helpers forked by wrapper scripts die with the tool
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command
        .spawn()
        .map_err(|source| ToolError::Spawn { program: name.clone(), source })?;

    // Drain stderr on a helper thread so a chatty tool cannot block on a full pipe
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    });

    let started = Instant::now();
    let waited = wait_with_deadline(&mut child, &name, started, timeout, cancel);
    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();
    let status = waited?;
    let elapsed = started.elapsed();

    if !status.success() {
        warn!("{} failed with {:?}", name, status.code());
        return Err(ToolError::Failed { program: name, code: status.code(), stderr });
    }

    debug!("{} finished in {:?}", name, elapsed);
    Ok(ToolOutput { status, stderr, elapsed })
}

fn wait_with_deadline(
    child: &mut Child,
    name: &str,
    started: Instant,
    timeout: Duration,
    cancel: &CancelFlag,
) -> Result<ExitStatus, ToolError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {},
            Err(source) => {
                kill_and_reap(child, name);
                return Err(ToolError::Spawn { program: name.to_string(), source });
            },
        }

        if cancel.is_cancelled() {
            warn!("Cancelling {}", name);
            kill_and_reap(child, name);
            return Err(ToolError::Cancelled { program: name.to_string() });
        }

        if started.elapsed() >= timeout {
            warn!("{} exceeded its {:?} deadline", name, timeout);
            kill_and_reap(child, name);
            return Err(ToolError::TimedOut { program: name.to_string(), after: timeout });
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn kill_and_reap(child: &mut Child, name: &str) {
    #[cfg(unix)]
    kill_process_group(child, name);

    if let Err(e) = child.kill() {
        debug!("kill of {} failed: {}", name, e);
    }
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_process_group(child: &Child, name: &str) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: plain signal delivery to the group created for this child at spawn
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        debug!("kill of process group {} ({}) failed: {}", pgid, name, std::io::Error::last_os_error());
    }
}
