use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::RefineError;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exit status and lossily decoded standard output of a finished process.
#[derive(Debug)]
pub(crate) struct CapturedOutput {
	pub status: ExitStatus,
	pub stdout: String,
}

/// Run `command` to completion, capturing stdout, killing it once `timeout` elapses.
pub(crate) fn run_captured(
	mut command: Command,
	timeout: Duration,
) -> Result<CapturedOutput, RefineError> {
	let program = command.get_program().to_string_lossy().into_owned();
	command
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::null());

	let deadline = Instant::now() + timeout;
	let mut child = command
		.spawn()
		.map_err(|source| RefineError::Spawn { program, source })?;

	let Some(mut stdout) = child.stdout.take() else {
		kill(&mut child);
		return Err(RefineError::Empty);
	};

	// Reading happens on a helper thread so the deadline also covers a child
	// that never closes its stdout.
	let (tx, rx) = mpsc::channel();
	thread::spawn(move || {
		let mut buffer = Vec::new();
		let read = stdout.read_to_end(&mut buffer).map(|_| buffer);
		let _ = tx.send(read);
	});

	let bytes = match rx.recv_timeout(timeout) {
		Ok(Ok(bytes)) => bytes,
		Ok(Err(source)) => {
			kill(&mut child);
			return Err(RefineError::Io(source));
		}
		Err(RecvTimeoutError::Timeout) => {
			kill(&mut child);
			return Err(RefineError::Timeout(timeout));
		}
		Err(RecvTimeoutError::Disconnected) => {
			kill(&mut child);
			return Err(RefineError::Empty);
		}
	};

	let status = wait_until(&mut child, deadline).ok_or(RefineError::Timeout(timeout))??;
	Ok(CapturedOutput {
		status,
		stdout: String::from_utf8_lossy(&bytes).into_owned(),
	})
}

/// Poll for exit until `deadline`. `None` means the child was killed.
fn wait_until(child: &mut Child, deadline: Instant) -> Option<std::io::Result<ExitStatus>> {
	loop {
		match child.try_wait() {
			Ok(Some(status)) => return Some(Ok(status)),
			Ok(None) if Instant::now() >= deadline => {
				kill(child);
				return None;
			}
			Ok(None) => thread::sleep(EXIT_POLL_INTERVAL),
			Err(err) => return Some(Err(err)),
		}
	}
}

fn kill(child: &mut Child) {
	let _ = child.kill();
	let _ = child.wait();
}
