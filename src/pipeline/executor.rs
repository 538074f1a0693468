use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use super::{JobId, PipelineEvent};

#[derive(Debug, Error)]
pub enum ExecutorError {
	#[error("A search is already running.")]
	Busy,
	#[error("failed to start search worker: {0}")]
	Spawn(#[from] io::Error),
}

/// Runs at most one background job at a time.
///
/// Each accepted job gets its own worker thread. The slot stays taken until
/// the job returns or unwinds, at which point [`PipelineEvent::Finished`] is
/// sent for it.
pub struct SingleSlotExecutor {
	busy: Arc<AtomicBool>,
	next_job: u64,
	events_tx: Sender<PipelineEvent>,
	events_rx: Receiver<PipelineEvent>,
}

impl Default for SingleSlotExecutor {
	fn default() -> Self {
		Self::new()
	}
}

impl SingleSlotExecutor {
	#[must_use]
	pub fn new() -> Self {
		let (events_tx, events_rx) = mpsc::channel();
		Self {
			busy: Arc::new(AtomicBool::new(false)),
			next_job: 0,
			events_tx,
			events_rx,
		}
	}

	#[must_use]
	pub fn is_busy(&self) -> bool {
		self.busy.load(Ordering::Acquire)
	}

	/// Start `task` on a fresh worker thread unless a job is already running.
	pub fn try_submit<F>(&mut self, task: F) -> Result<JobId, ExecutorError>
	where
		F: FnOnce(JobId, &Sender<PipelineEvent>) + Send + 'static,
	{
		if self
			.busy
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			return Err(ExecutorError::Busy);
		}

		self.next_job = self.next_job.wrapping_add(1);
		let job = JobId(self.next_job);
		let guard = SlotGuard {
			job,
			busy: Arc::clone(&self.busy),
			events: self.events_tx.clone(),
		};

		thread::Builder::new()
			.name(format!("brainlink-search-{}", job.0))
			.spawn(move || {
				let guard = guard;
				task(job, &guard.events);
			})?;
		Ok(job)
	}

	pub fn try_recv(&self) -> Result<PipelineEvent, TryRecvError> {
		self.events_rx.try_recv()
	}

	pub fn recv_timeout(&self, timeout: Duration) -> Result<PipelineEvent, RecvTimeoutError> {
		self.events_rx.recv_timeout(timeout)
	}
}

/// Releases the slot and reports completion however the job ends.
struct SlotGuard {
	job: JobId,
	busy: Arc<AtomicBool>,
	events: Sender<PipelineEvent>,
}

impl Drop for SlotGuard {
	fn drop(&mut self) {
		self.busy.store(false, Ordering::Release);
		let _ = self.events.send(PipelineEvent::Finished { job: self.job });
	}
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	const WAIT: Duration = Duration::from_secs(5);

	fn wait_for_finish(executor: &SingleSlotExecutor, job: JobId) {
		loop {
			match executor.recv_timeout(WAIT).expect("executor event") {
				PipelineEvent::Finished { job: finished } if finished == job => return,
				_ => {}
			}
		}
	}

	#[test]
	fn second_submission_is_refused_while_busy() {
		let mut executor = SingleSlotExecutor::new();
		let (release_tx, release_rx) = mpsc::channel::<()>();

		let first = executor
			.try_submit(move |_, _| {
				let _ = release_rx.recv_timeout(WAIT);
			})
			.expect("first job accepted");
		assert!(executor.is_busy());
		assert!(matches!(
			executor.try_submit(|_, _| {}),
			Err(ExecutorError::Busy)
		));

		release_tx.send(()).unwrap();
		wait_for_finish(&executor, first);
		assert!(!executor.is_busy());

		let second = executor.try_submit(|_, _| {}).expect("slot free again");
		assert_ne!(first, second);
		wait_for_finish(&executor, second);
	}

	#[test]
	fn panicking_job_still_releases_the_slot() {
		let mut executor = SingleSlotExecutor::new();
		let job = executor
			.try_submit(|_, _| panic!("worker blew up"))
			.expect("accepted");
		wait_for_finish(&executor, job);
		assert!(!executor.is_busy());
	}

	#[test]
	fn job_events_arrive_before_finished() {
		let mut executor = SingleSlotExecutor::new();
		let job = executor
			.try_submit(|job, events| {
				let _ = events.send(PipelineEvent::Refined {
					job,
					original: "a".into(),
					refined: "b".into(),
				});
			})
			.expect("accepted");

		let first = executor.recv_timeout(WAIT).unwrap();
		assert!(matches!(first, PipelineEvent::Refined { .. }));
		let second = executor.recv_timeout(WAIT).unwrap();
		assert_eq!(second, PipelineEvent::Finished { job });
	}
}
