//! The worker thread: start-up handshake, then the paced tick loop.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	panic::{catch_unwind,AssertUnwindSafe},
	sync::{Arc,atomic::Ordering},
	thread::{JoinHandle,ThreadId},
	time::{Duration,Instant},
};
use crossbeam::channel::{Receiver,Sender};
use crate::{
	config::{TickFn,ThreadStartFn},
	coordinator::{ThreadKind,shared::Shared},
	macros::{debug2,info2,error2,panic_message},
};

//---------------------------------------------------------------------------------------------------- Worker
/// Everything a worker thread is spawned with.
pub(crate) struct Worker {
	pub(crate) kind: ThreadKind,
	pub(crate) shared: Arc<Shared>,
	pub(crate) thread_start: Option<ThreadStartFn>,
	/// Our `ThreadId`, sent to `initialize()` once we are up.
	pub(crate) ready: Sender<ThreadId>,
	/// The start gate.
	///
	/// `initialize()` sends one message per worker once every worker
	/// reported ready, or drops the sender to roll back.
	pub(crate) start: Receiver<()>,
}

impl Worker {
	//---------------------------------------------------------------------------------------------------- Spawn
	#[cold]
	#[inline(never)]
	/// Spawn the OS thread, named after the worker's [`ThreadKind`].
	pub(crate) fn spawn(self) -> Result<JoinHandle<()>, std::io::Error> {
		std::thread::Builder::new()
			.name(self.kind.as_ref().into())
			.spawn(move || self.main())
	}

	#[cold]
	#[inline(never)]
	fn main(self) {
		let Self { kind, shared, thread_start, ready, start } = self;

		if let Some(f) = thread_start {
			f(kind);
		}

		// `initialize()` may have already given up on us,
		// in which case nobody is listening, just exit.
		let id = std::thread::current().id();
		debug2!("{kind} - ready ({id:?}), waiting on others...");
		if ready.send(id).is_err() {
			debug2!("{kind} - initialization abandoned, exiting");
			return;
		}
		drop(ready);

		// A disconnect means initialization rolled back.
		if start.recv().is_err() {
			debug2!("{kind} - initialization rolled back, exiting");
			return;
		}
		drop(start);

		info2!("{kind} - main loop started");
		tick_loop(kind, &shared);
		info2!("{kind} - main loop ended");
	}
}

//---------------------------------------------------------------------------------------------------- Tick Loop
/// The per-thread loop, identical for both workers:
///
/// 1. measure and clamp the delta time
/// 2. pick up a replaced tick callback, if any
/// 3. run the tick callback inside a panic boundary
/// 4. drain this thread's [`crate::CommandQueue`]
/// 5. sleep off the rest of the frame interval
/// 6. (game only) publish the frame
///
/// Shutdown is only observed between iterations,
/// so its latency is bounded by one frame interval
/// plus however long the tick callback takes.
fn tick_loop(kind: ThreadKind, shared: &Shared) {
	let state = shared.worker(kind);
	let queue = shared.queue(kind);

	let mut tick: Option<TickFn> = None;
	let mut last = Instant::now();

	while state.running.load(Ordering::Acquire) && !shared.is_shutting_down() {
		let now = Instant::now();
		let delta = now.duration_since(last).min(shared.max_delta).as_secs_f32();
		last = now;

		// Latest replacement wins.
		while let Ok(replacement) = state.tick_recv.try_recv() {
			tick = replacement;
		}

		if let Some(f) = tick.as_mut() {
			if let Err(payload) = catch_unwind(AssertUnwindSafe(|| f(delta))) {
				state.faults.fetch_add(1, Ordering::Relaxed);
				error2!("{kind} - tick callback panicked: {}", panic_message(&*payload));

				if shared.tick_fault.is_stop() {
					error2!("{kind} - stopping loop after tick panic");
					// Nothing drains this queue anymore.
					queue.shutdown();
					break;
				}
			}
		}

		queue.execute_all();
		state.ticks.fetch_add(1, Ordering::Relaxed);

		if let Some(interval) = frame_interval(state.target_fps.get()) {
			let elapsed = now.elapsed();
			if elapsed < interval {
				std::thread::sleep(interval - elapsed);
			}
		}

		if kind == ThreadKind::Game {
			shared.frame.advance();
		}
	}

	state.running.store(false, Ordering::Release);
}

/// The target duration of one iteration at `fps`.
///
/// `None` means pacing is disabled.
fn frame_interval(fps: f32) -> Option<Duration> {
	if fps.is_finite() && fps > 0.0 {
		Duration::try_from_secs_f32(fps.recip()).ok()
	} else {
		None
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn frame_interval_valid() {
		let tenth = frame_interval(10.0).unwrap();
		assert!((tenth.as_secs_f64() - 0.1).abs() < 1e-6);
		assert_eq!(frame_interval(1.0), Some(Duration::from_secs(1)));
	}

	#[test]
	fn frame_interval_disabled() {
		assert_eq!(frame_interval(0.0), None);
		assert_eq!(frame_interval(-60.0), None);
		assert_eq!(frame_interval(f32::NAN), None);
		assert_eq!(frame_interval(f32::INFINITY), None);
		// 1/fps does not fit in a `Duration`.
		assert_eq!(frame_interval(f32::MIN_POSITIVE), None);
	}
}
