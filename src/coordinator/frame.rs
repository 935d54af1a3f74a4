//! Game frame signaling.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;
use parking_lot::{Condvar,Mutex};
use crate::error::FrameWaitError;

//---------------------------------------------------------------------------------------------------- FrameSignal
/// A frame counter the game thread bumps after every
/// iteration, which other threads can block on.
#[derive(Debug)]
pub(crate) struct FrameSignal {
	state: Mutex<FrameState>,
	cond: Condvar,
}

#[derive(Debug)]
struct FrameState {
	/// Frames published so far.
	frame: u64,
	/// Set on shutdown, releases all waiters.
	closed: bool,
}

impl FrameSignal {
	pub(crate) const fn new() -> Self {
		Self {
			state: Mutex::new(FrameState { frame: 0, closed: false }),
			cond: Condvar::new(),
		}
	}

	/// Publish a new frame.
	pub(crate) fn advance(&self) {
		self.state.lock().frame += 1;
		self.cond.notify_all();
	}

	/// Release all current and future waiters.
	pub(crate) fn close(&self) {
		self.state.lock().closed = true;
		self.cond.notify_all();
	}

	/// The latest published frame.
	pub(crate) fn current(&self) -> u64 {
		self.state.lock().frame
	}

	/// Block until a frame newer than `after` is published.
	pub(crate) fn wait_after(&self, after: u64, timeout: Duration) -> Result<u64, FrameWaitError> {
		let mut state = self.state.lock();
		self.cond.wait_while_for(&mut state, |s| s.frame <= after && !s.closed, timeout);

		if state.closed {
			Err(FrameWaitError::Shutdown)
		} else if state.frame > after {
			Ok(state.frame)
		} else {
			Err(FrameWaitError::Timeout(timeout))
		}
	}
}
