//! These are helper functions used for testing throughout the codebase.

//---------------------------------------------------------------------------------------------------- Use
use crate::config::{InitConfig,LiveConfig};
use parking_lot::Mutex;
use std::{
	sync::Arc,
	time::{Duration,Instant},
};

//---------------------------------------------------------------------------------------------------- OrderLog
/// A shared, ordered record of which commands ran.
///
/// Guarded by its own lock, separate from anything under test.
#[derive(Clone, Default)]
pub(crate) struct OrderLog(Arc<Mutex<Vec<usize>>>);

impl OrderLog {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// A closure that appends `i` when run.
	pub(crate) fn push(&self, i: usize) -> impl FnOnce() + Send + 'static {
		let log = Arc::clone(&self.0);
		move || log.lock().push(i)
	}

	/// Take everything recorded so far.
	pub(crate) fn take(&self) -> Vec<usize> {
		std::mem::take(&mut *self.0.lock())
	}
}

//---------------------------------------------------------------------------------------------------- Test Init Helpers
/// An `InitConfig` with fast loops and a short readiness timeout.
pub(crate) fn init_config() -> InitConfig {
	InitConfig {
		live: LiveConfig {
			game_fps: 200.0,
			render_fps: 200.0,
		},
		init_timeout: Duration::from_secs(5),
		..InitConfig::DEFAULT
	}
}

/// Spin (with short sleeps) until `f` returns true or `timeout` elapses.
pub(crate) fn wait_until<F: FnMut() -> bool>(timeout: Duration, mut f: F) -> bool {
	let start = Instant::now();
	while start.elapsed() < timeout {
		if f() {
			return true;
		}
		std::thread::sleep(Duration::from_millis(1));
	}
	f()
}
