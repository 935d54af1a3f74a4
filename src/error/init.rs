//! Lifecycle errors.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;
use crate::ThreadKind;

#[allow(unused_imports)] // docs
use crate::{ThreadCoordinator,config::InitConfig};

//---------------------------------------------------------------------------------------------------- InitError
/// Error returned by [`ThreadCoordinator::initialize`].
///
/// Except for [`InitError::Stopped`], the coordinator is back
/// in the not-started state after returning one of these: any
/// worker that did start has been released and joined without
/// ever ticking, so `initialize` may be retried.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
	#[error("coordinator was already shut down, it cannot be restarted")]
	/// The coordinator was shut down, it is single-use.
	Stopped,

	#[error("failed to spawn thread `{name}`: {error}")]
	/// Failed to spawn an OS thread.
	ThreadSpawn {
		/// Name of the thread that failed to spawn
		name: &'static str,
		/// Associated IO error
		error: std::io::Error,
	},

	#[error("{thread} thread did not report ready within {timeout:?}")]
	/// A worker did not report ready within [`InitConfig::init_timeout`].
	InitializationTimeout {
		/// The worker that timed out
		thread: ThreadKind,
		/// The timeout that elapsed
		timeout: Duration,
	},

	#[error("{thread} thread exited before reporting ready")]
	/// A worker exited (most likely panicked in
	/// [`crate::config::Callbacks::thread_start`]) before reporting ready.
	WorkerExited {
		/// The worker that exited
		thread: ThreadKind,
	},
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		let e = InitError::InitializationTimeout {
			thread: ThreadKind::Render,
			timeout: Duration::from_millis(50),
		};
		assert_eq!(e.to_string(), "Render thread did not report ready within 50ms");

		let e = InitError::WorkerExited { thread: ThreadKind::Game };
		assert_eq!(e.to_string(), "Game thread exited before reporting ready");
	}
}
