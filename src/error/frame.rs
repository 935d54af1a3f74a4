//! Frame sync errors.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- FrameWaitError
/// Error returned by [`crate::Threads::wait_for_game_frame`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameWaitError {
	#[error("no new game frame within {0:?}")]
	/// No newer frame was published before the timeout.
	Timeout(Duration),

	#[error("coordinator is shutting down")]
	/// The coordinator started shutting down while (or before) waiting.
	Shutdown,
}
