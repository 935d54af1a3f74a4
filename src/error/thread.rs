//! Thread affinity errors.

//---------------------------------------------------------------------------------------------------- Use
use crate::ThreadKind;

//---------------------------------------------------------------------------------------------------- ThreadError
/// A thread-affinity violation.
///
/// Returned by [`crate::Threads::ensure_thread`] and
/// [`crate::Threads::on_thread`] when the caller is not on
/// the thread the operation requires.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThreadError {
	#[error("expected to be on the {expected} thread, called from {}", .actual.map_or("a non-worker thread", |k| k.into()))]
	/// Called from the wrong thread.
	WrongThread {
		/// The thread the operation requires
		expected: ThreadKind,
		/// The worker the caller is on, `None` if it is not a worker
		actual: Option<ThreadKind>,
	},
}
