//! Small types describing the workers.

//---------------------------------------------------------------------------------------------------- Use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	IntoStaticStr,
};

#[allow(unused_imports)] // docs
use crate::{ThreadCoordinator,Threads};

//---------------------------------------------------------------------------------------------------- ThreadKind
/// One of the two worker threads.
///
/// The `Display`/`AsRef<str>` form is also the OS thread name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,IntoStaticStr)]
pub enum ThreadKind {
	/// Game logic: input, camera, world simulation.
	Game,
	/// Rendering: drains the render [`crate::CommandQueue`].
	Render,
}

impl ThreadKind {
	#[inline]
	/// Index into per-worker arrays.
	pub(crate) const fn index(self) -> usize {
		self as usize
	}
}

//---------------------------------------------------------------------------------------------------- Lifecycle
/// The state of a [`ThreadCoordinator`].
///
/// ```text
/// NotStarted --initialize()--> Starting --> Running --shutdown()--> Stopping --> Stopped
///      ^                          |
///      +------ (init failed) -----+
/// ```
///
/// `shutdown()` on a `NotStarted` coordinator goes straight to `Stopped`.
/// There is no way back from `Stopped`, a coordinator is single-use.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,IntoStaticStr)]
pub enum Lifecycle {
	/// No threads running, [`ThreadCoordinator::initialize`] not called (or failed).
	NotStarted,
	/// Workers spawned, waiting for them to report ready.
	Starting,
	/// Both workers are ticking.
	Running,
	/// Shutdown was signaled, workers are being joined.
	Stopping,
	/// Workers joined, terminal.
	Stopped,
}

//---------------------------------------------------------------------------------------------------- Dispatch
/// How [`Threads::execute_in_game_thread`]/[`Threads::execute_in_render_thread`]
/// handled a closure.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[derive(AsRefStr,Display,IntoStaticStr)]
pub enum Dispatch {
	/// The caller was on the target thread, the closure already ran.
	Inline,
	/// The closure was queued, it runs on the target thread's next iteration.
	Deferred,
	/// The target queue was shut down, the closure was dropped unexecuted.
	Dropped,
}

//---------------------------------------------------------------------------------------------------- ThreadStats
/// Counters for one worker, see [`Threads::stats`].
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq)]
pub struct ThreadStats {
	/// Completed loop iterations.
	pub ticks: u64,
	/// Tick callback panics caught.
	pub faults: u64,
	/// Whether the worker's loop is currently running.
	pub running: bool,
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use strum::IntoEnumIterator;

	#[test]
	fn thread_kind() {
		assert_eq!(ThreadKind::COUNT, 2);
		let kinds: Vec<ThreadKind> = ThreadKind::iter().collect();
		assert_eq!(kinds, [ThreadKind::Game, ThreadKind::Render]);
		for (i, kind) in kinds.into_iter().enumerate() {
			assert_eq!(kind.index(), i);
		}
		assert_eq!(ThreadKind::Render.as_ref(), "Render");
		let name: &'static str = ThreadKind::Game.into();
		assert_eq!(name, "Game");
	}

	#[test]
	fn lifecycle_order() {
		assert!(Lifecycle::NotStarted < Lifecycle::Running);
		assert!(Lifecycle::Stopping < Lifecycle::Stopped);
		assert_eq!(Lifecycle::Stopping.to_string(), "Stopping");
	}
}
