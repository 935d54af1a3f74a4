//! The owner of the game and render threads.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	ops::Deref,
	sync::Arc,
	thread::JoinHandle,
	time::Duration,
};
use parking_lot::Mutex;
use strum::EnumCount;
use crate::{
	command::CommandQueue,
	config::{InitConfig,ThreadStartFn},
	coordinator::{ThreadKind,Threads,shared::Shared},
	macros::debug2,
};

//---------------------------------------------------------------------------------------------------- ThreadCoordinator
/// Owns the game and render worker threads.
///
/// Construct one with [`ThreadCoordinator::new`], start the workers with
/// [`ThreadCoordinator::initialize`], and stop them with
/// [`ThreadCoordinator::shutdown`] (or by dropping the coordinator).
///
/// Everything else (thread queries, dispatch, frame rates, tick
/// callbacks) lives on [`Threads`], which this derefs to.
/// Use [`ThreadCoordinator::threads`] to get a cloneable handle.
///
/// A coordinator is single-use: once shut down it cannot be restarted,
/// construct a new one instead.
pub struct ThreadCoordinator {
	pub(super) threads: Threads,

	/// Cloned into each worker on every `initialize()` attempt.
	pub(super) thread_start: Option<ThreadStartFn>,
	pub(super) init_timeout: Duration,

	/// Serializes `initialize()` and `shutdown()`.
	pub(super) transition: Mutex<()>,
	/// Join handles of running workers.
	pub(super) handles: Mutex<Vec<(ThreadKind, JoinHandle<()>)>>,
}

impl ThreadCoordinator {
	#[cold]
	#[inline(never)]
	#[must_use]
	/// Create a coordinator. No threads are spawned until
	/// [`ThreadCoordinator::initialize`] is called.
	///
	/// `render_queue` is the queue the render thread drains every iteration.
	/// Keep your own [`Arc`] of it to enqueue commands from anywhere.
	pub fn new(config: InitConfig, render_queue: Arc<CommandQueue>) -> Self {
		debug2!("Coordinator - init config:\n{config:#?}");

		let InitConfig {
			callbacks,
			live,
			max_delta,
			init_timeout,
			tick_fault,
		} = config;

		let shared = Shared::new(
			live,
			callbacks.game_tick,
			callbacks.render_tick,
			render_queue,
			max_delta,
			tick_fault,
		);

		Self {
			threads: Threads::new(Arc::new(shared)),
			thread_start: callbacks.thread_start,
			init_timeout,
			transition: Mutex::new(()),
			handles: Mutex::new(Vec::with_capacity(ThreadKind::COUNT)),
		}
	}

	#[must_use]
	/// A cloneable handle to this coordinator's threads.
	pub fn threads(&self) -> Threads {
		self.threads.clone()
	}
}

//---------------------------------------------------------------------------------------------------- Trait Impl
impl Deref for ThreadCoordinator {
	type Target = Threads;

	fn deref(&self) -> &Self::Target {
		&self.threads
	}
}

impl std::fmt::Debug for ThreadCoordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ThreadCoordinator")
			.field("lifecycle", &self.threads.lifecycle())
			.field("init_timeout", &self.init_timeout)
			.field("thread_start", &self.thread_start.as_ref().map(|_| "Some(_)"))
			.field("shared", &self.threads.shared)
			.finish_non_exhaustive()
	}
}
