//! A cheap, cloneable handle to the coordinator's threads.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	sync::Arc,
	thread::ThreadId,
	time::Duration,
};
use strum::IntoEnumIterator;
use crate::{
	command::{Command,CommandKind,CommandQueue},
	config::{TickFn,LiveConfig},
	coordinator::{ThreadKind,Lifecycle,Dispatch,ThreadStats,shared::Shared},
	error::{ThreadError,FrameWaitError},
	macros::{debug2,trace2},
};

#[allow(unused_imports)] // docs
use crate::ThreadCoordinator;

//---------------------------------------------------------------------------------------------------- Threads
/// A handle to the threads owned by a [`ThreadCoordinator`].
///
/// This is everything you can do with the workers besides starting
/// and stopping them. It is `Clone + Send + Sync`, so it can be moved
/// into tick callbacks, commands, or other threads.
///
/// A [`ThreadCoordinator`] derefs to its [`Threads`], so all of
/// these methods can also be called on the coordinator directly.
///
/// Holding a [`Threads`] does not keep the workers alive,
/// dropping the [`ThreadCoordinator`] still shuts them down.
#[derive(Clone,Debug)]
pub struct Threads {
	pub(crate) shared: Arc<Shared>,
}

impl Threads {
	pub(crate) const fn new(shared: Arc<Shared>) -> Self {
		Self { shared }
	}

	//---------------------------------------------------------------------------------------------------- Identity
	#[must_use]
	/// The worker the calling thread is, if any.
	///
	/// Always `None` before [`ThreadCoordinator::initialize`] succeeds.
	pub fn current_thread(&self) -> Option<ThreadKind> {
		let id = std::thread::current().id();
		ThreadKind::iter().find(|kind| self.shared.worker(*kind).id.load() == Some(id))
	}

	#[must_use]
	/// Returns `true` if the calling thread is the `kind` worker.
	pub fn is_in(&self, kind: ThreadKind) -> bool {
		self.shared
			.worker(kind)
			.id
			.load()
			.is_some_and(|id| id == std::thread::current().id())
	}

	#[must_use]
	/// Returns `true` if the calling thread is the game thread.
	pub fn is_in_game_thread(&self) -> bool {
		self.is_in(ThreadKind::Game)
	}

	#[must_use]
	/// Returns `true` if the calling thread is the render thread.
	pub fn is_in_render_thread(&self) -> bool {
		self.is_in(ThreadKind::Render)
	}

	#[must_use]
	/// The `ThreadId` of the `kind` worker.
	///
	/// `None` until [`ThreadCoordinator::initialize`] succeeds.
	/// The id stays set after shutdown.
	pub fn thread_id(&self, kind: ThreadKind) -> Option<ThreadId> {
		self.shared.worker(kind).id.load()
	}

	#[must_use]
	/// Same as `thread_id(ThreadKind::Game)`.
	pub fn game_thread_id(&self) -> Option<ThreadId> {
		self.thread_id(ThreadKind::Game)
	}

	#[must_use]
	/// Same as `thread_id(ThreadKind::Render)`.
	pub fn render_thread_id(&self) -> Option<ThreadId> {
		self.thread_id(ThreadKind::Render)
	}

	//---------------------------------------------------------------------------------------------------- Dispatch
	/// Run `f` on the `kind` thread.
	///
	/// If the caller already is that thread, `f` runs immediately
	/// (any panic propagates to the caller) and [`Dispatch::Inline`]
	/// is returned. Otherwise `f` is queued as a
	/// [`CommandKind::Custom`] command which the worker runs on its
	/// next iteration, after its tick callback.
	///
	/// Queued work is dropped unexecuted once shutdown begins, or once
	/// that worker's loop ends under [`crate::config::TickFault::Stop`].
	pub fn execute_in<F>(&self, kind: ThreadKind, f: F) -> Dispatch
	where
		F: FnOnce() + Send + 'static
	{
		if self.is_in(kind) {
			f();
			return Dispatch::Inline;
		}

		if self.shared.queue(kind).try_push(Command::new(CommandKind::Custom, f)) {
			trace2!("Threads - deferred closure to {kind} thread");
			Dispatch::Deferred
		} else {
			Dispatch::Dropped
		}
	}

	/// Same as `execute_in(ThreadKind::Game, f)`.
	pub fn execute_in_game_thread<F>(&self, f: F) -> Dispatch
	where
		F: FnOnce() + Send + 'static
	{
		self.execute_in(ThreadKind::Game, f)
	}

	/// Same as `execute_in(ThreadKind::Render, f)`.
	pub fn execute_in_render_thread<F>(&self, f: F) -> Dispatch
	where
		F: FnOnce() + Send + 'static
	{
		self.execute_in(ThreadKind::Render, f)
	}

	//---------------------------------------------------------------------------------------------------- Affinity
	/// Returns an error if the calling thread is not the `kind` worker.
	///
	/// ```rust
	/// # use duet::*;
	/// # use duet::{config::*, error::*};
	/// # use std::sync::Arc;
	/// let coordinator = ThreadCoordinator::new(InitConfig::DEFAULT, Arc::new(CommandQueue::new()));
	///
	/// assert_eq!(
	/// 	coordinator.ensure_thread(ThreadKind::Render),
	/// 	Err(ThreadError::WrongThread { expected: ThreadKind::Render, actual: None }),
	/// );
	/// ```
	pub fn ensure_thread(&self, kind: ThreadKind) -> Result<(), ThreadError> {
		if self.is_in(kind) {
			Ok(())
		} else {
			Err(ThreadError::WrongThread {
				expected: kind,
				actual: self.current_thread(),
			})
		}
	}

	/// Run `f` only if the calling thread is the `kind` worker.
	///
	/// Unlike [`Threads::execute_in`] this never defers,
	/// it is for code that must not run anywhere else.
	pub fn on_thread<F, R>(&self, kind: ThreadKind, f: F) -> Result<R, ThreadError>
	where
		F: FnOnce() -> R
	{
		self.ensure_thread(kind)?;
		Ok(f())
	}

	//---------------------------------------------------------------------------------------------------- Frames
	#[must_use]
	/// How many game loop iterations have completed.
	pub fn game_frame(&self) -> u64 {
		self.shared.frame.current()
	}

	/// Block until the game thread completes an iteration
	/// after frame number `after`, returning the new frame number.
	///
	/// Pass the result of [`Threads::game_frame`] to wait for the next frame.
	///
	/// # Errors
	/// - [`FrameWaitError::Timeout`] if no such frame completed within `timeout`
	/// - [`FrameWaitError::Shutdown`] if shutdown began, before or during the wait
	pub fn wait_for_game_frame(&self, after: u64, timeout: Duration) -> Result<u64, FrameWaitError> {
		self.shared.frame.wait_after(after, timeout)
	}

	//---------------------------------------------------------------------------------------------------- Stats
	#[must_use]
	/// Counters for the `kind` worker.
	pub fn stats(&self, kind: ThreadKind) -> ThreadStats {
		self.shared.worker(kind).stats()
	}

	#[must_use]
	/// The queue drained by the render thread.
	pub fn render_queue(&self) -> &Arc<CommandQueue> {
		&self.shared.render_queue
	}

	//---------------------------------------------------------------------------------------------------- Lifecycle
	#[must_use]
	/// The current [`Lifecycle`] state.
	pub fn lifecycle(&self) -> Lifecycle {
		self.shared.lifecycle.load()
	}

	#[must_use]
	/// Returns `true` if initialization succeeded and shutdown has not begun.
	pub fn is_initialized(&self) -> bool {
		self.lifecycle() == Lifecycle::Running
	}

	#[must_use]
	/// Returns `true` once shutdown was signaled.
	pub fn is_shutting_down(&self) -> bool {
		self.shared.is_shutting_down()
	}

	//---------------------------------------------------------------------------------------------------- Live Config
	#[must_use]
	/// The current frame rate targets.
	pub fn config(&self) -> LiveConfig {
		LiveConfig {
			game_fps: self.target_fps(ThreadKind::Game),
			render_fps: self.target_fps(ThreadKind::Render),
		}
	}

	/// Replace both frame rate targets.
	///
	/// See [`LiveConfig`] for what an invalid frame rate does.
	pub fn config_update(&self, config: &LiveConfig) {
		self.set_target_fps(ThreadKind::Game, config.game_fps);
		self.set_target_fps(ThreadKind::Render, config.render_fps);
	}

	#[must_use]
	/// The frame rate target of the `kind` worker.
	pub fn target_fps(&self, kind: ThreadKind) -> f32 {
		self.shared.worker(kind).target_fps.get()
	}

	/// Set the frame rate target of the `kind` worker.
	///
	/// Takes effect at the end of its current iteration.
	pub fn set_target_fps(&self, kind: ThreadKind, fps: f32) {
		debug2!("Threads - {kind} target fps: {fps}");
		self.shared.worker(kind).target_fps.set(fps);
	}

	/// Same as `set_target_fps(ThreadKind::Game, fps)`.
	pub fn set_target_game_fps(&self, fps: f32) {
		self.set_target_fps(ThreadKind::Game, fps);
	}

	/// Same as `set_target_fps(ThreadKind::Render, fps)`.
	pub fn set_target_render_fps(&self, fps: f32) {
		self.set_target_fps(ThreadKind::Render, fps);
	}

	//---------------------------------------------------------------------------------------------------- Tick Callbacks
	/// Replace (`Some`) or clear (`None`) the tick callback of the `kind` worker.
	///
	/// The worker picks up the change at the start of its next iteration,
	/// a tick already in progress finishes with the old callback.
	/// If this is called several times in between, the latest call wins.
	pub fn set_tick(&self, kind: ThreadKind, tick: Option<TickFn>) {
		debug2!("Threads - {kind} tick callback replaced, some: {}", tick.is_some());
		// The receiver lives in `Shared` next to us, this cannot fail.
		let _ = self.shared.worker(kind).tick_send.send(tick);
	}

	/// Replace the game tick callback.
	pub fn set_game_tick<F>(&self, tick: F)
	where
		F: FnMut(f32) + Send + 'static
	{
		self.set_tick(ThreadKind::Game, Some(Box::new(tick)));
	}

	/// Replace the render tick callback.
	pub fn set_render_tick<F>(&self, tick: F)
	where
		F: FnMut(f32) + Send + 'static
	{
		self.set_tick(ThreadKind::Render, Some(Box::new(tick)));
	}

	/// Remove the game tick callback, the loop keeps running without it.
	pub fn clear_game_tick(&self) {
		self.set_tick(ThreadKind::Game, None);
	}

	/// Remove the render tick callback, the loop keeps running without it.
	pub fn clear_render_tick(&self) {
		self.set_tick(ThreadKind::Render, None);
	}
}
