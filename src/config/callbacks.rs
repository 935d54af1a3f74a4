//! User code run by the worker threads.

//---------------------------------------------------------------------------------------------------- use
use std::{
	fmt,
	sync::Arc,
};
use crate::ThreadKind;

#[allow(unused_imports)]
use crate::ThreadCoordinator; // docs

//---------------------------------------------------------------------------------------------------- Types
/// A tick callback, called once per loop iteration with
/// the (clamped) delta time since the previous iteration, in seconds.
///
/// It must not block indefinitely: a hung tick callback
/// also hangs [`ThreadCoordinator::shutdown`].
pub type TickFn = Box<dyn FnMut(f32) + Send + 'static>;

/// A hook run once on each worker thread right after it starts,
/// before it reports ready (e.g. thread priority or profiler registration).
pub type ThreadStartFn = Arc<dyn Fn(ThreadKind) + Send + Sync + 'static>;

//---------------------------------------------------------------------------------------------------- Callbacks
/// Callbacks handed to a [`ThreadCoordinator`] at construction.
///
/// Tick callbacks can also be replaced later with
/// [`crate::Threads::set_game_tick`] and friends.
pub struct Callbacks {
	/// Called every game loop iteration.
	pub game_tick: Option<TickFn>,
	/// Called every render loop iteration,
	/// before the render [`crate::CommandQueue`] is drained.
	pub render_tick: Option<TickFn>,
	/// Called on each worker thread before it signals readiness.
	pub thread_start: Option<ThreadStartFn>,
}

//---------------------------------------------------------------------------------------------------- Callbacks Impl
impl Callbacks {
	/// A fresh [`Self`] with no callbacks.
	///
	/// ```rust
	/// # use duet::config::*;
	/// let callbacks: Callbacks = Callbacks::DEFAULT;
	/// assert!(callbacks.all_none());
	/// ```
	pub const DEFAULT: Self = Self {
		game_tick:    None,
		render_tick:  None,
		thread_start: None,
	};

	#[must_use]
	/// Returns `true` if no callback is set.
	pub const fn all_none(&self) -> bool {
		self.game_tick.is_none()   &&
		self.render_tick.is_none() &&
		self.thread_start.is_none()
	}

	#[cold]
	/// Set the game tick callback.
	pub fn game_tick<F>(&mut self, callback: F) -> &mut Self
	where
		F: FnMut(f32) + Send + 'static
	{
		self.game_tick = Some(Box::new(callback));
		self
	}

	#[cold]
	/// Set the render tick callback.
	pub fn render_tick<F>(&mut self, callback: F) -> &mut Self
	where
		F: FnMut(f32) + Send + 'static
	{
		self.render_tick = Some(Box::new(callback));
		self
	}

	#[cold]
	/// Set the thread start hook.
	pub fn thread_start<F>(&mut self, callback: F) -> &mut Self
	where
		F: Fn(ThreadKind) + Send + Sync + 'static
	{
		self.thread_start = Some(Arc::new(callback));
		self
	}
}

//---------------------------------------------------------------------------------------------------- Callbacks Trait Impl
impl Default for Callbacks {
	#[cold]
	/// Same as [`Self::DEFAULT`].
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl fmt::Debug for Callbacks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callbacks")
			.field("game_tick",    &self.game_tick.as_ref().map(|_|    "Some(_)"))
			.field("render_tick",  &self.render_tick.as_ref().map(|_|  "Some(_)"))
			.field("thread_start", &self.thread_start.as_ref().map(|_| "Some(_)"))
			.finish()
	}
}
