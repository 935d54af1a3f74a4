//! State shared between the coordinator, its handles and the workers.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	sync::{
		Arc,
		atomic::{AtomicBool,AtomicU64,Ordering},
	},
	thread::ThreadId,
	time::Duration,
};
use crossbeam::{
	atomic::AtomicCell,
	channel::{Sender,Receiver,unbounded},
};
use strum::EnumCount;
use crate::{
	atomic::AtomicF32,
	command::CommandQueue,
	config::{TickFn,TickFault,LiveConfig},
	coordinator::{ThreadKind,Lifecycle,ThreadStats,frame::FrameSignal},
};

//---------------------------------------------------------------------------------------------------- WorkerState
/// Per-worker state.
pub(crate) struct WorkerState {
	/// Set by `initialize()` before the worker's first tick,
	/// cleared again only if initialization rolls back.
	pub(crate) id: AtomicCell<Option<ThreadId>>,
	/// The worker loops while this (and not `Shared::shutdown`) is set.
	pub(crate) running: AtomicBool,
	/// Read at the end of every iteration.
	pub(crate) target_fps: AtomicF32,

	/// Tick callback replacements, `None` clears it.
	///
	/// The worker owns the current callback, and drains this
	/// channel at the start of every iteration (latest wins).
	pub(crate) tick_send: Sender<Option<TickFn>>,
	pub(crate) tick_recv: Receiver<Option<TickFn>>,

	pub(crate) ticks: AtomicU64,
	pub(crate) faults: AtomicU64,
}

impl WorkerState {
	fn new(fps: f32, tick: Option<TickFn>) -> Self {
		let (tick_send, tick_recv) = unbounded();
		if tick.is_some() {
			// We own both ends, this cannot fail.
			let _ = tick_send.send(tick);
		}

		Self {
			id: AtomicCell::new(None),
			running: AtomicBool::new(false),
			target_fps: AtomicF32::new(fps),
			tick_send,
			tick_recv,
			ticks: AtomicU64::new(0),
			faults: AtomicU64::new(0),
		}
	}

	pub(crate) fn stats(&self) -> ThreadStats {
		ThreadStats {
			ticks: self.ticks.load(Ordering::Relaxed),
			faults: self.faults.load(Ordering::Relaxed),
			running: self.running.load(Ordering::Acquire),
		}
	}
}

impl std::fmt::Debug for WorkerState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WorkerState")
			.field("id", &self.id.load())
			.field("target_fps", &self.target_fps)
			.field("stats", &self.stats())
			.finish_non_exhaustive()
	}
}

//---------------------------------------------------------------------------------------------------- Shared
/// Everything a worker (or a [`crate::Threads`] handle) needs.
#[derive(Debug)]
pub(crate) struct Shared {
	/// Set once, on shutdown. Never reset.
	pub(crate) shutdown: AtomicBool,
	pub(crate) lifecycle: AtomicCell<Lifecycle>,

	/// Indexed with [`ThreadKind::index`].
	pub(crate) workers: [WorkerState; ThreadKind::COUNT],

	/// Deferred work for the game thread, owned here.
	pub(crate) game_queue: CommandQueue,
	/// Deferred work for the render thread, owned by the application.
	pub(crate) render_queue: Arc<CommandQueue>,

	pub(crate) frame: FrameSignal,

	// Immutable after construction.
	pub(crate) max_delta: Duration,
	pub(crate) tick_fault: TickFault,
}

impl Shared {
	pub(crate) fn new(
		live: LiveConfig,
		game_tick: Option<TickFn>,
		render_tick: Option<TickFn>,
		render_queue: Arc<CommandQueue>,
		max_delta: Duration,
		tick_fault: TickFault,
	) -> Self {
		Self {
			shutdown: AtomicBool::new(false),
			lifecycle: AtomicCell::new(Lifecycle::NotStarted),
			workers: [
				WorkerState::new(live.game_fps, game_tick),
				WorkerState::new(live.render_fps, render_tick),
			],
			game_queue: CommandQueue::new(),
			render_queue,
			frame: FrameSignal::new(),
			max_delta,
			tick_fault,
		}
	}

	#[inline]
	pub(crate) fn worker(&self, kind: ThreadKind) -> &WorkerState {
		&self.workers[kind.index()]
	}

	#[inline]
	/// The queue drained by `kind` every iteration.
	pub(crate) fn queue(&self, kind: ThreadKind) -> &CommandQueue {
		match kind {
			ThreadKind::Game => &self.game_queue,
			ThreadKind::Render => &*self.render_queue,
		}
	}

	#[inline]
	pub(crate) fn is_shutting_down(&self) -> bool {
		self.shutdown.load(Ordering::Acquire)
	}
}
