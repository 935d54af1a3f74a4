//! Starting the workers.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	sync::{Arc,atomic::Ordering},
	thread::{JoinHandle,ThreadId},
	time::Instant,
};
use crossbeam::channel::{bounded,Receiver,Sender,RecvTimeoutError};
use strum::{EnumCount,IntoEnumIterator};
use crate::{
	coordinator::{ThreadCoordinator,ThreadKind,Lifecycle,worker::Worker},
	error::InitError,
	macros::{debug2,info2,warn2,error2,panic_message},
};

//---------------------------------------------------------------------------------------------------- Spawned
/// A worker that was spawned but has not been released yet.
struct Spawned {
	kind: ThreadKind,
	handle: JoinHandle<()>,
	ready: Receiver<ThreadId>,
}

//---------------------------------------------------------------------------------------------------- Init
impl ThreadCoordinator {
	#[cold]
	#[inline(never)]
	/// Spawn the game and render threads and block until both report ready.
	///
	/// When this returns `Ok`, both thread ids are published
	/// ([`crate::Threads::is_in_game_thread`] and friends work from
	/// inside the very first tick) and both loops are running.
	///
	/// Calling this again while already running is a no-op (logged as
	/// a warning), as is calling it from one of the worker threads.
	///
	/// # Errors
	/// - [`InitError::Stopped`] if the coordinator was already shut down
	/// - [`InitError::ThreadSpawn`] if the OS refused to spawn a thread
	/// - [`InitError::InitializationTimeout`] if a worker did not report
	///   ready within [`crate::config::InitConfig::init_timeout`]
	/// - [`InitError::WorkerExited`] if a worker died before reporting ready
	///
	/// On all but the first, the coordinator is rolled back to
	/// [`Lifecycle::NotStarted`] and no tick has run, so this can be retried.
	pub fn initialize(&self) -> Result<(), InitError> {
		if let Some(kind) = self.current_thread() {
			warn2!("Coordinator - initialize() called from the {kind} thread, ignoring");
			return Ok(());
		}

		let _transition = self.transition.lock();
		let shared = &self.threads.shared;

		match shared.lifecycle.load() {
			Lifecycle::NotStarted => (),
			Lifecycle::Starting | Lifecycle::Running => {
				warn2!("Coordinator - already initialized, ignoring");
				return Ok(());
			},
			Lifecycle::Stopping | Lifecycle::Stopped => return Err(InitError::Stopped),
		}

		info2!("Coordinator - initializing...");
		shared.lifecycle.store(Lifecycle::Starting);

		// The start gate, see `Worker::start`.
		let (start_send, start_recv) = bounded::<()>(ThreadKind::COUNT);

		let mut spawned = Vec::with_capacity(ThreadKind::COUNT);
		for kind in ThreadKind::iter() {
			let (ready, ready_recv) = bounded(1);
			shared.worker(kind).running.store(true, Ordering::Release);

			let worker = Worker {
				kind,
				shared: Arc::clone(shared),
				thread_start: self.thread_start.clone(),
				ready,
				start: start_recv.clone(),
			};

			debug2!("Coordinator - spawning: {kind}");
			match worker.spawn() {
				Ok(handle) => spawned.push(Spawned { kind, handle, ready: ready_recv }),
				Err(error) => {
					shared.worker(kind).running.store(false, Ordering::Release);
					let error = InitError::ThreadSpawn { name: kind.into(), error };
					return Err(self.rollback(start_send, spawned, error));
				},
			}
		}
		drop(start_recv);

		// Readiness barrier.
		//
		// `None` means the timeout is too large to
		// be represented, so we just wait forever.
		let deadline = Instant::now().checked_add(self.init_timeout);
		for index in 0..spawned.len() {
			let kind = spawned[index].kind;
			let ready = &spawned[index].ready;

			let result = match deadline {
				Some(deadline) => ready.recv_deadline(deadline),
				None => ready.recv().map_err(|_| RecvTimeoutError::Disconnected),
			};

			let error = match result {
				Ok(id) => {
					shared.worker(kind).id.store(Some(id));
					info2!("Coordinator - {kind} thread ready: {id:?}");
					continue;
				},
				Err(RecvTimeoutError::Timeout) => InitError::InitializationTimeout {
					thread: kind,
					timeout: self.init_timeout,
				},
				Err(RecvTimeoutError::Disconnected) => InitError::WorkerExited { thread: kind },
			};

			return Err(self.rollback(start_send, spawned, error));
		}

		// Every id is published before any worker ticks.
		shared.lifecycle.store(Lifecycle::Running);
		for _ in 0..spawned.len() {
			// Sized for every worker, this never blocks.
			let _ = start_send.send(());
		}

		self.handles.lock().extend(spawned.into_iter().map(|s| (s.kind, s.handle)));
		info2!("Coordinator - initialization ... OK");
		Ok(())
	}

	#[cold]
	#[inline(never)]
	/// Undo a failed `initialize()`, returning `error` back.
	///
	/// Workers that reported ready are waiting on the start gate,
	/// dropping it makes them exit without ticking and they are joined.
	/// Workers that never reported may be stuck in the thread start
	/// hook for an unknown amount of time, so they are detached. They
	/// exit as soon as they find their ready channel disconnected.
	fn rollback(&self, start: Sender<()>, spawned: Vec<Spawned>, error: InitError) -> InitError {
		error2!("Coordinator - initialization failed: {error}, rolling back...");

		let shared = &self.threads.shared;
		drop(start);

		for Spawned { kind, handle, ready } in spawned {
			let worker = shared.worker(kind);
			worker.running.store(false, Ordering::Release);
			drop(ready);

			if worker.id.take().is_some() {
				match handle.join() {
					Ok(()) => debug2!("Coordinator - {kind} thread joined"),
					Err(payload) => error2!("Coordinator - {kind} thread panicked: {}", panic_message(&*payload)),
				}
			} else {
				debug2!("Coordinator - detaching {kind} thread");
				drop(handle);
			}
		}

		shared.lifecycle.store(Lifecycle::NotStarted);
		warn2!("Coordinator - rollback ... OK");
		error
	}
}
