//---------------------------------------------------------------------------------------------------- Use
use std::sync::atomic::Ordering;
use crate::{
	coordinator::{ThreadCoordinator,Lifecycle},
	macros::{debug2,info2,warn2,error2,panic_message},
};

//---------------------------------------------------------------------------------------------------- Shutdown
impl ThreadCoordinator {
	#[cold]
	#[inline(never)]
	/// Stop both workers and wait for them to exit.
	///
	/// This:
	/// 1. signals both loops to stop after their current iteration
	/// 2. shuts down both command queues, dropping pending commands unexecuted
	/// 3. releases every [`crate::Threads::wait_for_game_frame`] waiter
	/// 4. joins both threads
	///
	/// It is idempotent, and safe to call on a coordinator
	/// that was never initialized (it just becomes [`Lifecycle::Stopped`]).
	///
	/// Called from a worker thread it can't join itself, so it only
	/// signals; the threads exit on their own and are joined (or, if this
	/// was the drop of the coordinator, detached).
	///
	/// A tick callback that never returns blocks this forever.
	pub fn shutdown(&self) {
		if let Some(kind) = self.current_thread() {
			warn2!("Coordinator - shutdown() called from the {kind} thread, signaling only");
			self.signal_shutdown();
			return;
		}

		let _transition = self.transition.lock();

		match self.lifecycle() {
			Lifecycle::Stopped => {
				debug2!("Coordinator - already shut down");
				return;
			},
			Lifecycle::NotStarted => {
				self.signal_shutdown();
				self.threads.shared.lifecycle.store(Lifecycle::Stopped);
				info2!("Coordinator - shutdown (never initialized) ... OK");
				return;
			},
			Lifecycle::Starting | Lifecycle::Running | Lifecycle::Stopping => (),
		}

		info2!("Coordinator - shutting down...");
		self.signal_shutdown();

		let handles = std::mem::take(&mut *self.handles.lock());
		for (kind, handle) in handles {
			debug2!("Coordinator - joining {kind} thread...");
			match handle.join() {
				Ok(()) => debug2!("Coordinator - {kind} thread joined"),
				Err(payload) => error2!("Coordinator - {kind} thread panicked: {}", panic_message(&*payload)),
			}
		}

		self.threads.shared.lifecycle.store(Lifecycle::Stopped);
		info2!("Coordinator - shutdown ... OK");
	}

	/// Set the shutdown flag and release everything blocked on us.
	fn signal_shutdown(&self) {
		let shared = &self.threads.shared;

		shared.shutdown.store(true, Ordering::Release);
		shared.lifecycle.store(Lifecycle::Stopping);

		shared.frame.close();
		shared.game_queue.shutdown();
		shared.render_queue.shutdown();
	}
}

//---------------------------------------------------------------------------------------------------- Drop
impl Drop for ThreadCoordinator {
	#[cold]
	#[inline(never)]
	fn drop(&mut self) {
		self.shutdown();
	}
}
