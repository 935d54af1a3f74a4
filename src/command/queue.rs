//! Thread-safe FIFO of [`Command`]s.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	collections::VecDeque,
	panic::{catch_unwind,AssertUnwindSafe},
	sync::atomic::{AtomicBool,AtomicU64,Ordering},
	time::Duration,
};
use parking_lot::{Condvar,Mutex};
use crate::{
	command::{Command,CommandKind},
	macros::{warn2,error2,trace2,debug2,panic_message},
};

//---------------------------------------------------------------------------------------------------- CommandQueue
/// A thread-safe FIFO of deferred [`Command`]s.
///
/// Any thread may produce ([`CommandQueue::enqueue`]), exactly one
/// thread is expected to consume ([`CommandQueue::execute_all`]);
/// with a [`crate::ThreadCoordinator`] that is the render thread.
///
/// Commands run in the order their enqueue acquired the internal lock.
/// Two producers racing each other get an unspecified (but total) order.
///
/// After [`CommandQueue::shutdown`], enqueues are dropped and logged.
pub struct CommandQueue {
	/// Pending commands, oldest first.
	pending: Mutex<VecDeque<Command>>,
	/// Signaled on enqueue and shutdown.
	available: Condvar,
	/// INVARIANT: only written while `pending` is locked,
	/// so a waiter checking it under the lock never misses it.
	shutdown: AtomicBool,
	/// Total commands that ran to completion.
	executed: AtomicU64,
	/// Total commands that panicked.
	failed: AtomicU64,
}

//---------------------------------------------------------------------------------------------------- CommandQueue Impl
impl CommandQueue {
	#[cold]
	#[inline(never)]
	#[must_use]
	/// Create a new, empty queue.
	pub fn new() -> Self {
		Self {
			pending: Mutex::new(VecDeque::new()),
			available: Condvar::new(),
			shutdown: AtomicBool::new(false),
			executed: AtomicU64::new(0),
			failed: AtomicU64::new(0),
		}
	}

	//---------------------------------------------------------------------------------------------------- Producer
	/// Append a command to the back of the queue and wake one waiting consumer.
	///
	/// This is a no-op (logged as a warning) if the queue has been shut down.
	pub fn enqueue<F>(&self, kind: CommandKind, f: F)
	where
		F: FnOnce() + Send + 'static
	{
		self.push(Command::new(kind, f));
	}

	/// Append an already constructed [`Command`].
	///
	/// Same as [`CommandQueue::enqueue`].
	pub fn push(&self, command: Command) {
		self.try_push(command);
	}

	/// [`CommandQueue::push`], returning `false` if the command was dropped.
	pub(crate) fn try_push(&self, command: Command) -> bool {
		{
			let mut pending = self.pending.lock();
			if self.shutdown.load(Ordering::Acquire) {
				drop(pending);
				warn2!("Queue - enqueue of {} command after shutdown, dropping", command.kind());
				return false;
			}
			pending.push_back(command);
		}

		self.available.notify_one();
		true
	}

	/// Append many commands in a single critical section.
	///
	/// The whole batch becomes visible to the consumer at once, keeps
	/// its relative order, and lands after everything enqueued before it.
	///
	/// This is a no-op (logged as a warning) if the queue has been shut down.
	pub fn enqueue_batch<I>(&self, commands: I)
	where
		I: IntoIterator<Item = Command>,
	{
		// Box everything up before taking the lock.
		let commands: Vec<Command> = commands.into_iter().collect();
		if commands.is_empty() {
			return;
		}

		{
			let mut pending = self.pending.lock();
			if self.shutdown.load(Ordering::Acquire) {
				drop(pending);
				warn2!("Queue - enqueue of {} batched commands after shutdown, dropping", commands.len());
				return;
			}
			pending.extend(commands);
		}

		self.available.notify_one();
	}

	/// Wake one thread blocked in [`CommandQueue::wait_for_commands`]
	/// without enqueueing anything.
	///
	/// The woken thread re-checks its condition, so unless there are
	/// commands (or the queue is shut down) it goes back to sleep.
	pub fn notify_commands_available(&self) {
		self.available.notify_one();
	}

	//---------------------------------------------------------------------------------------------------- Consumer
	/// Drain and execute every command pending at the moment of the call.
	///
	/// The pending sequence is swapped out under the lock and then run
	/// without it, so producers are never blocked by command execution.
	/// Commands enqueued while this runs (including by the commands
	/// themselves) stay queued for the next call.
	///
	/// A command that panics is logged and counted, the
	/// rest of the drained commands still execute.
	pub fn execute_all(&self) {
		let drained = std::mem::take(&mut *self.pending.lock());
		if drained.is_empty() {
			return;
		}

		let count = drained.len();
		let mut failed: u64 = 0;

		for command in drained {
			let kind = command.kind();
			if let Err(payload) = catch_unwind(AssertUnwindSafe(|| command.execute())) {
				failed += 1;
				error2!("Queue - {kind} command panicked: {}", panic_message(&*payload));
			}
		}

		let ok = count as u64 - failed;
		self.executed.fetch_add(ok, Ordering::Relaxed);
		self.failed.fetch_add(failed, Ordering::Relaxed);

		trace2!("Queue - executed {count} commands ({failed} failed)");
	}

	/// Call [`CommandQueue::execute_all`] until the queue is observed empty.
	///
	/// With other producers still running this is best-effort: a command
	/// may land right after the final emptiness check.
	///
	/// A command that re-enqueues itself on every run will keep this looping forever.
	pub fn execute_until_empty(&self) {
		while !self.is_empty() {
			self.execute_all();
		}
	}

	/// Block until the queue is non-empty or shut down.
	pub fn wait_for_commands(&self) {
		let mut pending = self.pending.lock();
		self.available.wait_while(&mut pending, |p| p.is_empty() && !self.shutdown.load(Ordering::Acquire));
	}

	/// Same as [`CommandQueue::wait_for_commands`], but gives up after `timeout`.
	///
	/// Returns `true` if the queue is non-empty or shut down,
	/// `false` if the timeout elapsed first.
	pub fn wait_for_commands_timeout(&self, timeout: Duration) -> bool {
		let mut pending = self.pending.lock();
		self.available.wait_while_for(&mut pending, |p| p.is_empty() && !self.shutdown.load(Ordering::Acquire), timeout);
		!pending.is_empty() || self.shutdown.load(Ordering::Acquire)
	}

	//---------------------------------------------------------------------------------------------------- Lifecycle
	/// Drop all pending commands without executing them.
	pub fn clear(&self) {
		let dropped = std::mem::take(&mut *self.pending.lock());
		if !dropped.is_empty() {
			debug2!("Queue - cleared {} pending commands", dropped.len());
		}
		// `dropped` (and the closures' captures) are freed outside the lock.
	}

	/// Shut the queue down.
	///
	/// Further enqueues become no-ops, all waiting consumers are
	/// released, and pending commands are dropped unexecuted.
	///
	/// Calling this more than once is harmless.
	pub fn shutdown(&self) {
		let dropped = {
			let mut pending = self.pending.lock();
			if self.shutdown.swap(true, Ordering::AcqRel) {
				return;
			}
			std::mem::take(&mut *pending)
		};

		self.available.notify_all();
		debug2!("Queue - shutdown, dropped {} pending commands", dropped.len());
	}

	//---------------------------------------------------------------------------------------------------- Snapshots
	#[must_use]
	/// Number of pending commands.
	///
	/// Advisory only, it may be stale by the time it is read.
	pub fn len(&self) -> usize {
		self.pending.lock().len()
	}

	#[must_use]
	/// Whether there are no pending commands.
	///
	/// Advisory only, it may be stale by the time it is read.
	pub fn is_empty(&self) -> bool {
		self.pending.lock().is_empty()
	}

	#[must_use]
	/// Whether [`CommandQueue::shutdown`] has been called.
	pub fn is_shutdown(&self) -> bool {
		self.shutdown.load(Ordering::Acquire)
	}

	#[must_use]
	/// Total commands executed without panicking, over the queue's lifetime.
	pub fn executed(&self) -> u64 {
		self.executed.load(Ordering::Relaxed)
	}

	#[must_use]
	/// Total commands that panicked, over the queue's lifetime.
	pub fn failed(&self) -> u64 {
		self.failed.load(Ordering::Relaxed)
	}
}

impl Default for CommandQueue {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for CommandQueue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CommandQueue")
			.field("len", &self.len())
			.field("shutdown", &self.is_shutdown())
			.field("executed", &self.executed())
			.field("failed", &self.failed())
			.finish()
	}
}

//---------------------------------------------------------------------------------------------------- Macro
/// Enqueue a closure on a [`CommandQueue`] with a [`CommandKind`] variant name.
///
/// ```rust
/// # use duet::{CommandQueue, enqueue_render_command};
/// let queue = CommandQueue::new();
/// enqueue_render_command!(queue, UpdateCamera, || {});
/// assert_eq!(queue.len(), 1);
/// ```
#[macro_export]
macro_rules! enqueue_render_command {
	($queue:expr, $kind:ident, $f:expr $(,)?) => {
		$queue.enqueue($crate::command::CommandKind::$kind, $f)
	};
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::OrderLog;
	use pretty_assertions::assert_eq;
	use std::sync::{Arc, Barrier};
	use std::thread;
	use std::time::Instant;

	// Enqueue a command that appends `s` to `string`.
	fn push_str(queue: &CommandQueue, string: &Arc<Mutex<String>>, s: &'static str) {
		let string = Arc::clone(string);
		queue.enqueue(CommandKind::Custom, move || string.lock().push_str(s));
	}

	#[test]
	fn abc_then_de() {
		let queue = CommandQueue::new();
		let string = Arc::new(Mutex::new(String::new()));

		push_str(&queue, &string, "A");
		push_str(&queue, &string, "B");
		push_str(&queue, &string, "C");
		assert_eq!(queue.len(), 3);
		queue.execute_all();
		assert_eq!(*string.lock(), "ABC");
		assert!(queue.is_empty());

		push_str(&queue, &string, "D");
		push_str(&queue, &string, "E");
		queue.execute_all();
		assert_eq!(*string.lock(), "ABCDE");
		assert_eq!(queue.executed(), 5);
		assert_eq!(queue.failed(), 0);
	}

	#[test]
	fn fifo_across_drains() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();

		for i in 0..100 {
			queue.enqueue(CommandKind::Draw, log.push(i));
			if i % 17 == 0 {
				queue.execute_all();
			}
		}
		queue.execute_all();

		assert_eq!(log.take(), (0..100).collect::<Vec<_>>());
	}

	#[test]
	fn fifo_sequenced_producers() {
		// Each producer thread finishes before the next one starts,
		// so enqueue-completion order is 0..N.
		let queue = Arc::new(CommandQueue::new());
		let log = OrderLog::new();

		for i in 0..20 {
			let q = Arc::clone(&queue);
			let f = log.push(i);
			thread::spawn(move || q.enqueue(CommandKind::Custom, f)).join().unwrap();
		}

		queue.execute_until_empty();
		assert_eq!(log.take(), (0..20).collect::<Vec<_>>());
	}

	#[test]
	fn concurrent_producers_keep_per_producer_order() {
		const PRODUCERS: usize = 4;
		const PER: usize = 250;

		let queue = Arc::new(CommandQueue::new());
		let log = OrderLog::new();
		let barrier = Arc::new(Barrier::new(PRODUCERS));

		let handles: Vec<_> = (0..PRODUCERS).map(|p| {
			let queue = Arc::clone(&queue);
			let log = log.clone();
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				for i in 0..PER {
					queue.enqueue(CommandKind::Custom, log.push(p * PER + i));
				}
			})
		}).collect();

		for h in handles {
			h.join().unwrap();
		}
		queue.execute_until_empty();

		let order = log.take();
		assert_eq!(order.len(), PRODUCERS * PER);
		for p in 0..PRODUCERS {
			let mine: Vec<usize> = order.iter().copied().filter(|i| i / PER == p).collect();
			assert_eq!(mine, (p * PER..(p + 1) * PER).collect::<Vec<_>>());
		}
	}

	#[test]
	fn batch_lands_after_previous_commands() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();

		queue.enqueue(CommandKind::Draw, log.push(0));
		queue.enqueue_batch((1..5).map(|i| Command::new(CommandKind::UpdateUniforms, log.push(i))));
		queue.enqueue(CommandKind::Draw, log.push(5));
		assert_eq!(queue.len(), 6);

		// Empty batches are ignored.
		queue.enqueue_batch(Vec::new());
		assert_eq!(queue.len(), 6);

		queue.execute_all();
		assert_eq!(log.take(), vec![0, 1, 2, 3, 4, 5]);
	}

	#[test]
	fn panicking_command_is_isolated() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();

		queue.enqueue(CommandKind::Custom, log.push(0));
		queue.enqueue(CommandKind::Custom, log.push(1));
		queue.enqueue(CommandKind::Custom, || panic!("command 2 failed"));
		queue.enqueue(CommandKind::Custom, log.push(3));
		queue.enqueue(CommandKind::Custom, log.push(4));
		queue.execute_all();

		assert_eq!(log.take(), vec![0, 1, 3, 4]);
		assert_eq!(queue.executed(), 4);
		assert_eq!(queue.failed(), 1);

		// Still usable.
		queue.enqueue(CommandKind::Custom, log.push(5));
		queue.execute_all();
		assert_eq!(log.take(), vec![5]);
		assert_eq!(queue.executed(), 5);
	}

	#[test]
	fn commands_enqueued_while_draining_wait_for_next_drain() {
		let queue = Arc::new(CommandQueue::new());
		let log = OrderLog::new();

		let q = Arc::clone(&queue);
		let inner = log.push(1);
		let outer = log.push(0);
		queue.enqueue(CommandKind::Custom, move || {
			outer();
			q.enqueue(CommandKind::Custom, inner);
		});

		queue.execute_all();
		assert_eq!(log.take(), vec![0]);
		assert_eq!(queue.len(), 1);

		queue.execute_until_empty();
		assert_eq!(log.take(), vec![1]);
		assert!(queue.is_empty());
	}

	#[test]
	fn execute_until_empty_runs_each_once() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();
		for i in 0..10 {
			queue.enqueue(CommandKind::Custom, log.push(i));
		}
		queue.execute_until_empty();
		queue.execute_until_empty();
		assert_eq!(log.take(), (0..10).collect::<Vec<_>>());
		assert_eq!(queue.len(), 0);
	}

	#[test]
	fn clear_drops_without_executing() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();
		queue.enqueue(CommandKind::Custom, log.push(0));
		queue.enqueue(CommandKind::Custom, log.push(1));
		queue.clear();
		assert!(queue.is_empty());
		queue.execute_all();
		assert!(log.take().is_empty());
		assert!(!queue.is_shutdown());
	}

	#[test]
	fn enqueue_after_shutdown_is_noop() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();
		queue.enqueue(CommandKind::Custom, log.push(0));

		queue.shutdown();
		assert!(queue.is_shutdown());
		assert_eq!(queue.len(), 0);

		queue.enqueue(CommandKind::Custom, log.push(1));
		queue.enqueue_batch([Command::new(CommandKind::Draw, log.push(2))]);
		assert_eq!(queue.len(), 0);

		queue.execute_all();
		assert!(log.take().is_empty());

		// Idempotent.
		queue.shutdown();
		assert!(queue.is_shutdown());
		assert_eq!(queue.len(), 0);
	}

	#[test]
	fn wait_for_commands_released_by_enqueue() {
		let queue = Arc::new(CommandQueue::new());
		let q = Arc::clone(&queue);

		let consumer = thread::spawn(move || {
			q.wait_for_commands();
			q.len()
		});

		thread::sleep(Duration::from_millis(20));
		queue.enqueue(CommandKind::Draw, || {});
		assert_eq!(consumer.join().unwrap(), 1);
	}

	#[test]
	fn wait_for_commands_released_by_shutdown() {
		let queue = Arc::new(CommandQueue::new());

		let waiters: Vec<_> = (0..3).map(|_| {
			let q = Arc::clone(&queue);
			thread::spawn(move || q.wait_for_commands())
		}).collect();

		thread::sleep(Duration::from_millis(20));
		queue.shutdown();
		for w in waiters {
			w.join().unwrap();
		}
	}

	#[test]
	fn wait_for_commands_timeout() {
		let queue = CommandQueue::new();

		let now = Instant::now();
		assert!(!queue.wait_for_commands_timeout(Duration::from_millis(20)));
		assert!(now.elapsed() >= Duration::from_millis(20));

		queue.notify_commands_available();
		queue.enqueue(CommandKind::Custom, || {});
		assert!(queue.wait_for_commands_timeout(Duration::from_millis(20)));

		queue.shutdown();
		assert!(queue.wait_for_commands_timeout(Duration::from_secs(5)));
	}

	#[test]
	fn macro_uses_kind_name() {
		let queue = CommandQueue::new();
		let log = OrderLog::new();
		crate::enqueue_render_command!(queue, UpdateViewport, log.push(7));
		crate::enqueue_render_command!(&queue, Draw, log.push(8),);
		queue.execute_all();
		assert_eq!(log.take(), vec![7, 8]);
	}
}
