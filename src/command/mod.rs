//! Deferred commands and the queue that carries them between threads.
//!
//! A [`Command`] is a closure tagged with a [`CommandKind`].
//! A [`CommandQueue`] is a FIFO of them: any thread enqueues,
//! one thread drains with [`CommandQueue::execute_all`].

mod command;
pub use command::{Command,CommandKind};

mod queue;
pub use queue::CommandQueue;
