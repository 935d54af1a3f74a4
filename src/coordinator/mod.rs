//! The game and render worker threads, and the coordinator that owns them.

mod kind;
pub use kind::{ThreadKind,Lifecycle,Dispatch,ThreadStats};

mod coordinator;
pub use coordinator::ThreadCoordinator;

mod threads;
pub use threads::Threads;

mod init;
mod shutdown;

mod frame;
mod shared;
mod worker;
