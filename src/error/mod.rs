//! Errors returned by the [`crate::ThreadCoordinator`].

mod init;
pub use init::InitError;

mod thread;
pub use thread::ThreadError;

mod frame;
pub use frame::FrameWaitError;
