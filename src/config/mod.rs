//! Initialization & runtime configuration for the [`ThreadCoordinator`].

#[allow(unused_imports)] // docs
use crate::ThreadCoordinator;

mod callbacks;
pub use callbacks::{Callbacks,TickFn,ThreadStartFn};

mod tick_fault;
pub use tick_fault::TickFault;

mod init_config;
pub use init_config::InitConfig;

mod live_config;
pub use live_config::LiveConfig;

mod constants;
