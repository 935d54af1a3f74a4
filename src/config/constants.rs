//! Default values for [`crate::config::InitConfig`].

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Constants
/// Target ticks per second for both the game and render loop.
pub(crate) const DEFAULT_FPS: f32 = 60.0;

/// Upper bound on the delta time handed to a tick callback.
///
/// A single long stall (e.g. a debugger pause) is
/// reported as at most this much simulated time.
pub(crate) const MAX_DELTA: Duration = Duration::from_millis(100);

/// How long [`crate::ThreadCoordinator::initialize`] waits
/// for each worker to report ready before failing.
pub(crate) const INIT_TIMEOUT: Duration = Duration::from_secs(5);
