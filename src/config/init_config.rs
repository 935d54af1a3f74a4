//! Construction-time configuration.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use crate::config::{
	Callbacks,
	LiveConfig,
	TickFault,
	constants::{MAX_DELTA,INIT_TIMEOUT},
};

#[allow(unused_imports)] // docs
use crate::{ThreadCoordinator,error::InitError};

//---------------------------------------------------------------------------------------------------- InitConfig
/// Initialization config for the [`ThreadCoordinator`].
///
/// This is passed once to [`ThreadCoordinator::new`] and used
/// for the rest of the coordinator's lifetime, except for the
/// [`LiveConfig`] part and the tick callbacks which can be
/// changed at runtime.
#[derive(Debug)]
pub struct InitConfig {
	/// Tick callbacks and the thread start hook.
	pub callbacks: Callbacks,

	/// Initial frame rates.
	pub live: LiveConfig,

	/// Upper bound on the delta time passed to tick callbacks.
	///
	/// The measured time between iterations is clamped to this,
	/// so a long stall doesn't produce one huge simulation step.
	pub max_delta: Duration,

	/// How long [`ThreadCoordinator::initialize`] waits for
	/// the workers to report ready.
	///
	/// If a worker does not report in time, `initialize` returns
	/// [`InitError::InitializationTimeout`] and the coordinator
	/// goes back to not-started.
	///
	/// Note that [`Callbacks::thread_start`] runs before a worker
	/// reports ready, so it counts against this timeout.
	pub init_timeout: Duration,

	/// What a worker does when its tick callback panics.
	pub tick_fault: TickFault,
}

//---------------------------------------------------------------------------------------------------- InitConfig Impl
impl InitConfig {
	/// A reasonable default [`InitConfig`].
	///
	/// ```rust
	/// # use duet::config::*;
	/// InitConfig {
	///     callbacks:    Callbacks::DEFAULT,
	///     live:         LiveConfig::DEFAULT,
	///     max_delta:    std::time::Duration::from_millis(100),
	///     init_timeout: std::time::Duration::from_secs(5),
	///     tick_fault:   TickFault::Skip,
	/// };
	/// ```
	pub const DEFAULT: Self = Self {
		callbacks:    Callbacks::DEFAULT,
		live:         LiveConfig::DEFAULT,
		max_delta:    MAX_DELTA,
		init_timeout: INIT_TIMEOUT,
		tick_fault:   TickFault::DEFAULT,
	};
}

impl Default for InitConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}
