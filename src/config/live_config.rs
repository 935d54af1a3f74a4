//! Runtime-adjustable settings.

//---------------------------------------------------------------------------------------------------- Use
use crate::config::constants::DEFAULT_FPS;

#[allow(unused_imports)] // docs
use crate::ThreadCoordinator;

//---------------------------------------------------------------------------------------------------- LiveConfig
/// Settings that can be changed while the workers are running.
///
/// Read with [`crate::Threads::config`], replace with
/// [`crate::Threads::config_update`]. Each worker picks
/// up changes at the start of its next iteration.
///
/// A frame rate that is not finite or not positive
/// (`0.0`, negative, `NaN`, `INFINITY`) disables pacing:
/// that loop runs as fast as it can.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd)]
pub struct LiveConfig {
	/// Target game loop iterations per second.
	pub game_fps: f32,
	/// Target render loop iterations per second.
	pub render_fps: f32,
}

impl LiveConfig {
	/// ```rust
	/// # use duet::config::*;
	/// assert_eq!(LiveConfig::DEFAULT.game_fps, 60.0);
	/// assert_eq!(LiveConfig::DEFAULT.render_fps, 60.0);
	/// ```
	pub const DEFAULT: Self = Self {
		game_fps: DEFAULT_FPS,
		render_fps: DEFAULT_FPS,
	};
}

impl Default for LiveConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}
