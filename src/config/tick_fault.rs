//! What a worker does when its tick callback panics.

//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumString,
	IntoStaticStr,
};

#[allow(unused_imports)] // docs
use crate::{
	ThreadCoordinator,
	config::InitConfig,
};

//---------------------------------------------------------------------------------------------------- TickFault
/// The action a worker thread takes when its tick callback panics.
///
/// Every iteration runs the tick callback inside a panic boundary.
/// A caught panic is always logged and counted in
/// [`crate::ThreadStats::faults`], then one of these applies.
///
/// Set once in [`InitConfig`], applies to both workers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,EnumString,IntoStaticStr)]
pub enum TickFault {
	#[default]
	/// Keep looping.
	///
	/// The rest of the iteration (command drain, pacing) runs as
	/// usual and the same callback is called again next iteration.
	Skip,

	/// End this worker's loop.
	///
	/// The thread exits, the other worker keeps running, and
	/// [`ThreadCoordinator::shutdown`] still joins it normally.
	///
	/// The worker's command queue is shut down with it: pending
	/// commands are dropped unexecuted, and further dispatches to
	/// that thread return [`crate::Dispatch::Dropped`].
	Stop,
}

impl TickFault {
	/// ```rust
	/// # use duet::config::*;
	/// assert!(TickFault::DEFAULT.is_skip());
	/// ```
	pub const DEFAULT: Self = Self::Skip;

	#[must_use]
	/// Returns `true` if `self == TickFault::Skip`
	pub const fn is_skip(&self) -> bool {
		matches!(self, Self::Skip)
	}

	#[must_use]
	/// Returns `true` if `self == TickFault::Stop`
	pub const fn is_stop(&self) -> bool {
		matches!(self, Self::Stop)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_skip() {
		assert_eq!(TickFault::default(), TickFault::DEFAULT);
		assert!(TickFault::Stop.is_stop());
		assert!(!TickFault::Stop.is_skip());
		assert_eq!(TickFault::Stop.as_ref(), "Stop");
	}
}
