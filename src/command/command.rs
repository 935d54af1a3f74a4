//! Deferred units of work.

//---------------------------------------------------------------------------------------------------- Use
use std::fmt;
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

#[allow(unused_imports)] // docs
use crate::command::CommandQueue;

//---------------------------------------------------------------------------------------------------- CommandKind
/// The category of a [`Command`].
///
/// This is a diagnostic tag, it does not change how a
/// command is executed. It shows up in log lines and
/// can be used to group/count work.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
pub enum CommandKind {
	/// Record/submit draw calls.
	Draw,
	/// Upload new uniform data.
	UpdateUniforms,
	/// The viewport/swapchain size changed.
	UpdateViewport,
	/// New camera matrices are available.
	UpdateCamera,
	/// Create a GPU resource.
	CreateResource,
	/// Destroy a GPU resource.
	DestroyResource,
	#[default]
	/// Anything else.
	Custom,
}

//---------------------------------------------------------------------------------------------------- Command
/// Boxed, dynamically dispatched unit of work.
pub(crate) type CommandFn = Box<dyn FnOnce() + Send + 'static>;

/// A deferred unit of work: a closure tagged with a [`CommandKind`].
///
/// A `Command` is owned by the [`CommandQueue`] from enqueue
/// until it is drained, executed at most once, then dropped.
pub struct Command {
	kind: CommandKind,
	f: CommandFn,
}

impl Command {
	#[must_use]
	/// Create a new `Command`.
	///
	/// The closure must capture everything it needs,
	/// the queue does not pass it any context.
	pub fn new<F>(kind: CommandKind, f: F) -> Self
	where
		F: FnOnce() + Send + 'static
	{
		Self { kind, f: Box::new(f) }
	}

	#[must_use]
	/// This command's category.
	pub const fn kind(&self) -> CommandKind {
		self.kind
	}

	#[inline]
	/// Consume and run this command.
	pub(crate) fn execute(self) {
		(self.f)();
	}
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("kind", &self.kind)
			.field("f", &"FnOnce()")
			.finish()
	}
}
