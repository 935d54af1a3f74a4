//! Game/render thread coordination.
//!
//! `duet` owns two long-lived worker threads, [`ThreadKind::Game`] and
//! [`ThreadKind::Render`], each running a paced tick loop, and a
//! thread-safe [`CommandQueue`] used to hand deferred work from
//! any thread to the render thread.
//!
//! There are no global singletons. The application constructs one
//! [`CommandQueue`] (shared with [`std::sync::Arc`]) and one
//! [`ThreadCoordinator`], and passes them to whatever needs them.
//!
//! ```rust,no_run
//! use duet::{
//! 	ThreadCoordinator,
//! 	command::{CommandQueue,CommandKind},
//! 	config::InitConfig,
//! };
//! use std::sync::Arc;
//!
//! let queue = Arc::new(CommandQueue::new());
//!
//! let mut config = InitConfig::DEFAULT;
//! config.callbacks.game_tick(|delta| {
//! 	// Simulate the world.
//! 	let _ = delta;
//! });
//!
//! let coordinator = ThreadCoordinator::new(config, Arc::clone(&queue));
//! coordinator.initialize().unwrap();
//!
//! // Runs on the next render iteration.
//! queue.enqueue(CommandKind::Draw, || println!("draw"));
//!
//! coordinator.shutdown();
//! ```

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
	clippy::len_zero,
	clippy::type_complexity,
	clippy::module_inception,
)]

#![deny(
	nonstandard_style,
	deprecated,
	missing_docs,
)]

#![forbid(
	unused_mut,
	unused_unsafe,
	future_incompatible,
	break_with_label_and_loop,
	coherence_leak_check,
	duplicate_macro_attributes,
	exported_private_dependencies,
	for_loops_over_fallibles,
	large_assignments,
	overlapping_range_endpoints,
	semicolon_in_expressions_from_macros,
	redundant_semicolons,
	unconditional_recursion,
	unreachable_patterns,
	unused_allocation,
	unused_braces,
	unused_comparisons,
	unused_doc_comments,
	unused_parens,
	unused_labels,
	while_true,
	keyword_idents,
	non_ascii_idents,
	noop_method_call,
	single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
pub mod command;
pub use command::CommandQueue;

mod coordinator;
pub use coordinator::{
	ThreadCoordinator,Threads,ThreadKind,
	Lifecycle,Dispatch,ThreadStats,
};

pub mod config;
pub mod error;

mod published;
pub use published::Published;

//---------------------------------------------------------------------------------------------------- Private Usage
mod atomic;
mod macros;

#[cfg(test)]
mod tests;
