//----------------------------------------------------------------------------------------------------
// Global macros for internal duet usage.

//---------------------------------------------------------------------------------------------------- Logging
// Logs with `log` but only if the log feature is enabled.

macro_rules! error2 {
	($($arg:tt)+) => {{
		#[cfg(feature = "log")]
		::log::error!($($arg)+);
	}};
}
pub(crate) use error2;

macro_rules! warn2 {
	($($arg:tt)+) => {{
		#[cfg(feature = "log")]
		::log::warn!($($arg)+);
	}};
}
pub(crate) use warn2;

macro_rules! info2 {
	($($arg:tt)+) => {{
		#[cfg(feature = "log")]
		::log::info!($($arg)+);
	}};
}
pub(crate) use info2;

macro_rules! debug2 {
	($($arg:tt)+) => {{
		#[cfg(feature = "log")]
		::log::debug!($($arg)+);
	}};
}
pub(crate) use debug2;

macro_rules! trace2 {
	($($arg:tt)+) => {{
		#[cfg(feature = "log")]
		::log::trace!($($arg)+);
	}};
}
pub(crate) use trace2;

//---------------------------------------------------------------------------------------------------- Panics
// Render a `catch_unwind()` payload as text for logging.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
	if let Some(s) = payload.downcast_ref::<&'static str>() {
		s
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.as_str()
	} else {
		"<non-string panic payload>"
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn panic_message_str_and_string() {
		let e = std::panic::catch_unwind(|| panic!("static")).unwrap_err();
		assert_eq!(panic_message(&*e), "static");

		let n = 5;
		let e = std::panic::catch_unwind(|| panic!("formatted {n}")).unwrap_err();
		assert_eq!(panic_message(&*e), "formatted 5");

		let e = std::panic::catch_unwind(|| std::panic::panic_any(5_u8)).unwrap_err();
		assert_eq!(panic_message(&*e), "<non-string panic payload>");
	}
}
