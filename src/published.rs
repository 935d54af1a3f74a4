//! A latest-value cell for handing snapshots between threads.

//---------------------------------------------------------------------------------------------------- Use
use parking_lot::Mutex;

//---------------------------------------------------------------------------------------------------- Published
/// The latest value of `T`, plus how many times it was published.
///
/// One thread (e.g. the game thread) publishes snapshots, other
/// threads (e.g. the render thread) read the newest one whenever
/// they want. Readers never see a half-written value, and can use
/// the version to skip work if nothing changed since their last read.
///
/// ```rust
/// # use duet::Published;
/// let camera = Published::new([0.0_f32; 16]);
/// assert_eq!(camera.version(), 0);
///
/// let mut view = [0.0_f32; 16];
/// view[0] = 1.0;
/// assert_eq!(camera.publish(view), 1);
///
/// let (version, latest) = camera.get_versioned();
/// assert_eq!(version, 1);
/// assert_eq!(latest[0], 1.0);
/// ```
#[derive(Debug, Default)]
pub struct Published<T> {
	/// (version, value)
	inner: Mutex<(u64, T)>,
}

impl<T> Published<T> {
	#[must_use]
	/// Create a cell holding `value` at version `0`.
	pub const fn new(value: T) -> Self {
		Self { inner: Mutex::new((0, value)) }
	}

	/// Replace the value, returning the new version.
	pub fn publish(&self, value: T) -> u64 {
		let old;
		let version;
		{
			let mut inner = self.inner.lock();
			inner.0 += 1;
			version = inner.0;
			old = std::mem::replace(&mut inner.1, value);
		}
		// Don't run `T`'s destructor under the lock.
		drop(old);
		version
	}

	#[must_use]
	/// How many times a value was published.
	pub fn version(&self) -> u64 {
		self.inner.lock().0
	}

	/// Run `f` on the current value without cloning it.
	pub fn with<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&T) -> R
	{
		f(&self.inner.lock().1)
	}
}

impl<T: Clone> Published<T> {
	#[must_use]
	/// A copy of the current value.
	pub fn get(&self) -> T {
		self.inner.lock().1.clone()
	}

	#[must_use]
	/// A copy of the current value, and its version.
	pub fn get_versioned(&self) -> (u64, T) {
		let inner = self.inner.lock();
		(inner.0, inner.1.clone())
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::{sync::Arc, thread};

	#[test]
	fn publish_and_read() {
		let p = Published::new(String::from("a"));
		assert_eq!(p.get_versioned(), (0, "a".into()));

		assert_eq!(p.publish("b".into()), 1);
		assert_eq!(p.publish("c".into()), 2);
		assert_eq!(p.get(), "c");
		assert_eq!(p.version(), 2);
		assert_eq!(p.with(String::len), 1);
	}

	#[test]
	fn panic_inside_with_leaves_cell_usable() {
		let p = Arc::new(Published::new(1_u32));

		let p2 = Arc::clone(&p);
		let result = thread::spawn(move || p2.with(|_| panic!("reader died"))).join();
		assert!(result.is_err());

		assert_eq!(p.publish(2), 1);
		assert_eq!(p.get_versioned(), (1, 2));
	}

	#[test]
	fn readers_see_whole_values() {
		// Every published array is uniform, a torn read would not be.
		let p = Arc::new(Published::new([0_u64; 8]));

		let writer = {
			let p = Arc::clone(&p);
			thread::spawn(move || {
				for i in 1..=1_000 {
					p.publish([i; 8]);
				}
			})
		};

		let mut last = 0;
		while !writer.is_finished() {
			let (version, value) = p.get_versioned();
			assert!(value.iter().all(|v| *v == value[0]));
			assert_eq!(value[0], version);
			assert!(version >= last);
			last = version;
		}
		writer.join().unwrap();

		assert_eq!(p.get_versioned(), (1_000, [1_000; 8]));
	}
}
