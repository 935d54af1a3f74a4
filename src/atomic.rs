// An AtomicF32 implementation.
//
// This internally uses [AtomicU32], where the
// u32 is the bit pattern of the internal float.
//
// This uses [.to_bits()] and [from_bits()] to
// convert between actual floats, and the bit
// representations for storage.

//---------------------------------------------------------------------------------------------------- Use
use std::sync::atomic::{AtomicU32,Ordering};

//---------------------------------------------------------------------------------------------------- AtomicF32
pub(crate) struct AtomicF32(AtomicU32);

impl AtomicF32 {
	#[inline]
	pub(crate) fn new(f: f32) -> Self {
		Self(AtomicU32::new(f.to_bits()))
	}

	#[inline]
	pub(crate) fn store(&self, f: f32, ordering: Ordering) {
		self.0.store(f.to_bits(), ordering);
	}

	#[inline]
	pub(crate) fn load(&self, ordering: Ordering) -> f32 {
		f32::from_bits(self.0.load(ordering))
	}

	#[inline]
	pub(crate) fn set(&self, f: f32) {
		self.store(f, Ordering::Release);
	}

	#[inline]
	pub(crate) fn get(&self) -> f32 {
		self.load(Ordering::Acquire)
	}
}

impl std::fmt::Debug for AtomicF32 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("AtomicF32")
			.field(&self.load(Ordering::Relaxed))
			.finish()
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_matches_bits() {
		let f = AtomicF32::new(60.0);
		assert_eq!(f.get(), 60.0);
		assert_eq!(f.0.load(Ordering::Relaxed), 60.0_f32.to_bits());
	}

	#[test]
	fn f32_0_to_100() {
		let mut i = 0.0;
		let f = AtomicF32::new(0.0);
		while i < 100.0 {
			f.set(i);
			assert_eq!(f.get(), i);
			i += 0.1;
		}
	}

	#[test]
	fn non_finite_survives() {
		let f = AtomicF32::new(f32::INFINITY);
		assert_eq!(f.get(), f32::INFINITY);
		f.set(f32::NAN);
		assert!(f.get().is_nan());
	}
}
