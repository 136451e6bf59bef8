//! Seeded linear-congruential generator for reproducible layout jitter.

/// Default layout seed.
pub const DEFAULT_SEED: u64 = 42;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Small LCG producing values in `[0, 1)`.
///
/// Quality is irrelevant here; only reproducibility matters.
#[derive(Clone, Debug)]
pub struct Lcg {
	state: u64,
}

impl Lcg {
	/// Generator starting from `seed`.
	pub fn new(seed: u64) -> Self {
		Self {
			state: seed % MODULUS,
		}
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
		self.state as f64 / MODULUS as f64
	}
}

impl Default for Lcg {
	fn default() -> Self {
		Self::new(DEFAULT_SEED)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sequence_is_reproducible() {
		let mut a = Lcg::default();
		let mut b = Lcg::new(DEFAULT_SEED);
		for _ in 0..100 {
			assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
		}
	}

	#[test]
	fn first_values_match_the_recurrence() {
		let mut rng = Lcg::default();
		// (42 * 9301 + 49297) % 233280 = 206659
		assert_eq!(rng.next_f64(), 206_659.0 / 233_280.0);
		// (206659 * 9301 + 49297) % 233280
		let expected = ((206_659u64 * 9301 + 49297) % 233_280) as f64 / 233_280.0;
		assert_eq!(rng.next_f64(), expected);
	}

	#[test]
	fn values_stay_in_unit_interval() {
		let mut rng = Lcg::new(7);
		for _ in 0..10_000 {
			let v = rng.next_f64();
			assert!((0.0..1.0).contains(&v));
		}
	}
}
