//! Quiescence debouncing for resize events.
//!
//! Each trigger hands out a token and the host arms a one-shot timer carrying
//! it. When a timer fires, only the most recent token settles, so a burst of
//! triggers inside the quiet window yields a single action.

/// Token-based trailing-edge debouncer.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
	latest: u64,
	settled: u64,
}

impl Debouncer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a trigger. The returned token must be passed to [`Debouncer::settle`]
	/// when its timer fires.
	pub fn trigger(&mut self) -> u64 {
		self.latest += 1;
		self.latest
	}

	/// Returns `true` exactly once, for the latest token.
	pub fn settle(&mut self, token: u64) -> bool {
		if token != self.latest || self.settled == token {
			return false;
		}
		self.settled = token;
		true
	}

	pub fn is_pending(&self) -> bool {
		self.latest != self.settled
	}
}
