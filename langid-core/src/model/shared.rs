use std::sync::{Arc, PoisonError, RwLock};

use super::registry::LanguageRegistry;

/// Hot-swappable handle on an immutable `LanguageRegistry`.
///
/// Readers take a snapshot (`Arc`) and score against it without holding any
/// lock. A reload builds a complete registry elsewhere and swaps it in with
/// [`SharedRegistry::replace`]; snapshots taken before the swap keep using
/// the old registry until they are dropped.
#[derive(Debug)]
pub struct SharedRegistry {
	current: RwLock<Arc<LanguageRegistry>>,
}

impl SharedRegistry {
	pub fn new(registry: LanguageRegistry) -> Self {
		Self { current: RwLock::new(Arc::new(registry)) }
	}

	/// Returns the registry currently in use.
	pub fn snapshot(&self) -> Arc<LanguageRegistry> {
		// The guarded value is only ever swapped whole, a poisoned lock still
		// holds a complete registry
		self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
	}

	/// Swaps in a new registry and returns the previous one.
	pub fn replace(&self, registry: LanguageRegistry) -> Arc<LanguageRegistry> {
		let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
		std::mem::replace(&mut *current, Arc::new(registry))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixtures::{sample_language, sample_registry};

	#[test]
	fn old_snapshots_survive_a_swap() {
		let shared = SharedRegistry::new(sample_registry());
		let before = shared.snapshot();

		let mut next = LanguageRegistry::new();
		next.add(sample_language());
		let previous = shared.replace(next);

		assert_eq!(before.ids(), ["testlang1", "testlang2"]);
		assert!(Arc::ptr_eq(&before, &previous));
		assert_eq!(shared.snapshot().ids(), ["aa-BB"]);
	}

	#[test]
	fn snapshots_are_shared_across_threads() {
		let shared = Arc::new(SharedRegistry::new(sample_registry()));
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let shared = Arc::clone(&shared);
				std::thread::spawn(move || {
					let registry = shared.snapshot();
					registry.identify("abcd", &Default::default()).map(|r| r.langid)
				})
			})
			.collect();

		for handle in handles {
			assert_eq!(handle.join().unwrap().unwrap(), "testlang1");
		}
	}
}
