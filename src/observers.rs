use hashbrown::HashMap;
use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};
use tracing::trace;

/// The subscribe-to-changes capability a view-model exposes.
///
/// A change notification means one or more fields *may* have changed; it carries no payload.
/// Views re-read the fields they care about and diff against their own snapshot.
pub trait Observable {
	fn subscribe(&self, handler: Rc<dyn Fn()>) -> Subscription;
}

/// A registry of change handlers, for view-model implementors to delegate [`Observable`] to.
pub struct ObserverList(Rc<RefCell<Registry>>);

struct Registry {
	next_key: u64,
	handlers: HashMap<u64, Rc<dyn Fn()>>,
}

impl ObserverList {
	#[must_use]
	pub fn new() -> Self {
		Self(Rc::new(RefCell::new(Registry {
			next_key: 0,
			handlers: HashMap::new(),
		})))
	}

	/// Invokes every registered handler.
	pub fn notify(&self) {
		// Handlers are cloned out before the walk so one may drop its own `Subscription`.
		let handlers = self.0.borrow().handlers.values().cloned().collect::<Vec<_>>();
		for handler in handlers {
			handler();
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.borrow().handlers.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.borrow().handlers.is_empty()
	}
}

impl Default for ObserverList {
	fn default() -> Self {
		Self::new()
	}
}

impl Observable for ObserverList {
	fn subscribe(&self, handler: Rc<dyn Fn()>) -> Subscription {
		let mut registry = self.0.borrow_mut();
		let key = registry.next_key;
		registry.next_key += 1;
		registry.handlers.insert(key, handler);
		trace!("Registered change handler {}.", key);
		Subscription {
			registry: Rc::downgrade(&self.0),
			key,
		}
	}
}

/// Deregisters its handler when dropped. The handler is never invoked afterwards.
///
/// Outliving the [`ObserverList`] is fine; dropping the guard is a no-op then.
#[must_use = "dropping a `Subscription` immediately deregisters its handler"]
pub struct Subscription {
	registry: Weak<RefCell<Registry>>,
	key: u64,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry.borrow_mut().handlers.remove(&self.key);
			trace!("Deregistered change handler {}.", self.key);
		}
	}
}
