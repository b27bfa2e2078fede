use crate::observers::{Observable, Subscription};
use std::rc::Rc;
use tracing::warn;

/// Options passed through the view-composition layer at mount time.
#[derive(Clone, Copy, Debug, Default)]
pub struct MountOptions {
	/// The parent view invokes `update` itself, so the mounted view must not subscribe
	/// to change notifications on its own.
	pub parent_provides_updates: bool,
}

/// Base behavior for views that re-render in response to view-model change notifications:
/// holds the change subscription from mount to unmount.
///
/// The subscription is also released when the tracking view is dropped.
#[derive(Default)]
pub struct ChangeTrackingView {
	subscription: Option<Subscription>,
}

impl ChangeTrackingView {
	#[must_use]
	pub fn new() -> Self {
		Self { subscription: None }
	}

	/// Registers `on_change` with `value`, unless the parent provides updates.
	pub fn mount(&mut self, value: &dyn Observable, options: MountOptions, on_change: Rc<dyn Fn()>) {
		if options.parent_provides_updates {
			return;
		}
		if self.subscription.is_some() {
			warn!("Mounting an already-mounted tracking view. Replacing the previous subscription.");
		}
		self.subscription = Some(value.subscribe(on_change));
	}

	pub fn unmount(&mut self) {
		self.subscription = None;
	}

	#[must_use]
	pub fn is_tracking(&self) -> bool {
		self.subscription.is_some()
	}
}
