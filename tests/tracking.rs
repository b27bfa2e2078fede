use avatar_dom::{
	observers::ObserverList,
	tracking::{ChangeTrackingView, MountOptions},
};
use std::{cell::Cell, rc::Rc};

#[test]
fn tracks_changes_until_unmounted() {
	let observers = ObserverList::new();
	let count = Rc::new(Cell::new(0));

	let mut view = ChangeTrackingView::new();
	{
		let count = Rc::clone(&count);
		view.mount(&observers, MountOptions::default(), Rc::new(move || count.set(count.get() + 1)));
	}
	assert!(view.is_tracking());

	observers.notify();
	assert_eq!(count.get(), 1);

	view.unmount();
	assert!(!view.is_tracking());

	observers.notify();
	assert_eq!(count.get(), 1);
}

#[test]
fn parent_provided_updates_skip_the_subscription() {
	let observers = ObserverList::new();

	let mut view = ChangeTrackingView::new();
	view.mount(
		&observers,
		MountOptions {
			parent_provides_updates: true,
		},
		Rc::new(|| panic!("the parent drives updates; this handler must never be registered")),
	);

	assert!(!view.is_tracking());
	assert!(observers.is_empty());
	observers.notify();
}

#[test]
fn dropping_the_view_releases_the_subscription() {
	let observers = ObserverList::new();

	let view = {
		let mut view = ChangeTrackingView::new();
		view.mount(&observers, MountOptions::default(), Rc::new(|| ()));
		view
	};
	assert_eq!(observers.len(), 1);

	drop(view);
	assert!(observers.is_empty());
}
