use avatar_dom::observers::{Observable, ObserverList, Subscription};
use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

#[test]
fn notify_reaches_every_handler() {
	let observers = ObserverList::new();
	let count = Rc::new(Cell::new(0));

	let first = {
		let count = Rc::clone(&count);
		observers.subscribe(Rc::new(move || count.set(count.get() + 1)))
	};
	let second = {
		let count = Rc::clone(&count);
		observers.subscribe(Rc::new(move || count.set(count.get() + 1)))
	};
	assert_eq!(observers.len(), 2);

	observers.notify();
	assert_eq!(count.get(), 2);

	drop(first);
	observers.notify();
	assert_eq!(count.get(), 3);

	drop(second);
	observers.notify();
	assert_eq!(count.get(), 3);
	assert!(observers.is_empty());
}

#[test]
fn dropped_subscriptions_deregister() {
	let observers = ObserverList::new();
	assert!(observers.is_empty());

	let subscription = observers.subscribe(Rc::new(|| ()));
	assert_eq!(observers.len(), 1);

	drop(subscription);
	assert!(observers.is_empty());
}

#[test]
fn outliving_the_list_is_harmless() {
	let subscription = {
		let observers = ObserverList::new();
		observers.subscribe(Rc::new(|| ()))
	};
	drop(subscription);
}

#[test]
fn a_handler_may_drop_its_own_subscription() {
	let observers = ObserverList::new();
	let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

	let subscription = {
		let slot = Rc::clone(&slot);
		observers.subscribe(Rc::new(move || {
			slot.borrow_mut().take();
		}))
	};
	*slot.borrow_mut() = Some(subscription);

	observers.notify();
	assert!(observers.is_empty());

	// The handler is gone; a second notification must not reach it.
	observers.notify();
}
