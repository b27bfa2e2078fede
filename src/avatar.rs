use crate::{
	observers::Observable,
	tracking::{ChangeTrackingView, MountOptions},
	view_model::AvatarViewModel,
};
use std::{cell::RefCell, rc::Rc};
use tracing::{error, trace_span};
use wasm_bindgen::{JsCast, UnwrapThrowExt};

/// A retained avatar view: an [***img***](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/img)
/// while the view-model has an avatar URL, a colored single-letter placeholder otherwise.
///
/// Many instances of this view exist at once (member lists, timelines), so it swaps
/// between the image and letter representations in place instead of delegating to a
/// child view, and [`update`](`AvatarView::update`) touches only the DOM that a changed
/// field requires:
///
/// - URL changed: the content child is replaced wholesale and the `usercolor{N}`
///   class is added or removed. The class is present exactly while no image is shown.
/// - Title changed while an image is shown: only the image's `title` attribute.
/// - Letter changed while no image is shown: only the text node's content.
///
/// The color number is read once per mode transition and never re-applied on its own;
/// it is fixed for the entity's lifetime.
pub struct AvatarView<V> {
	inner: Rc<RefCell<Inner<V>>>,
}

struct Inner<V> {
	value: Rc<V>,
	root: Option<web_sys::Element>,
	avatar_url: Option<String>,
	avatar_title: Option<String>,
	avatar_letter: Option<String>,
	size: u32,
	tracking: ChangeTrackingView,
}

impl<V: AvatarViewModel + 'static> AvatarView<V> {
	/// `size` is the rendered width and height in pixels, fixed for the view's lifetime.
	#[must_use]
	pub fn new(value: Rc<V>, size: u32) -> Self {
		Self {
			inner: Rc::new(RefCell::new(Inner {
				value,
				root: None,
				avatar_url: None,
				avatar_title: None,
				avatar_letter: None,
				size,
				tracking: ChangeTrackingView::new(),
			})),
		}
	}

	/// Renders the avatar once and registers for change notifications
	/// (unless `options.parent_provides_updates`).
	///
	/// The returned element is for the caller to attach; the view keeps mutating it
	/// until unmounted or dropped.
	#[must_use]
	pub fn mount(&self, options: MountOptions) -> web_sys::Element
	where
		V: Observable,
	{
		let mut inner = self.inner.borrow_mut();

		// Prime the snapshot so the first `update` diffs against what is rendered here.
		inner.avatar_url_changed();
		inner.avatar_title_changed();
		inner.avatar_letter_changed();

		let root = render_static_avatar(&*inner.value, inner.size);
		inner.root = Some(root.clone());

		let value = Rc::clone(&inner.value);
		let weak = Rc::downgrade(&self.inner);
		inner.tracking.mount(
			&*value,
			options,
			Rc::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner.borrow_mut().update();
				}
			}),
		);
		root
	}

	/// The mounted root element, or `None` before [`mount`](`AvatarView::mount`).
	#[must_use]
	pub fn root(&self) -> Option<web_sys::Element> {
		self.inner.borrow().root.clone()
	}

	/// Re-reads the view-model and applies exactly the changed fields to the DOM.
	///
	/// Called automatically on change notifications while mounted; parents that opted
	/// into [`MountOptions::parent_provides_updates`] call this instead.
	pub fn update(&self) {
		self.inner.borrow_mut().update();
	}

	/// Releases the change subscription. The rendered element is left in place.
	pub fn unmount(&self) {
		self.inner.borrow_mut().tracking.unmount();
	}
}

impl<V: AvatarViewModel> Inner<V> {
	fn avatar_url_changed(&mut self) -> bool {
		let avatar_url = self.value.avatar_url();
		if self.avatar_url == avatar_url {
			false
		} else {
			self.avatar_url = avatar_url;
			true
		}
	}

	fn avatar_title_changed(&mut self) -> bool {
		let avatar_title = self.value.avatar_title();
		if self.avatar_title.as_deref() == Some(&*avatar_title) {
			false
		} else {
			self.avatar_title = Some(avatar_title);
			true
		}
	}

	fn avatar_letter_changed(&mut self) -> bool {
		let avatar_letter = self.value.avatar_letter();
		if self.avatar_letter.as_deref() == Some(&*avatar_letter) {
			false
		} else {
			self.avatar_letter = Some(avatar_letter);
			true
		}
	}

	fn update(&mut self) {
		let root = match &self.root {
			Some(root) => root.clone(),
			None => return error!("Updating an avatar view that was never mounted. Ignoring."),
		};
		let span = trace_span!("Updating avatar", size = self.size);
		let _enter = span.enter();

		// Every `_changed` predicate must run on every pass, in URL → title → letter
		// order: each refreshes its cached field as a side effect, and a skipped one
		// would leave the snapshot stale for later passes.
		if self.avatar_url_changed() {
			let color_class = format!("usercolor{}", self.value.avatar_color_number());
			let content: web_sys::Node = if self.avatar_url.is_some() {
				render_img(&*self.value, self.size).into()
			} else {
				document().create_text_node(&self.value.avatar_letter()).into()
			};
			match root.first_child() {
				Some(previous) => {
					if let Err(error) = root.replace_child(&content, &previous) {
						error!("Failed to replace avatar content: {:?}", error);
					}
				}
				None => {
					error!("Avatar root lost its content child; reinserting.");
					if let Err(error) = root.append_child(&content) {
						error!("Failed to insert avatar content: {:?}", error);
					}
				}
			}
			// The color backs the letter, so the class is absent while an image is shown.
			let class_list = root.class_list();
			let toggled = if self.avatar_url.is_some() {
				class_list.remove_1(&color_class)
			} else {
				class_list.add_1(&color_class)
			};
			if let Err(error) = toggled {
				error!("Failed to toggle class {:?}: {:?}", color_class, error);
			}
		}

		let has_avatar = self.avatar_url.is_some();
		if self.avatar_title_changed() && has_avatar {
			match root.first_child().and_then(|node| node.dyn_into::<web_sys::Element>().ok()) {
				Some(img) => {
					if let Err(error) = img.set_attribute("title", self.avatar_title.as_deref().unwrap_or("")) {
						error!("Failed to update avatar title: {:?}", error);
					}
				}
				None => error!("Expected an avatar image to retitle but found none."),
			}
		}
		if self.avatar_letter_changed() && !has_avatar {
			match root.first_child() {
				Some(text) => text.set_text_content(Some(self.avatar_letter.as_deref().unwrap_or(""))),
				None => error!("Expected an avatar text node to update but found none."),
			}
		}
	}
}

/// Renders an avatar with no update machinery behind it, for hosts that rebuild
/// their whole subtree anyway (e.g. timeline entries).
///
/// The container is classed `avatar`, plus `usercolor{N}` when no image is shown.
#[must_use]
pub fn render_static_avatar<V: AvatarViewModel + ?Sized>(vm: &V, size: u32) -> web_sys::Element {
	let document = document();
	let root = document.create_element("div").unwrap_throw();
	let has_avatar = vm.avatar_url().is_some();
	if has_avatar {
		root.set_class_name("avatar");
	} else {
		root.set_class_name(&format!("avatar usercolor{}", vm.avatar_color_number()));
	}
	let content: web_sys::Node = if has_avatar {
		render_img(vm, size).into()
	} else {
		document.create_text_node(&vm.avatar_letter()).into()
	};
	if let Err(error) = root.append_child(&content) {
		error!("Failed to insert avatar content: {:?}", error);
	}
	root
}

fn render_img<V: AvatarViewModel + ?Sized>(vm: &V, size: u32) -> web_sys::HtmlImageElement {
	let img = document()
		.create_element("img")
		.unwrap_throw()
		.dyn_into::<web_sys::HtmlImageElement>()
		.unwrap_throw();
	if let Some(avatar_url) = vm.avatar_url() {
		img.set_src(&avatar_url);
	}
	img.set_width(size);
	img.set_height(size);
	if let Err(error) = img.set_attribute("title", &vm.avatar_title()) {
		error!("Failed to set avatar title: {:?}", error);
	}
	img
}

fn document() -> web_sys::Document {
	web_sys::window()
		.expect_throw("avatar-dom: No window found.")
		.document()
		.expect_throw("avatar-dom: No document found.")
}
