#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod avatar;
pub mod observers;
pub mod tracking;
pub mod view_model;
