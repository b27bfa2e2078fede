/// Display-ready avatar fields, decoupled from rendering.
///
/// All values are already validated at the data layer; a missing or unusable image URL
/// surfaces here as `None`, never as an error.
///
/// Returns are owned because implementations are typically `RefCell`-backed.
pub trait AvatarViewModel {
	fn avatar_url(&self) -> Option<String>;

	/// Stable color index derived from the entity (user/room) id.
	/// Fixed for the entity's lifetime.
	fn avatar_color_number(&self) -> u32;

	/// Tooltip text, only shown while an image is rendered.
	fn avatar_title(&self) -> String;

	/// Single-character fallback, only shown while no image is rendered.
	fn avatar_letter(&self) -> String;
}
