use gpui::App;

mod binding;
mod card;
mod color_picker;
mod dashboard;
mod element_ext;
mod list;
mod number;
mod object;
mod text;
mod toggle;

pub mod color;
pub mod error;
pub mod reorder;
pub mod validate;

pub use binding::*;
pub use card::*;
pub use color_picker::*;
pub use dashboard::*;
pub use list::*;
pub use number::*;
pub use object::*;
pub use text::*;
pub use toggle::*;

/// Initialize the controls.
///
/// This must be called before using any of the controls, it also sets up
/// `gpui-component`.
pub fn init(cx: &mut App) {
    gpui_component::init(cx);
}
