pub mod document;
pub mod escape;
pub mod markup;

pub use document::render_document;
pub use escape::escape_html;
pub use markup::{render, render_optional};
