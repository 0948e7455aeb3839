pub mod source;
pub mod types;

pub use source::{ContextSource, FileContextSource, StaticContextSource};
pub use types::{ContextRecord, SessionContext};
