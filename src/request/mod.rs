pub mod builder;
pub mod method;

pub use builder::{RequestSpec, build, build_for_session, validate_endpoint};
pub use method::HttpMethod;
