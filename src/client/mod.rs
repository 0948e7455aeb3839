pub mod http_client;
pub mod scrub;

pub use http_client::{HttpTransport, build_http_client};
pub use scrub::{sanitize_error_text, scrub_secrets};
