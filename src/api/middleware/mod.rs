pub mod logging;
pub mod translate;

pub use logging::logging_middleware;
pub use translate::{panic_to_failure, request_url, translate_errors};
