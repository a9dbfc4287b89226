//! Translation of every request failure into one client-safe error response

pub mod application;
pub mod codes;
pub mod disclosure;
pub mod dispatcher;
pub mod downstream;
pub mod failure;
pub mod framework;
pub mod response;

pub use application::ApplicationError;
pub use codes::ErrorKind;
pub use disclosure::{Diagnostic, DiagnosticSink, Disclosure, MemorySink, TracingSink};
pub use dispatcher::{Dispatched, Dispatcher, Rule};
pub use downstream::DownstreamFailure;
pub use failure::{Failure, PendingFailure};
pub use framework::{FieldError, FrameworkCondition};
pub use response::{ErrorResponse, GENERIC_DESCRIPTION};
