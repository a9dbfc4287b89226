pub mod payload;

pub use payload::{Choice, ChoiceParams, Data};
