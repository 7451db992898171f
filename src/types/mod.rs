//! Core types shared across the crate

mod completion;
mod extraction;
mod message;
mod payload;

pub use completion::RawCompletion;
pub use extraction::Extraction;
pub use message::{Message, Role};
pub use payload::RequestBody;
