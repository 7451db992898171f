//! Gateway construction and orchestration

mod builder;
mod extraction;

pub use builder::{Munin, MuninBuilder};
pub use extraction::ExtractionGateway;
