pub mod mismatch;
pub mod resource;

pub use mismatch::{Mismatch, MismatchReport};
pub use resource::{ResourceCollection, ResourceKind};
