pub mod document;
pub mod entity;
pub mod error;
pub mod math;
pub mod operations;
pub mod snap;
pub mod spatial;

pub use error::{DraftisError, Result};
