pub mod analysis;
pub mod error;
pub mod extract;
pub mod logs;
pub mod parse;
pub mod report;

pub use error::{Error, Result};
