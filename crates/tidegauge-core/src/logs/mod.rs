mod reader;
mod types;

pub use reader::LogReader;
pub use types::*;
