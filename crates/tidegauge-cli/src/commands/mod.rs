pub mod completion;
pub mod server;
pub mod workers;
