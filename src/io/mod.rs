pub mod config_io;
pub mod session_io;
pub mod store;
