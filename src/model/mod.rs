pub mod config;
pub mod route;
pub mod session;

pub use config::*;
pub use route::*;
pub use session::*;
