pub mod config;
pub mod session;
pub mod store;
pub mod task;

pub use config::*;
pub use session::*;
pub use store::*;
pub use task::*;
