pub mod aws;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod report;

pub use error::{ElblessError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
