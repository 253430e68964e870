pub mod config;
pub mod error;
pub mod git;
pub mod process;
pub mod record;
pub mod resolver;
pub mod store;
pub mod ui;
pub mod version;

pub use error::{AutoVersionError, Result};
