pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod external;
pub mod logging;
pub mod release;
pub mod sources;
pub mod ui;

pub use error::{BumprError, Result};
