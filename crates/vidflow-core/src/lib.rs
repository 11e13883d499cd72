pub mod aspect;
pub mod classifier;
pub mod completion;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod progress;
pub mod rules;
pub mod store;
pub mod types;
pub mod video;

pub use error::{Result, VidError};
