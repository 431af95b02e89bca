#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default
)]

pub mod channels;
pub mod config;
pub mod detector;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod transport;

pub use config::Config;
pub use error::{Result, WatchError};
