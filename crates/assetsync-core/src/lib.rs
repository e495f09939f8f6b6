pub mod config;
pub mod logging;

pub mod artifact;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod sync;
