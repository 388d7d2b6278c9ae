//! Progress notifiers for the console

pub mod reporter;
