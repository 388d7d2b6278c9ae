//! Command-line surface: argument definitions and question decoding

pub mod commands;
pub mod input;
