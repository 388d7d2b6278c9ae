//! Answer extraction and normalization.
//!
//! - [`parsing`] turns raw model text into a [`ParsedAnswer`]
//! - [`normalize`] maps parsed answers onto a canonical form for voting

pub mod normalize;
pub mod parsing;

pub use normalize::{answer_letters, join_letters, normalize_answer};
pub use parsing::{DEFAULT_JSON_CONFIDENCE, ParsedAnswer, parse_answer};
