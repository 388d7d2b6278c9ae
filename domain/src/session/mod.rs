//! Model capability exchange.
//!
//! - [`request::GenerationRequest`]: prompt plus generation limits and filter settings
//! - [`response::ModelReply`]: the reply shapes a provider can return

pub mod request;
pub mod response;
