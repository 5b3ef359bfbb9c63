//! OpenAI Provider
//!
//! Analysis through GPT-4o vision chat and restoration through a two-stage
//! vision-then-DALL-E pipeline.

mod analysis;
mod client;
mod restoration;
pub mod types;
pub mod utils;

pub use client::{OpenAiClient, OpenAiOptions};
