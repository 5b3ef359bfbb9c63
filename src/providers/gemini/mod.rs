//! Google Gemini Provider
//!
//! Analysis through `generateContent` with inline image data and native JSON
//! output mode. Gemini has no image generation, so this adapter implements
//! the analysis capability only.

mod analysis;
mod client;
pub mod types;
pub mod utils;

pub use client::{GeminiClient, GeminiOptions};
