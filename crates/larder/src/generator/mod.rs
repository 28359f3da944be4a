//! Recipe generator implementations

mod fake;
pub use fake::FakeGenerator;

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiGenerator};
