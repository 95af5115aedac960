//! financia-ai
//!
//! Best-effort advisory client: builds prompts and response schemas from local
//! transactions, calls an external generative model and validates what comes
//! back. Every public operation degrades to a fallback instead of failing.

pub mod advisor;
pub mod error;
pub mod gate;
pub mod gemini;
pub mod model;
pub mod payload;
pub mod prompt;

pub use advisor::Advisor;
pub use error::AiError;
pub use gate::{GateGuard, RequestGate};
pub use gemini::GeminiClient;
pub use model::{DisabledModel, GenerationRequest, GenerativeModel};
