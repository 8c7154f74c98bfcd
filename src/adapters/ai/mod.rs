//! AI Drafting Adapters.
//!
//! Implementations of the `DraftingService` port.
//!
//! ## Available Adapters
//!
//! - `GeminiDraftingService` - Google Gemini `generateContent` API
//! - `MockDraftingService` - Scripted responses for testing

mod gemini_drafting;
mod mock_drafting;

pub use gemini_drafting::{build_prompt, GeminiConfig, GeminiDraftingService, SYSTEM_INSTRUCTION};
pub use mock_drafting::MockDraftingService;
