//! All summarization functionality

pub mod backend;
pub mod chunker;
pub mod client;
pub mod pacing;
pub mod profile;
pub mod reducer;

// Re-export main types for convenience
pub use backend::{BackendError, HuggingFaceBackend, LengthBounds, SummaryBackend};
pub use chunker::chunk_messages;
pub use client::SummarizationClient;
pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use profile::{LengthProfile, LengthTier};
pub use reducer::{HierarchicalReducer, NO_MESSAGES, NO_SUMMARY, ReducerSettings};
