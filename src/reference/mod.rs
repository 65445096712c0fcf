//! Reference data abstraction
//!
//! Transcript models, strand-aware sequence regions and the provider trait
//! through which both reach the engine.

pub mod mock;
pub mod provider;
pub mod sequence;
pub mod transcript;

pub use mock::MockProvider;
pub use provider::ReferenceProvider;
pub use sequence::StrandedSequence;
pub use transcript::{Intron, TranscriptModel};
