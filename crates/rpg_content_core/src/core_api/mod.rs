mod engine;
mod error;
mod types;

pub use engine::{Engine, Session};
pub use error::{ContentError, ContentErrorCode};
pub use types::{
    EntityKind, ItemDraft, ItemSummary, Mutation, PackCounts, PackKind, QuestDraft, QuestSummary,
    StepDraft, StoreDraft, StoreSummary,
};
