//! Typed views of the content documents.
//!
//! Packs are held as untyped `serde_json::Value` trees so path edits can touch
//! any field. These types are used where the tool itself builds a document
//! (creation commands) and where validators need the closed vocabularies.

mod item;
mod quest;
mod vocab;

pub use item::{Market, NewItem, StoreEntry};
pub use quest::{CurrencyReward, GatherStep, NewQuest, Prerequisites, Repeat, Rewards, StepKind};
pub use vocab::{Difficulty, GatherAction, MarketCategory, Profession, RepeatKind};
