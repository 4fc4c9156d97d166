//! Draft structure: turn order, per-team role tracking, history expansion.

pub mod format;
pub mod availability;
pub mod history;

pub use format::{DraftFormat, DraftStage, Selection, StageKind};
pub use availability::RoleAvailability;
pub use history::{candidate_teams, expand_history, ExpandedHistory};
