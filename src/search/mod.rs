//! Exact minimax search over drafts.
//!
//! - `DraftEngine`: owns one configuration and answers queries
//! - `Searcher`: alpha-beta recursion over a `SearchState`
//! - `ZobristKeys` / `TranspositionTable`: memoization of visited states
//! - `first_mover_choice`: picks between candidate teams of flexible picks

pub mod zobrist;
pub mod table;
pub mod stats;
pub mod minimax;
pub mod resolve;
pub mod engine;

pub use zobrist::{ZobristHash, ZobristKeys};
pub use table::{Bound, TableEntry, TranspositionTable, TABLE_FORMAT_VERSION};
pub use stats::SearchStats;
pub use minimax::{evaluate, Line, SearchState, Searcher, INFINITY};
pub use resolve::{first_mover_choice, RoleResolution};
pub use engine::{DraftEngine, SearchOutcome};
