//! Word search over a grid of letters.
//!
//! Words are spelled by paths of orthogonally adjacent cells, each cell used
//! at most once per path. Three search strategies are provided so they can
//! be compared on the same puzzle: trie-pruned backtracking, trie-pruned
//! depth-first search, and depth-first search against a set of remaining
//! words.

pub mod board;
pub mod error;
pub mod search;
pub mod trie;

// Re-export main types
pub use board::{Board, Direction, PuzzleInput, VisitedMask};
pub use error::{Error, Result, ValidationError};
pub use search::{Comparison, SearchReport, Strategy, StrategyTiming, WordSearch};
pub use trie::{PrefixNode, PrefixTree};
