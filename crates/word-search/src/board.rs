//! Letter grid representation and construction-time validation.
//!
//! [`PuzzleInput`] deserializes directly from the JSON accepted by the CLI.
//! [`Board`] is the validated, immutable grid the search engine walks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ValidationError;

/// Orthogonal step on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// Order in which every strategy tries the neighbors of a cell. It fixes
    /// the discovery order and therefore the order of the results.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

    /// (row, column) offset of one step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }
}

/// Raw puzzle as read from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleInput {
    pub board: Vec<Vec<char>>,
    /// `null` entries are accepted by the parser and rejected by validation
    pub words: Vec<Option<String>>,
}

/// A validated rectangular grid of letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<char>>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Validate `grid` together with the words that will be searched for.
    ///
    /// Checks run in a fixed order and the first failure wins: empty input,
    /// duplicate words, ragged rows, then each word in list order.
    pub fn new<S: AsRef<str>>(
        grid: Vec<Vec<char>>,
        words: &[Option<S>],
    ) -> Result<Self, ValidationError> {
        if grid.is_empty() || grid[0].is_empty() || words.is_empty() {
            return Err(ValidationError::InvalidInput);
        }

        let unique: HashSet<Option<&str>> =
            words.iter().map(|w| w.as_ref().map(|s| s.as_ref())).collect();
        if unique.len() != words.len() {
            return Err(ValidationError::DuplicateWords);
        }

        let cols = grid[0].len();
        if grid.iter().any(|row| row.len() != cols) {
            return Err(ValidationError::NonRectangular);
        }

        for word in words {
            validate_word(word.as_ref().map(|s| s.as_ref()))?;
        }

        Ok(Self {
            rows: grid.len(),
            cols,
            cells: grid,
        })
    }

    /// Number of rows in the grid
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells in every row
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, which is also the longest possible path
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false: construction rejects empty grids
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the letter at a position (bounds-checked)
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// In-bounds orthogonal neighbors of a cell, in [`Direction::SEARCH_ORDER`]
    pub fn neighbors(&self, row: usize, col: usize) -> SmallVec<[(usize, usize); 4]> {
        let mut out = SmallVec::new();
        for direction in Direction::SEARCH_ORDER {
            let (dr, dc) = direction.delta();
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if r < self.rows && c < self.cols {
                out.push((r, c));
            }
        }
        out
    }
}

/// A search word must be present, non-empty, and made of `a-z` only
fn validate_word(word: Option<&str>) -> Result<(), ValidationError> {
    let word = match word {
        Some(w) if !w.is_empty() => w,
        _ => return Err(ValidationError::EmptyWord),
    };
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(())
}

/// Cells on the current exploration path
///
/// One mask serves a whole search call. Each cell is marked on entry and
/// cleared again before its exploration returns.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    cells: Vec<bool>,
    cols: usize,
}

impl VisitedMask {
    pub fn new(board: &Board) -> Self {
        Self {
            cells: vec![false; board.len()],
            cols: board.cols(),
        }
    }

    pub fn is_visited(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn mark(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = true;
    }

    pub fn unmark(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = false;
    }

    /// True when no cell is marked
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|v| !v)
    }
}
