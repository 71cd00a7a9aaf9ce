//! Depth-first word search over a validated board.
//!
//! Three interchangeable strategies scan every start cell in row-major order
//! and walk orthogonal neighbors in [`Direction::SEARCH_ORDER`], never
//! reusing a cell within one path:
//!
//! - backtracking with trie pruning ([`WordSearch::find_words_backtracking_with_trie`])
//! - depth-first search carrying a trie node ([`WordSearch::find_words_dfs_with_trie`])
//! - depth-first search against a shrinking word set ([`WordSearch::find_words_dfs_with_set`])
//!
//! The two trie strategies report a word once per path that spells it. The
//! set strategy removes a word when it is found, so it reports each word at
//! most once.
//!
//! [`Direction::SEARCH_ORDER`]: crate::board::Direction::SEARCH_ORDER

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::{Board, PuzzleInput, VisitedMask};
use crate::error::ValidationError;
use crate::trie::{PrefixNode, PrefixTree};

/// Search strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    BacktrackingTrie,
    DfsTrie,
    DfsSet,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BacktrackingTrie,
        Strategy::DfsTrie,
        Strategy::DfsSet,
    ];
}

/// Outcome of a single timed search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub strategy: Strategy,
    /// Words in discovery order
    pub words: Vec<String>,
    /// Cells entered by the traversal, pruned ones included
    pub cells_visited: usize,
    pub time_elapsed_us: u64,
}

/// Average timing of one strategy over several runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyTiming {
    pub strategy: Strategy,
    pub words: Vec<String>,
    pub cells_visited: usize,
    pub average_us: f64,
}

/// Side-by-side run of every strategy on the same puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub iterations: usize,
    pub timings: Vec<StrategyTiming>,
    /// All strategies found the same set of words
    pub consistent: bool,
}

/// Per-call traversal state. Never shared between searches.
struct SearchContext {
    visited: VisitedMask,
    path: String,
    found: Vec<String>,
    cells_visited: usize,
}

impl SearchContext {
    fn new(board: &Board) -> Self {
        Self {
            visited: VisitedMask::new(board),
            path: String::with_capacity(board.len()),
            found: Vec::new(),
            cells_visited: 0,
        }
    }

    fn record(&mut self) {
        trace!(word = %self.path, "found word");
        self.found.push(self.path.clone());
    }
}

/// A board and the words to look for, ready to be searched
///
/// The board and the trie are read-only after construction. Every search
/// builds its own visited mask and word set, so one instance can serve
/// concurrent searches from several threads.
#[derive(Debug)]
pub struct WordSearch {
    board: Board,
    words: Vec<String>,
    trie: PrefixTree,
    longest_word: usize,
}

impl WordSearch {
    /// Validate the puzzle and build the prefix tree.
    pub fn new(grid: Vec<Vec<char>>, words: Vec<String>) -> Result<Self, ValidationError> {
        let checked: Vec<Option<&str>> = words.iter().map(|w| Some(w.as_str())).collect();
        let board = Board::new(grid, &checked)?;
        Ok(Self::build(board, words))
    }

    /// Build from parsed JSON, where words may be `null`
    pub fn from_input(input: PuzzleInput) -> Result<Self, ValidationError> {
        let board = Board::new(input.board, &input.words)?;
        // Validation rejects null words
        let words = input.words.into_iter().flatten().collect();
        Ok(Self::build(board, words))
    }

    fn build(board: Board, words: Vec<String>) -> Self {
        let trie: PrefixTree = words.iter().collect();
        let longest_word = words.iter().map(String::len).max().unwrap_or(0);

        debug!(
            rows = board.rows(),
            cols = board.cols(),
            words = words.len(),
            "built word search"
        );

        Self {
            board,
            words,
            trie,
            longest_word,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Target words in input order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn find_words_backtracking_with_trie(&self) -> Vec<String> {
        self.search(Strategy::BacktrackingTrie).found
    }

    pub fn find_words_dfs_with_trie(&self) -> Vec<String> {
        self.search(Strategy::DfsTrie).found
    }

    pub fn find_words_dfs_with_set(&self) -> Vec<String> {
        self.search(Strategy::DfsSet).found
    }

    /// Run one strategy and time it
    pub fn run(&self, strategy: Strategy) -> SearchReport {
        let start_time = Instant::now();
        let ctx = self.search(strategy);
        let time_elapsed_us = start_time.elapsed().as_micros() as u64;

        debug!(
            ?strategy,
            found = ctx.found.len(),
            cells_visited = ctx.cells_visited,
            time_elapsed_us,
            "search finished"
        );

        SearchReport {
            strategy,
            words: ctx.found,
            cells_visited: ctx.cells_visited,
            time_elapsed_us,
        }
    }

    /// Run every strategy `iterations` times (at least once) and average
    /// the elapsed time
    ///
    /// The set strategy is not the fully unpruned walk: a path stops growing
    /// at the length of the longest target word, and the scan ends once every
    /// word has been found. Its timings and `cells_visited` reflect both
    /// cutoffs.
    pub fn compare(&self, iterations: usize) -> Comparison {
        let iterations = iterations.max(1);
        let mut timings = Vec::with_capacity(Strategy::ALL.len());

        for strategy in Strategy::ALL {
            let mut total_us = 0u64;
            let mut last = None;
            for _ in 0..iterations {
                let report = self.run(strategy);
                total_us += report.time_elapsed_us;
                last = Some(report);
            }
            if let Some(report) = last {
                timings.push(StrategyTiming {
                    strategy,
                    words: report.words,
                    cells_visited: report.cells_visited,
                    average_us: total_us as f64 / iterations as f64,
                });
            }
        }

        let consistent = timings
            .windows(2)
            .all(|pair| word_set(&pair[0].words) == word_set(&pair[1].words));

        Comparison {
            iterations,
            timings,
            consistent,
        }
    }

    fn search(&self, strategy: Strategy) -> SearchContext {
        let mut ctx = SearchContext::new(&self.board);
        let mut remaining: HashSet<&str> = match strategy {
            Strategy::DfsSet => self.words.iter().map(String::as_str).collect(),
            _ => HashSet::new(),
        };

        for row in 0..self.board.rows() {
            for col in 0..self.board.cols() {
                match strategy {
                    Strategy::BacktrackingTrie => self.backtrack_with_trie(row, col, &mut ctx),
                    Strategy::DfsTrie => self.dfs_with_trie(self.trie.root(), row, col, &mut ctx),
                    Strategy::DfsSet => self.dfs_with_set(row, col, &mut remaining, &mut ctx),
                }
                debug_assert!(ctx.visited.is_clear());
                debug_assert!(ctx.path.is_empty());
            }
        }

        ctx
    }

    /// Query the trie with the whole path at each step
    fn backtrack_with_trie(&self, row: usize, col: usize, ctx: &mut SearchContext) {
        if ctx.visited.is_visited(row, col) {
            return;
        }
        let Some(letter) = self.board.get(row, col) else {
            return;
        };
        ctx.cells_visited += 1;

        ctx.path.push(letter);
        if !self.trie.has_prefix(&ctx.path) {
            ctx.path.pop();
            return;
        }
        if self.trie.contains_word(&ctx.path) {
            ctx.record();
        }

        ctx.visited.mark(row, col);
        for (r, c) in self.board.neighbors(row, col) {
            self.backtrack_with_trie(r, c, ctx);
        }
        ctx.visited.unmark(row, col);
        ctx.path.pop();
    }

    /// Same traversal, but the trie node for the path is carried down the
    /// recursion so each step is a single child lookup
    fn dfs_with_trie(&self, node: &PrefixNode, row: usize, col: usize, ctx: &mut SearchContext) {
        if ctx.visited.is_visited(row, col) {
            return;
        }
        let Some(letter) = self.board.get(row, col) else {
            return;
        };
        ctx.cells_visited += 1;

        // Every node lies on the path of an inserted word, so reaching one
        // means the prefix is still live
        let Some(next) = node.child(letter) else {
            return;
        };

        ctx.path.push(letter);
        if next.is_terminal() {
            ctx.record();
        }

        ctx.visited.mark(row, col);
        for (r, c) in self.board.neighbors(row, col) {
            self.dfs_with_trie(next, r, c, ctx);
        }
        ctx.visited.unmark(row, col);
        ctx.path.pop();
    }

    /// Match the path against the words not found yet. No prefix pruning;
    /// a path stops growing once it is as long as the longest target word.
    fn dfs_with_set(
        &self,
        row: usize,
        col: usize,
        remaining: &mut HashSet<&str>,
        ctx: &mut SearchContext,
    ) {
        if remaining.is_empty() || ctx.visited.is_visited(row, col) {
            return;
        }
        let Some(letter) = self.board.get(row, col) else {
            return;
        };
        ctx.cells_visited += 1;

        ctx.path.push(letter);
        if remaining.remove(ctx.path.as_str()) {
            ctx.record();
        }

        if ctx.path.len() < self.longest_word {
            ctx.visited.mark(row, col);
            for (r, c) in self.board.neighbors(row, col) {
                self.dfs_with_set(r, c, remaining, ctx);
            }
            ctx.visited.unmark(row, col);
        }
        ctx.path.pop();
    }
}

fn word_set(words: &[String]) -> BTreeSet<&str> {
    words.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|r| r.chars().collect()).collect()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn hogwarts_board() -> Vec<Vec<char>> {
        grid(&["harr", "enay", "roti", "lape"])
    }

    fn hogwarts_words() -> Vec<String> {
        words(&["harry", "potter", "hermione", "ron", "neville", "luna"])
    }

    fn create_search(rows: &[&str], list: &[&str]) -> WordSearch {
        WordSearch::new(grid(rows), words(list)).unwrap()
    }

    #[test]
    fn test_find_words_with_set_basic() {
        let ws = WordSearch::new(hogwarts_board(), hogwarts_words()).unwrap();
        assert_eq!(ws.find_words_dfs_with_set(), vec!["harry", "ron"]);
    }

    #[test]
    fn test_find_words_with_trie_basic() {
        let ws = create_search(&["harr", "enay", "roti", "lane"], &[
            "harry", "potter", "hermione", "ron", "neville", "luna",
        ]);

        assert_eq!(ws.find_words_backtracking_with_trie(), vec!["harry", "ron"]);
        assert_eq!(ws.find_words_dfs_with_trie(), vec!["harry", "ron"]);
    }

    #[test]
    fn test_trie_strategies_on_hogwarts_board() {
        let ws = WordSearch::new(hogwarts_board(), hogwarts_words()).unwrap();
        let found = ws.find_words_backtracking_with_trie();

        assert!(found.contains(&"harry".to_string()));
        assert!(found.contains(&"ron".to_string()));
        assert_eq!(found, ws.find_words_dfs_with_trie());
    }

    #[test]
    fn test_no_words_found() {
        let ws = WordSearch::new(
            hogwarts_board(),
            words(&["voldamort", "potter", "hermione", "malfoy", "neville", "luna"]),
        )
        .unwrap();

        assert!(ws.find_words_dfs_with_set().is_empty());
        assert!(ws.find_words_dfs_with_trie().is_empty());
        assert!(ws.find_words_backtracking_with_trie().is_empty());
    }

    #[test]
    fn test_trie_strategies_report_every_path() {
        // "ab" is spelled by four distinct paths
        let ws = create_search(&["ab", "ba"], &["ab"]);

        assert_eq!(ws.find_words_backtracking_with_trie(), vec!["ab"; 4]);
        assert_eq!(ws.find_words_dfs_with_trie(), vec!["ab"; 4]);
        assert_eq!(ws.find_words_dfs_with_set(), vec!["ab"]);
    }

    #[test]
    fn test_discovery_order() {
        // Start cells are row-major; from a cell, down is tried before right
        let ws = create_search(&["ab", "cd"], &["ab", "ac", "db", "d"]);

        assert_eq!(ws.find_words_backtracking_with_trie(), vec!["ac", "ab", "d", "db"]);
        assert_eq!(ws.find_words_dfs_with_set(), vec!["ac", "ab", "d", "db"]);
    }

    #[test]
    fn test_prefix_word_and_longer_word_on_one_path() {
        let ws = create_search(&["rona", "xxxn"], &["ron", "ronan"]);

        assert_eq!(ws.find_words_backtracking_with_trie(), vec!["ron", "ronan"]);
        assert_eq!(ws.find_words_dfs_with_set(), vec!["ron", "ronan"]);
    }

    #[test]
    fn test_single_cell_board() {
        let ws = create_search(&["a"], &["a", "aa"]);

        assert_eq!(ws.find_words_backtracking_with_trie(), vec!["a"]);
        assert_eq!(ws.find_words_dfs_with_trie(), vec!["a"]);
        assert_eq!(ws.find_words_dfs_with_set(), vec!["a"]);
    }

    #[test]
    fn test_no_diagonal_matches() {
        let ws = create_search(&["ax", "yb"], &["ab", "ba"]);

        for strategy in Strategy::ALL {
            assert!(ws.run(strategy).words.is_empty(), "{:?}", strategy);
        }
    }

    #[test]
    fn test_no_cell_reuse() {
        let ws = create_search(&["ab"], &["aba", "bab"]);

        for strategy in Strategy::ALL {
            assert!(ws.run(strategy).words.is_empty(), "{:?}", strategy);
        }
    }

    #[test]
    fn test_uppercase_board_cells_never_match() {
        let ws = create_search(&["Ab", "cd"], &["ab", "bd"]);

        for strategy in Strategy::ALL {
            assert_eq!(ws.run(strategy).words, vec!["bd"], "{:?}", strategy);
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let ws = WordSearch::new(hogwarts_board(), hogwarts_words()).unwrap();

        assert_eq!(ws.find_words_dfs_with_set(), ws.find_words_dfs_with_set());
        assert_eq!(
            ws.find_words_backtracking_with_trie(),
            ws.find_words_backtracking_with_trie()
        );
        assert_eq!(ws.find_words_dfs_with_trie(), ws.find_words_dfs_with_trie());
    }

    #[test]
    fn test_trie_strategies_visit_the_same_cells() {
        let ws = WordSearch::new(hogwarts_board(), hogwarts_words()).unwrap();

        let backtracking = ws.run(Strategy::BacktrackingTrie);
        let dfs = ws.run(Strategy::DfsTrie);
        assert_eq!(backtracking.words, dfs.words);
        assert_eq!(backtracking.cells_visited, dfs.cells_visited);
        assert!(backtracking.cells_visited >= ws.board().len());
    }

    #[test]
    fn test_compare_is_consistent() {
        let ws = create_search(
            &["catxen", "treean", "aemlai", "powder", "yilneo", "mloonn"],
            &["cat", "tree", "powder", "moon", "lane", "xyz"],
        );
        let comparison = ws.compare(2);

        assert_eq!(comparison.iterations, 2);
        assert_eq!(comparison.timings.len(), 3);
        assert!(comparison.consistent);

        let set_words = &comparison.timings[2].words;
        assert!(set_words.contains(&"cat".to_string()));
        assert!(set_words.contains(&"powder".to_string()));
        assert!(!set_words.contains(&"xyz".to_string()));
    }

    #[test]
    fn test_set_search_cutoffs() {
        // Every word is found on the first cell, so the scan ends there
        let ws = create_search(&["ab", "cd"], &["a"]);
        let report = ws.run(Strategy::DfsSet);
        assert_eq!(report.words, vec!["a"]);
        assert_eq!(report.cells_visited, 1);

        // Paths stop at two letters: 4 start cells plus 2 neighbors each
        let ws = create_search(&["ab", "cd"], &["zz"]);
        assert_eq!(ws.run(Strategy::DfsSet).cells_visited, 12);
    }

    #[test]
    fn test_compare_runs_at_least_once() {
        let ws = create_search(&["ab"], &["ab"]);
        assert_eq!(ws.compare(0).iterations, 1);
    }

    #[test]
    fn test_set_search_terminates_on_large_board() {
        let rows: Vec<String> = (0..9)
            .map(|r| (0..9).map(|c| (b'a' + ((r * 9 + c) % 26) as u8) as char).collect())
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let ws = create_search(&rows, &["ab", "zz"]);

        assert_eq!(ws.find_words_dfs_with_set(), vec!["ab"]);
        assert_eq!(
            word_set(&ws.find_words_dfs_with_trie()),
            word_set(&ws.find_words_dfs_with_set())
        );
    }

    #[test]
    fn test_from_input_rejects_null_word() {
        let input = PuzzleInput {
            board: grid(&["ab", "cd"]),
            words: vec![Some("ab".to_string()), None],
        };
        assert_eq!(
            WordSearch::from_input(input).unwrap_err(),
            ValidationError::EmptyWord
        );
    }

    #[test]
    fn test_construction_errors() {
        let board = grid(&["harr", "enay", "roti", "lape"]);
        assert_eq!(
            WordSearch::new(board.clone(), words(&["harry", "ron", "harry"])).unwrap_err(),
            ValidationError::DuplicateWords
        );
        assert_eq!(
            WordSearch::new(grid(&["ab", "cd"]), words(&["aB", "cd"])).unwrap_err(),
            ValidationError::InvalidCharacters
        );
        assert_eq!(
            WordSearch::new(grid(&["ab", "cd"]), words(&["word1", "ab", "word"])).unwrap_err(),
            ValidationError::InvalidCharacters
        );
        assert_eq!(
            WordSearch::new(grid(&["ab", "cd"]), words(&["ab", "cd", ""])).unwrap_err(),
            ValidationError::EmptyWord
        );
        assert_eq!(
            WordSearch::new(board, Vec::new()).unwrap_err(),
            ValidationError::InvalidInput
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let ws = WordSearch::new(hogwarts_board(), hogwarts_words()).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = Strategy::ALL
                .into_iter()
                .map(|strategy| {
                    let ws = &ws;
                    s.spawn(move || ws.run(strategy).words)
                })
                .collect();
            for handle in handles {
                let found = handle.join().unwrap();
                assert_eq!(word_set(&found), BTreeSet::from(["harry", "ron"]));
            }
        });
    }
}
