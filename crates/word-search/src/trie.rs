//! Prefix tree over lowercase ASCII words.
//!
//! The search engine uses the tree to drop a path the moment no dictionary
//! word can extend it. Lookups cost O(length of the query) no matter how
//! many words were inserted.

/// Number of child slots per node, one per letter `a..=z`
const ALPHABET_SIZE: usize = 26;

/// Map a character to its child slot. Anything outside `a..=z` has no slot,
/// so board cells holding such characters never extend a path.
fn slot(c: char) -> Option<usize> {
    if c.is_ascii_lowercase() {
        Some((c as u8 - b'a') as usize)
    } else {
        None
    }
}

/// A node in the prefix tree
#[derive(Debug, Default)]
pub struct PrefixNode {
    children: [Option<Box<PrefixNode>>; ALPHABET_SIZE],
    terminal: bool,
}

impl PrefixNode {
    /// Follow the edge labelled `c`
    pub fn child(&self, c: char) -> Option<&PrefixNode> {
        slot(c).and_then(|i| self.children[i].as_deref())
    }

    /// True if a complete word ends at this node
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True if some longer word extends this node
    pub fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// Prefix tree built once from the target words and read-only afterwards
#[derive(Debug, Default)]
pub struct PrefixTree {
    root: PrefixNode,
    len: usize,
}

impl PrefixTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word. Inserting the same word twice is a no-op.
    ///
    /// Characters outside `a..=z` cannot be stored; words are validated
    /// before they reach the tree, so such a word is ignored here.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return;
        }

        let mut node = &mut self.root;
        for c in word.chars() {
            // Checked above
            let i = (c as u8 - b'a') as usize;
            node = &mut **node.children[i].get_or_insert_with(Box::default);
        }

        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    /// True if `word` was inserted
    pub fn contains_word(&self, word: &str) -> bool {
        self.descend(word).map_or(false, PrefixNode::is_terminal)
    }

    /// True if some inserted word starts with `prefix` (or equals it)
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.descend(prefix)
            .map_or(false, |node| node.is_terminal() || node.has_children())
    }

    /// The node for the empty prefix
    pub fn root(&self) -> &PrefixNode {
        &self.root
    }

    /// Number of distinct words stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn descend(&self, s: &str) -> Option<&PrefixNode> {
        let mut node = &self.root;
        for c in s.chars() {
            node = node.child(c)?;
        }
        Some(node)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tree = PrefixTree::new();
        for word in iter {
            tree.insert(word.as_ref());
        }
        tree
    }
}
