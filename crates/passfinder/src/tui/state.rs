//! Query editing and request bookkeeping for the search screen.

use passfinder_core::ResultsView;

/// Single-line query editor. The cursor is a char index, not a byte index,
/// so Korean input edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    value: String,
    cursor: usize,
}

impl QueryInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) -> bool {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear the query. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        self.cursor = 0;
        if self.value.is_empty() {
            return false;
        }
        self.value.clear();
        true
    }
}

/// Result of one fetch as shown on screen.
#[derive(Debug, Clone)]
pub enum Outcome {
    Ready(ResultsView),
    /// Storage failure, displayed verbatim
    Failed(String),
}

/// Tracks which request is current. Every query change starts a new
/// generation; replies from older generations are dropped.
#[derive(Debug, Default)]
pub struct SearchState {
    generation: u64,
    pending: bool,
    outcome: Option<Outcome>,
}

impl SearchState {
    /// Start a new request and return its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// Apply a reply. Returns `false` if it was superseded.
    pub fn accept(&mut self, generation: u64, outcome: Outcome) -> bool {
        if generation != self.generation {
            return false;
        }
        self.outcome = Some(outcome);
        self.pending = false;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> QueryInput {
        let mut input = QueryInput::default();
        for c in text.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn test_insert_multibyte() {
        let mut input = typed("오사카");
        assert_eq!(input.value(), "오사카");
        assert_eq!(input.cursor(), 3);

        input.left();
        input.insert('X');
        assert_eq!(input.value(), "오사X카");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = typed("박물관");
        assert!(input.backspace());
        assert_eq!(input.value(), "박물");

        input.home();
        assert!(!input.backspace());
        assert!(input.delete());
        assert_eq!(input.value(), "물");

        input.end();
        assert!(!input.delete());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = typed("ab");
        input.right();
        assert_eq!(input.cursor(), 2);
        input.home();
        input.left();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_clear() {
        let mut input = typed("우메다");
        assert!(input.clear());
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);
        assert!(!input.clear());
    }

    #[test]
    fn test_superseded_reply_ignored() {
        let mut state = SearchState::default();
        let first = state.begin();
        let second = state.begin();
        assert!(state.is_pending());

        let stale = Outcome::Ready(ResultsView::build(Some("오"), &[]));
        assert!(!state.accept(first, stale));
        assert!(state.outcome().is_none());
        assert!(state.is_pending());

        let fresh = Outcome::Failed("Storage unavailable".to_string());
        assert!(state.accept(second, fresh));
        assert!(!state.is_pending());
        assert!(matches!(state.outcome(), Some(Outcome::Failed(msg)) if msg == "Storage unavailable"));
    }

    #[test]
    fn test_previous_outcome_kept_while_pending() {
        let mut state = SearchState::default();
        let g = state.begin();
        state.accept(g, Outcome::Ready(ResultsView::build(None, &[])));

        state.begin();
        assert!(state.is_pending());
        assert!(matches!(state.outcome(), Some(Outcome::Ready(_))));
    }
}
