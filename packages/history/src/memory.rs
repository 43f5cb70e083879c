use std::cell::RefCell;

use crate::History;

struct MemoryHistoryState {
    current: String,
    history: Vec<String>,
    future: Vec<String>,
}

/// A [`History`] provider that stores all navigation information in memory.
///
/// Unlike a browser, pushing the fragment that is already current still creates a new entry,
/// which keeps the stack an exact record of what the router asked for.
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_fragment("")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] whose only entry holds `fragment`.
    ///
    /// ```rust
    /// # use hashroute_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_fragment("#inbox");
    /// assert_eq!(history.current_fragment(), "#inbox");
    /// assert_eq!(history.can_go_back(), false);
    /// ```
    pub fn with_initial_fragment(fragment: impl ToString) -> Self {
        Self {
            state: MemoryHistoryState {
                current: fragment.to_string(),
                history: Vec::new(),
                future: Vec::new(),
            }
            .into(),
        }
    }

    /// Every entry on the stack, oldest first, including the forward stack.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        let read = self.state.borrow();
        read.history
            .iter()
            .chain(std::iter::once(&read.current))
            .chain(read.future.iter().rev())
            .cloned()
            .collect()
    }

    /// The number of entries on the stack, including the forward stack.
    #[must_use]
    pub fn len(&self) -> usize {
        let read = self.state.borrow();
        read.history.len() + 1 + read.future.len()
    }

    /// A history always holds its current entry, so it is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl History for MemoryHistory {
    fn current_fragment(&self) -> String {
        self.state.borrow().current.clone()
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    fn go_back(&self) {
        let mut write = self.state.borrow_mut();
        if let Some(last) = write.history.pop() {
            let old = std::mem::replace(&mut write.current, last);
            write.future.push(old);
        }
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        let mut write = self.state.borrow_mut();
        if let Some(next) = write.future.pop() {
            let old = std::mem::replace(&mut write.current, next);
            write.history.push(old);
        }
    }

    fn push(&self, fragment: String) {
        let mut write = self.state.borrow_mut();
        let old = std::mem::replace(&mut write.current, fragment);
        write.history.push(old);
        write.future.clear();
    }

    fn replace(&self, fragment: String) {
        self.state.borrow_mut().current = fragment;
    }
}
