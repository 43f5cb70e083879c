//! History integration for fragment routing.
//!
//! The router never talks to the browser directly. It reads the current URL fragment and pushes
//! or replaces history entries through the [`History`] trait. [`MemoryHistory`] keeps everything
//! in memory, which is what native hosts and tests use. With the `web` feature enabled,
//! [`WebHashHistory`] drives `window.history` and `window.location`.

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// The marker that starts a URL fragment.
pub const FRAGMENT_MARKER: char = '#';

/// An integration with a fragment-addressed navigation history.
///
/// Fragments handed to and returned by a [`History`] are raw: they include the leading `#`, and
/// the empty fragment is either `""` or `"#"`.
pub trait History {
    /// Get the raw fragment of the current entry, including the leading `#`.
    ///
    /// ```rust
    /// # use hashroute_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// assert_eq!(history.current_fragment(), "");
    ///
    /// history.push(String::from("#inbox"));
    /// assert_eq!(history.current_fragment(), "#inbox");
    /// ```
    #[must_use]
    fn current_fragment(&self) -> String;

    /// Check whether there is a previous entry to go back to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Go back to the previous entry.
    ///
    /// Does nothing if there is no previous entry.
    fn go_back(&self);

    /// Check whether there is a future entry to go forward to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go forward to the next entry.
    ///
    /// Does nothing if there is no future entry.
    fn go_forward(&self);

    /// Push a new entry holding `fragment` and clear the forward stack.
    ///
    /// ```rust
    /// # use hashroute_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// history.push(String::from("#a/1"));
    /// assert!(history.can_go_back());
    /// ```
    fn push(&self, fragment: String);

    /// Overwrite the current entry with `fragment`, leaving the rest of the stack untouched.
    ///
    /// ```rust
    /// # use hashroute_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// history.replace(String::from("#a/1"));
    /// assert_eq!(history.current_fragment(), "#a/1");
    /// assert!(!history.can_go_back());
    /// ```
    fn replace(&self, fragment: String);
}

/// Extract the routable path from a raw fragment.
///
/// Returns [`None`] for an empty fragment and for bang-escaped fragments (`#!...`), which are
/// reserved for crawlers and other frameworks.
///
/// ```rust
/// # use hashroute_history::fragment_path;
/// assert_eq!(fragment_path("#users/7"), Some("users/7"));
/// assert_eq!(fragment_path("#"), None);
/// assert_eq!(fragment_path("#!/legacy"), None);
/// assert_eq!(fragment_path("users/7"), None);
/// ```
#[must_use]
pub fn fragment_path(raw: &str) -> Option<&str> {
    let path = raw.strip_prefix(FRAGMENT_MARKER)?;
    if path.is_empty() || path.starts_with('!') {
        return None;
    }
    Some(path)
}

/// Turn a router path into a raw fragment.
#[must_use]
pub fn to_fragment(path: &str) -> String {
    format!("{FRAGMENT_MARKER}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_path_requires_marker_and_content() {
        assert_eq!(fragment_path(""), None);
        assert_eq!(fragment_path("#"), None);
        assert_eq!(fragment_path("inbox"), None);
        assert_eq!(fragment_path("#inbox"), Some("inbox"));
        assert_eq!(fragment_path("#/inbox"), Some("/inbox"));
    }

    #[test]
    fn fragment_path_skips_bang_escaped() {
        assert_eq!(fragment_path("#!"), None);
        assert_eq!(fragment_path("#!logout"), None);
    }

    #[test]
    fn to_fragment_prefixes_marker() {
        assert_eq!(to_fragment("a/1"), "#a/1");
        assert_eq!(to_fragment(""), "#");
    }
}
