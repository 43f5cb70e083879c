//! Route pattern compilation.
//!
//! A pattern is a `/`-separated path in which a segment of the form `:name` captures one path
//! segment. Everything else is matched literally:
//!
//! ```text
//! "!/item/:id/edit"
//!   → action: true, pattern: "item/:id/edit"
//!   → key:    "item/([^/]+)/edit"
//!   → regex:  "^item/([^/]+)/edit$", params: ["id"]
//! ```

use regex::Regex;

use crate::RouterError;

/// Marks an action pattern or an action navigation.
pub const ACTION_MARKER: char = '!';

/// Separates path segments.
pub const SEPARATOR: char = '/';

/// Introduces a placeholder segment.
pub const PLACEHOLDER_MARKER: char = ':';

const PLACEHOLDER_CAPTURE: &str = "([^/]+)";

/// Split a leading action marker off `path`.
///
/// ```rust
/// # use hashroute::pattern::split_action;
/// assert_eq!(split_action("!logout"), (true, "logout"));
/// assert_eq!(split_action("inbox"), (false, "inbox"));
/// ```
#[must_use]
pub fn split_action(path: &str) -> (bool, &str) {
    match path.strip_prefix(ACTION_MARKER) {
        Some(rest) => (true, rest),
        None => (false, path),
    }
}

/// Strip a single leading separator.
#[must_use]
pub fn strip_separator(path: &str) -> &str {
    path.strip_prefix(SEPARATOR).unwrap_or(path)
}

/// The name of a placeholder segment, if `segment` is one.
#[must_use]
pub fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix(PLACEHOLDER_MARKER)
        .filter(|name| !name.is_empty())
}

/// The normalized form of a pattern: its action flag, the pattern text and its table key.
///
/// This is cheap to compute and is all [`Router::off`](crate::Router::off) needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternKey {
    is_action: bool,
    pattern: String,
    key: String,
    param_names: Vec<String>,
}

impl PatternKey {
    /// Normalize `raw` and compute its key.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let (is_action, rest) = split_action(raw);
        let pattern = strip_separator(rest).to_string();

        let mut param_names = Vec::new();
        let body = pattern
            .split(SEPARATOR)
            .map(|segment| match placeholder_name(segment) {
                Some(name) => {
                    param_names.push(name.to_string());
                    PLACEHOLDER_CAPTURE.to_string()
                }
                None => regex::escape(segment),
            })
            .collect::<Vec<_>>()
            .join("/");

        Self {
            is_action,
            pattern,
            key: body,
            param_names,
        }
    }

    /// Whether the pattern was written with the action marker.
    #[must_use]
    pub fn is_action(&self) -> bool {
        self.is_action
    }

    /// The pattern without its action marker or leading separator.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The table key: the unanchored regex source.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether two patterns would occupy the same table slot.
    ///
    /// Action and normal patterns live side by side, so only patterns of the same class with the
    /// same key collide.
    ///
    /// ```rust
    /// # use hashroute::pattern::PatternKey;
    /// let normal = PatternKey::new("a/:x");
    /// assert!(normal.collides_with(&PatternKey::new("/a/:y")));
    /// assert!(!normal.collides_with(&PatternKey::new("!a/:x")));
    /// ```
    #[must_use]
    pub fn collides_with(&self, other: &PatternKey) -> bool {
        self.is_action == other.is_action && self.key == other.key
    }

    /// Placeholder names, left to right.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    key: PatternKey,
    regex: Regex,
}

impl RoutePattern {
    /// Compile `raw` into a matcher anchored at both ends.
    ///
    /// ```rust
    /// # use hashroute::pattern::RoutePattern;
    /// let pattern = RoutePattern::new("/item/:id/:name").unwrap();
    /// assert_eq!(pattern.param_names(), &["id", "name"]);
    /// assert_eq!(pattern.captures("item/7/box"), Some(vec!["7", "box"]));
    /// assert_eq!(pattern.captures("item/7"), None);
    /// ```
    pub fn new(raw: &str) -> Result<Self, RouterError> {
        let key = PatternKey::new(raw);
        let regex = Regex::new(&format!("^{}$", key.key())).map_err(|err| {
            RouterError::InvalidPattern {
                pattern: raw.to_string(),
                reason: err.to_string(),
            }
        })?;

        Ok(Self { key, regex })
    }

    /// The normalized key of this pattern.
    #[must_use]
    pub fn pattern_key(&self) -> &PatternKey {
        &self.key
    }

    /// Whether this is an action pattern.
    #[must_use]
    pub fn is_action(&self) -> bool {
        self.key.is_action()
    }

    /// The pattern without its action marker or leading separator.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.key.pattern()
    }

    /// The table key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.key()
    }

    /// Placeholder names, left to right.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        self.key.param_names()
    }

    /// Match `path` against the whole pattern and return the raw captures in order.
    #[must_use]
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map_or("", |m| m.as_str()))
                .collect(),
        )
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_action() {
            write!(f, "{ACTION_MARKER}")?;
        }
        write!(f, "{}", self.pattern())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_action_marker_then_separator() {
        let key = PatternKey::new("!/logout");
        assert!(key.is_action());
        assert_eq!(key.pattern(), "logout");
        assert_eq!(key.key(), "logout");
    }

    #[test]
    fn placeholders_become_captures() {
        let key = PatternKey::new("a/:x/b/:y");
        assert_eq!(key.key(), "a/([^/]+)/b/([^/]+)");
        assert_eq!(key.param_names(), &["x", "y"]);
    }

    #[test]
    fn placeholder_names_do_not_affect_key() {
        let normal = PatternKey::new("a/:x");
        assert!(normal.collides_with(&PatternKey::new("/a/:other")));
        assert!(!normal.collides_with(&PatternKey::new("!a/:x")));
        assert!(PatternKey::new("!a/:x").collides_with(&PatternKey::new("!/a/:y")));
    }

    #[test]
    fn literal_bang_does_not_collide_with_action() {
        assert!(!PatternKey::new("/!x").collides_with(&PatternKey::new("!x")));
    }

    #[test]
    fn literal_text_is_escaped() {
        let pattern = RoutePattern::new("api/v1.0").unwrap();
        assert!(pattern.captures("api/v1.0").is_some());
        assert!(pattern.captures("api/v1x0").is_none());
    }

    #[test]
    fn bare_colon_is_literal() {
        let pattern = RoutePattern::new("a/:").unwrap();
        assert!(pattern.param_names().is_empty());
        assert!(pattern.captures("a/:").is_some());
        assert!(pattern.captures("a/b").is_none());
    }

    #[test]
    fn placeholder_never_spans_separators() {
        let pattern = RoutePattern::new("file/:name").unwrap();
        assert_eq!(pattern.captures("file/readme"), Some(vec!["readme"]));
        assert_eq!(pattern.captures("file/a/b"), None);
        assert_eq!(pattern.captures("file/"), None);
    }

    #[test]
    fn match_is_anchored() {
        let pattern = RoutePattern::new("inbox").unwrap();
        assert!(pattern.captures("inbox").is_some());
        assert!(pattern.captures("inbox/1").is_none());
        assert!(pattern.captures("my-inbox").is_none());
    }

    #[test]
    fn empty_pattern_matches_empty_path() {
        let pattern = RoutePattern::new("/").unwrap();
        assert_eq!(pattern.captures(""), Some(vec![]));
        assert!(pattern.captures("home").is_none());
    }

    #[test]
    fn display_restores_marker() {
        assert_eq!(RoutePattern::new("!/a/:x").unwrap().to_string(), "!a/:x");
        assert_eq!(RoutePattern::new("/a/:x").unwrap().to_string(), "a/:x");
    }
}
