/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust
/// # use hashroute::prelude::*;
/// let cfg = RouterConfig::default().intercept_links(false);
/// assert!(!cfg.intercepts_links());
/// assert!(cfg.follows_history());
/// ```
///
/// With the `serde` feature, a config can be read from any serde format; missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct RouterConfig {
    intercept_links: bool,
    follow_history: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            intercept_links: true,
            follow_history: true,
        }
    }
}

impl RouterConfig {
    /// Whether clicks on `#` links are routed instead of followed by the browser.
    ///
    /// Defaults to [`true`].
    pub fn intercept_links(self, intercept_links: bool) -> Self {
        Self {
            intercept_links,
            ..self
        }
    }

    /// Whether back/forward navigation re-dispatches the new fragment.
    ///
    /// Defaults to [`true`].
    pub fn follow_history(self, follow_history: bool) -> Self {
        Self {
            follow_history,
            ..self
        }
    }

    /// See [`RouterConfig::intercept_links`].
    #[must_use]
    pub fn intercepts_links(&self) -> bool {
        self.intercept_links
    }

    /// See [`RouterConfig::follow_history`].
    #[must_use]
    pub fn follows_history(&self) -> bool {
        self.follow_history
    }
}
