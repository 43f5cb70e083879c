//! External event interception.
//!
//! The router reacts to two kinds of browser events: clicks on in-page (`#`) links and
//! back/forward navigation. An [`EventSource`] wires those events to
//! [`Router::follow_link`](crate::Router::follow_link) and
//! [`Router::sync_with_history`](crate::Router::sync_with_history). The router attaches its
//! source on [`start`](crate::Router::start) and detaches it on [`stop`](crate::Router::stop),
//! never twice in a row.

use crate::{
    navigation::{Modifiers, OriginLink},
    Router, RouterConfig, RouterError, WeakRouter,
};

/// A source of click and back/forward events.
pub trait EventSource {
    /// Begin delivering events to `router`.
    ///
    /// Implementations should only listen for what `config` enables, and must not keep the
    /// router alive: hold on to the [`WeakRouter`], not an upgraded handle.
    fn attach(&self, router: WeakRouter, config: &RouterConfig);

    /// Stop delivering events.
    fn detach(&self);
}

/// The router path of an in-page link, if `href` is one.
///
/// ```rust
/// # use hashroute::events::link_fragment;
/// assert_eq!(link_fragment("#inbox"), Some("inbox"));
/// assert_eq!(link_fragment("#"), Some(""));
/// assert_eq!(link_fragment("/inbox"), None);
/// ```
#[must_use]
pub fn link_fragment(href: &str) -> Option<&str> {
    href.strip_prefix(hashroute_history::FRAGMENT_MARKER)
}

/// A node of a document tree, as seen by link interception.
///
/// The web glue implements this for DOM nodes. Anything tree-shaped can implement it to drive
/// [`intercept_click`] without a browser.
pub trait LinkNode: Sized {
    /// The `href` of this node, if it is an anchor carrying one.
    fn link_href(&self) -> Option<String>;

    /// The parent of this node.
    fn parent(&self) -> Option<Self>;

    /// Describe this anchor for the handler.
    fn into_origin_link(self, href: String) -> OriginLink {
        OriginLink::new(href)
    }
}

/// The closest anchor at or above `node`, along with its `href`.
pub fn closest_link<N: LinkNode>(node: N) -> Option<(N, String)> {
    let mut current = Some(node);
    while let Some(node) = current {
        if let Some(href) = node.link_href() {
            return Some((node, href));
        }
        current = node.parent();
    }
    None
}

/// Route a click on `target`.
///
/// Returns `Ok(true)` when the click landed on an in-page link and the browser's default action
/// must be prevented. Errors from the navigation are returned after the click was claimed, so a
/// failing route still prevents the default action.
pub fn intercept_click<N: LinkNode>(
    router: &Router,
    target: N,
    modifiers: Modifiers,
) -> Result<bool, RouterError> {
    let Some((anchor, href)) = closest_link(target) else {
        return Ok(false);
    };
    if link_fragment(&href).is_none() {
        return Ok(false);
    }

    let link = anchor.into_origin_link(href.clone());
    router.follow_link(&href, link, modifiers)
}
