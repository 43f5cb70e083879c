//! Types relating to navigation.

/// The state of the modifier keys when a navigation was triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Whether shift was held.
    pub shift: bool,
    /// Whether alt was held.
    pub alt: bool,
    /// Whether ctrl was held.
    pub ctrl: bool,
}

impl Modifiers {
    /// Returns `true` if any modifier was held.
    #[must_use]
    pub fn any(&self) -> bool {
        self.shift || self.alt || self.ctrl
    }
}

/// The anchor a navigation originated from.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginLink {
    href: String,
    #[cfg(feature = "web")]
    element: Option<web_sys::Element>,
}

impl OriginLink {
    /// Describe an anchor by its `href` attribute.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            #[cfg(feature = "web")]
            element: None,
        }
    }

    /// Describe a DOM anchor.
    #[cfg(feature = "web")]
    pub fn from_element(href: impl Into<String>, element: web_sys::Element) -> Self {
        Self {
            href: href.into(),
            element: Some(element),
        }
    }

    /// The raw `href` attribute of the anchor.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The DOM element of the anchor, when the navigation came from a real click.
    #[cfg(feature = "web")]
    #[must_use]
    pub fn element(&self) -> Option<&web_sys::Element> {
        self.element.as_ref()
    }
}

/// A navigation request, as handed to a route handler.
///
/// Requests are built right before the handler runs and are owned by it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRequest {
    path: String,
    origin_link: Option<OriginLink>,
    modifiers: Option<Modifiers>,
    params: Vec<(String, String)>,
}

impl NavigationRequest {
    pub(crate) fn new(
        path: String,
        origin_link: Option<OriginLink>,
        modifiers: Option<Modifiers>,
        params: Vec<(String, String)>,
    ) -> Self {
        Self {
            path,
            origin_link,
            modifiers,
            params,
        }
    }

    /// The path that was matched, without its action marker.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The anchor that triggered the navigation, if any.
    #[must_use]
    pub fn origin_link(&self) -> Option<&OriginLink> {
        self.origin_link.as_ref()
    }

    /// The modifier keys held when the navigation was triggered, if known.
    #[must_use]
    pub fn modifiers(&self) -> Option<Modifiers> {
        self.modifiers
    }

    /// The decoded value of parameter `name`.
    ///
    /// If a pattern repeats a name, the rightmost capture wins.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All decoded parameters, in pattern order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A target for the router to navigate to.
///
/// ```rust
/// # use hashroute::prelude::*;
/// let target = NavigationTarget::new("inbox/3")
///     .modifiers(Modifiers { ctrl: true, ..Default::default() })
///     .without_push();
/// assert_eq!(target.path(), "inbox/3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationTarget {
    pub(crate) path: String,
    pub(crate) link: Option<OriginLink>,
    pub(crate) modifiers: Option<Modifiers>,
    pub(crate) push: bool,
}

impl NavigationTarget {
    /// Navigate to `path`, pushing a history entry.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            link: None,
            modifiers: None,
            push: true,
        }
    }

    /// Record the anchor this navigation originated from.
    pub fn link(self, link: OriginLink) -> Self {
        Self {
            link: Some(link),
            ..self
        }
    }

    /// Record the modifier keys held at trigger time.
    pub fn modifiers(self, modifiers: Modifiers) -> Self {
        Self {
            modifiers: Some(modifiers),
            ..self
        }
    }

    /// Do not push a history entry for this navigation.
    pub fn without_push(self) -> Self {
        Self {
            push: false,
            ..self
        }
    }

    /// The path to navigate to, as given.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// How a navigation call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStatus {
    /// A handler ran.
    Handled,
    /// The hold gate parked the navigation until its release fires.
    Deferred,
}
