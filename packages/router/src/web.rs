use std::cell::RefCell;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, Node};

use crate::{
    events::{intercept_click, LinkNode},
    navigation::{Modifiers, OriginLink},
    EventSource, RouterConfig, WeakRouter,
};

/// An [`EventSource`] listening on the browser window.
///
/// Clicks are captured before the page's own handlers see them. A click on an anchor whose
/// `href` starts with `#` has its default action prevented and is routed instead; any other click
/// is left alone.
#[derive(Default)]
pub struct WebEventSource {
    listeners: RefCell<Vec<EventListener>>,
}

impl WebEventSource {
    /// Create a new, detached [`WebEventSource`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for WebEventSource {
    fn attach(&self, router: WeakRouter, config: &RouterConfig) {
        let Some(window) = web_sys::window() else {
            error!("no `window` to attach router listeners to");
            return;
        };

        let mut listeners = self.listeners.borrow_mut();
        if !listeners.is_empty() {
            return;
        }

        if config.intercepts_links() {
            let router = router.clone();
            let options = EventListenerOptions {
                phase: EventListenerPhase::Capture,
                passive: false,
            };
            listeners.push(EventListener::new_with_options(
                &window,
                "click",
                options,
                move |event| on_click(&router, event),
            ));
        }

        if config.follows_history() {
            listeners.push(EventListener::new(&window, "popstate", move |_| {
                let Some(router) = router.upgrade() else {
                    return;
                };
                if let Err(err) = router.sync_with_history() {
                    error!("failed to follow history: {err}");
                }
            }));
        }
    }

    fn detach(&self) {
        self.listeners.borrow_mut().clear();
    }
}

fn on_click(router: &WeakRouter, event: &Event) {
    let Some(router) = router.upgrade() else {
        return;
    };
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
        return;
    };

    let modifiers = event
        .dyn_ref::<MouseEvent>()
        .map(|e| Modifiers {
            shift: e.shift_key(),
            alt: e.alt_key(),
            ctrl: e.ctrl_key(),
        })
        .unwrap_or_default();

    match intercept_click(&router, DomNode(target), modifiers) {
        Ok(true) => event.prevent_default(),
        Ok(false) => {}
        Err(err) => {
            event.prevent_default();
            error!("failed to follow link: {err}");
        }
    }
}

/// A DOM node walked by [`intercept_click`].
struct DomNode(Node);

impl LinkNode for DomNode {
    fn link_href(&self) -> Option<String> {
        let element = self.0.dyn_ref::<Element>()?;
        if !element.tag_name().eq_ignore_ascii_case("a") {
            return None;
        }
        element.get_attribute("href")
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_node().map(DomNode)
    }

    fn into_origin_link(self, href: String) -> OriginLink {
        match self.0.dyn_into::<Element>() {
            Ok(element) => OriginLink::from_element(href, element),
            Err(_) => OriginLink::new(href),
        }
    }
}
