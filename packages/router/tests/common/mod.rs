#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use hashroute::{events::LinkNode, prelude::*};

/// Collects every request a handler receives.
#[derive(Clone, Default)]
pub struct Calls(Rc<RefCell<Vec<NavigationRequest>>>);

impl Calls {
    pub fn handler(&self) -> Handler {
        let calls = self.0.clone();
        Handler::new(move |req| calls.borrow_mut().push(req))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn last(&self) -> NavigationRequest {
        self.0.borrow().last().cloned().expect("handler was called")
    }

    pub fn paths(&self) -> Vec<String> {
        self.0.borrow().iter().map(|r| r.path().to_string()).collect()
    }
}

/// An [`EventSource`] that only records attach/detach calls.
#[derive(Clone, Default)]
pub struct RecordingEvents {
    pub log: Rc<RefCell<Vec<&'static str>>>,
    pub router: Rc<RefCell<Option<WeakRouter>>>,
}

impl EventSource for RecordingEvents {
    fn attach(&self, router: WeakRouter, _config: &RouterConfig) {
        self.log.borrow_mut().push("attach");
        *self.router.borrow_mut() = Some(router);
    }

    fn detach(&self) {
        self.log.borrow_mut().push("detach");
    }
}

pub fn router() -> (Router, Rc<MemoryHistory>) {
    let history = Rc::new(MemoryHistory::default());
    (Router::new(history.clone()), history)
}

/// An element in a fake document tree, for driving click interception.
#[derive(Clone)]
pub struct Element(Rc<ElementData>);

struct ElementData {
    tag: &'static str,
    href: Option<&'static str>,
    parent: Option<Element>,
}

impl Element {
    pub fn new(tag: &'static str, href: Option<&'static str>) -> Self {
        Self(Rc::new(ElementData {
            tag,
            href,
            parent: None,
        }))
    }

    pub fn child(&self, tag: &'static str, href: Option<&'static str>) -> Self {
        Self(Rc::new(ElementData {
            tag,
            href,
            parent: Some(self.clone()),
        }))
    }
}

impl LinkNode for Element {
    fn link_href(&self) -> Option<String> {
        if self.0.tag != "a" {
            return None;
        }
        self.0.href.map(str::to_string)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }
}
