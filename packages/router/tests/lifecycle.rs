use std::rc::Rc;

use hashroute::{events::intercept_click, prelude::*};

mod common;
use common::{Calls, Element, RecordingEvents};

fn router_with_events(initial: &str) -> (Router, Rc<MemoryHistory>, RecordingEvents) {
    let history = Rc::new(MemoryHistory::with_initial_fragment(initial));
    let events = RecordingEvents::default();
    let router = Router::builder(history.clone())
        .events(events.clone())
        .build();
    (router, history, events)
}

#[test]
fn start_uses_current_fragment() {
    let (router, history, _) = router_with_events("#a/3");
    let calls = Calls::default();
    router.on("a/:x", calls.handler()).unwrap();

    router.start("a/1").unwrap();

    assert_eq!(calls.last().param("x"), Some("3"));
    assert_eq!(history.entries(), vec!["#a/3"]);
}

#[test]
fn start_falls_back_to_default_path() {
    for initial in ["", "#", "#!escaped", "no-marker"] {
        let (router, history, _) = router_with_events(initial);
        let calls = Calls::default();
        router.on("a/:x", calls.handler()).unwrap();

        router.start("a/1").unwrap();

        assert_eq!(calls.last().param("x"), Some("1"), "initial {initial:?}");
        assert_eq!(history.entries(), vec!["#a/1"]);
    }
}

#[test]
fn start_attaches_events_once() {
    let (router, _, events) = router_with_events("");
    router.on("home", Calls::default().handler()).unwrap();

    router.start("home").unwrap();
    router.start("home").unwrap();

    assert_eq!(*events.log.borrow(), vec!["attach"]);
    assert!(router.is_started());

    let weak = events.router.borrow().clone().unwrap();
    assert!(weak.upgrade().is_some());
}

#[test]
fn stop_detaches_and_pushes_empty_fragment() {
    let (router, history, events) = router_with_events("");
    router.on("home", Calls::default().handler()).unwrap();
    router.start("home").unwrap();

    router.stop();
    router.stop();

    assert_eq!(*events.log.borrow(), vec!["attach", "detach"]);
    assert!(!router.is_started());
    assert_eq!(history.entries(), vec!["#home", "#", "#"]);
}

#[test]
fn reset_clears_routes() {
    let (router, _, events) = router_with_events("");
    router.on("home", Calls::default().handler()).unwrap();
    router.start("home").unwrap();

    router.reset();

    assert!(router.routes().is_empty());
    assert_eq!(*events.log.borrow(), vec!["attach", "detach"]);
    assert_eq!(
        router.navigate("home"),
        Err(RouterError::NoRouteMatch {
            path: "home".into()
        })
    );
}

#[test]
fn start_failure_still_attaches() {
    let (router, _, events) = router_with_events("");
    assert!(router.start("missing").is_err());
    assert_eq!(*events.log.borrow(), vec!["attach"]);
}

#[test]
fn in_page_links_are_followed() {
    let (router, history, _) = router_with_events("");
    let calls = Calls::default();
    router.on("doc/:id", calls.handler()).unwrap();

    let modifiers = Modifiers {
        ctrl: true,
        ..Default::default()
    };
    let followed = router
        .follow_link("#doc/9", OriginLink::new("#doc/9"), modifiers)
        .unwrap();

    assert!(followed);
    let req = calls.last();
    assert_eq!(req.param("id"), Some("9"));
    assert_eq!(req.modifiers(), Some(modifiers));
    assert_eq!(req.origin_link().map(|l| l.href()), Some("#doc/9"));
    assert_eq!(history.current_fragment(), "#doc/9");
}

#[test]
fn empty_fragment_link_is_swallowed() {
    let (router, history, _) = router_with_events("");
    assert_eq!(
        router.follow_link("#", OriginLink::new("#"), Modifiers::default()),
        Ok(true)
    );
    assert_eq!(history.len(), 1);
}

#[test]
fn other_links_are_left_to_the_browser() {
    let (router, _, _) = router_with_events("");
    assert_eq!(
        router.follow_link(
            "https://example.com/#a",
            OriginLink::new("https://example.com/#a"),
            Modifiers::default()
        ),
        Ok(false)
    );
}

#[test]
fn clicks_inside_an_anchor_are_routed() {
    let (router, history, _) = router_with_events("");
    let calls = Calls::default();
    router.on("doc/:id", calls.handler()).unwrap();

    let body = Element::new("body", None);
    let icon = body.child("a", Some("#doc/4")).child("span", None).child("i", None);
    let modifiers = Modifiers {
        shift: true,
        ..Default::default()
    };

    assert_eq!(intercept_click(&router, icon, modifiers), Ok(true));
    let req = calls.last();
    assert_eq!(req.param("id"), Some("4"));
    assert_eq!(req.modifiers(), Some(modifiers));
    assert_eq!(req.origin_link().map(|l| l.href()), Some("#doc/4"));
    assert_eq!(history.current_fragment(), "#doc/4");
}

#[test]
fn clicks_outside_in_page_links_are_ignored() {
    let (router, history, _) = router_with_events("");
    router.on("doc/:id", Calls::default().handler()).unwrap();

    let body = Element::new("body", None);
    let plain = body.child("p", None);
    let external = body.child("a", Some("/doc/4")).child("b", None);

    assert_eq!(intercept_click(&router, plain, Modifiers::default()), Ok(false));
    assert_eq!(intercept_click(&router, external, Modifiers::default()), Ok(false));
    assert_eq!(history.len(), 1);
}

#[test]
fn unroutable_click_is_still_claimed() {
    let (router, _, _) = router_with_events("");
    let link = Element::new("a", Some("#nowhere"));

    assert_eq!(
        intercept_click(&router, link, Modifiers::default()),
        Err(RouterError::NoRouteMatch {
            path: "nowhere".into()
        })
    );
}

#[test]
fn history_changes_are_redispatched_without_push() {
    let (router, history, _) = router_with_events("");
    let calls = Calls::default();
    router.on("page/:n", calls.handler()).unwrap();
    router.start("page/1").unwrap();
    router.navigate("page/2").unwrap();

    history.go_back();
    assert_eq!(
        router.sync_with_history(),
        Ok(Some(NavigationStatus::Handled))
    );

    assert_eq!(calls.paths(), vec!["page/1", "page/2", "page/1"]);
    assert_eq!(history.entries(), vec!["#page/1", "#page/2"]);
}

#[test]
fn unroutable_history_change_is_ignored() {
    let (router, history, _) = router_with_events("");
    router.on("page", Calls::default().handler()).unwrap();
    router.navigate("page").unwrap();

    history.go_back();
    assert_eq!(router.sync_with_history(), Ok(None));
}

#[test]
fn config_is_handed_to_router() {
    let history = Rc::new(MemoryHistory::default());
    let router = Router::builder(history)
        .config(RouterConfig::default().follow_history(false))
        .build();
    assert!(!router.config().follows_history());
    assert!(router.config().intercepts_links());
}
