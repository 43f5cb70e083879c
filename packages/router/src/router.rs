//! The router handle and the navigation dispatcher.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use hashroute_history::{fragment_path, to_fragment, History};
use tracing::{debug, warn};

use crate::{
    events::link_fragment,
    hold::{Admission, HoldOutcome, HoldState, Holder, Release},
    navigation::{Modifiers, NavigationRequest, NavigationStatus, NavigationTarget, OriginLink},
    pattern::{split_action, strip_separator, ACTION_MARKER},
    table::{Handler, ResolvedRoute, RouteTable},
    url_builder::build_url,
    EventSource, RouterConfig, RouterError,
};

struct RouterInner {
    config: RouterConfig,
    history: Rc<dyn History>,
    events: Option<Box<dyn EventSource>>,
    intercepting: Cell<bool>,
    table: RefCell<RouteTable>,
    hold: RefCell<HoldState>,
}

/// A fragment router.
///
/// [`Router`] is a cheap handle: clones share the same route table, hold gate and history. It is
/// meant to be created once per application and passed around explicitly.
///
/// ```rust
/// # use hashroute::prelude::*;
/// # use std::{cell::RefCell, rc::Rc};
/// let history = Rc::new(MemoryHistory::default());
/// let router = Router::new(history.clone());
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let log = seen.clone();
/// router
///     .on("item/:id/:name", move |req: NavigationRequest| {
///         log.borrow_mut()
///             .push(format!("{}={}", req.param("id").unwrap(), req.param("name").unwrap()));
///     })
///     .unwrap();
///
/// router.navigate("item/7/a%20b").unwrap();
/// assert_eq!(*seen.borrow(), vec!["7=a b"]);
/// assert_eq!(history.current_fragment(), "#item/7/a%20b");
/// ```
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

/// A non-owning [`Router`] handle, for event listeners and pending releases.
#[derive(Clone)]
pub struct WeakRouter {
    inner: Weak<RouterInner>,
}

impl WeakRouter {
    /// Get the router back, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Router> {
        self.inner.upgrade().map(|inner| Router { inner })
    }
}

/// Builds a [`Router`] with a custom configuration or event source.
pub struct RouterBuilder {
    config: RouterConfig,
    history: Rc<dyn History>,
    events: Option<Box<dyn EventSource>>,
}

impl RouterBuilder {
    /// Use `config` instead of [`RouterConfig::default`].
    pub fn config(self, config: RouterConfig) -> Self {
        Self { config, ..self }
    }

    /// Intercept browser events through `events` while the router is started.
    pub fn events(self, events: impl EventSource + 'static) -> Self {
        Self {
            events: Some(Box::new(events)),
            ..self
        }
    }

    /// Create the router.
    #[must_use]
    pub fn build(self) -> Router {
        Router {
            inner: Rc::new(RouterInner {
                config: self.config,
                history: self.history,
                events: self.events,
                intercepting: Cell::new(false),
                table: RefCell::default(),
                hold: RefCell::default(),
            }),
        }
    }
}

impl Router {
    /// Create a router over `history`, with the default configuration and no event source.
    #[must_use]
    pub fn new(history: Rc<dyn History>) -> Self {
        Self::builder(history).build()
    }

    /// Start building a router over `history`.
    pub fn builder(history: Rc<dyn History>) -> RouterBuilder {
        RouterBuilder {
            config: RouterConfig::default(),
            history,
            events: None,
        }
    }

    /// Get a non-owning handle to this router.
    #[must_use]
    pub fn downgrade(&self) -> WeakRouter {
        WeakRouter {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// The router's configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// The history the router pushes to.
    #[must_use]
    pub fn history(&self) -> Rc<dyn History> {
        self.inner.history.clone()
    }

    /// Register `handler` for `pattern`.
    ///
    /// A leading `!` makes it an action route, matched only by action navigations. A leading `/`
    /// is ignored. Segments of the form `:name` capture one path segment.
    ///
    /// Fails with [`RouterError::DuplicateRoute`] if a route of the same class and shape is
    /// already registered.
    pub fn on(&self, pattern: &str, handler: impl Into<Handler>) -> Result<(), RouterError> {
        self.inner.table.borrow_mut().insert(pattern, handler.into())
    }

    /// Remove the route registered for `pattern`.
    ///
    /// When `handler` is given, the route is only removed if it was registered with that very
    /// handler; otherwise the call silently does nothing. Fails with
    /// [`RouterError::RouteNotFound`] if no route has the shape of `pattern`.
    pub fn off(&self, pattern: &str, handler: Option<&Handler>) -> Result<(), RouterError> {
        self.inner
            .table
            .borrow_mut()
            .remove(pattern, handler)
            .map(|_| ())
    }

    /// The registered patterns, in match order.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.inner
            .table
            .borrow()
            .iter()
            .map(|route| route.pattern().to_string())
            .collect()
    }

    /// Begin intercepting events and dispatch the initial route.
    ///
    /// The initial route is the current fragment when it is routable (see
    /// [`fragment_path`]), and `default_path` otherwise. It replaces the current history entry.
    pub fn start(&self, default_path: &str) -> Result<NavigationStatus, RouterError> {
        self.intercept();

        let current = self.inner.history.current_fragment();
        let initial = fragment_path(&current).unwrap_or(default_path).to_string();
        debug!(path = %initial, "router started");

        self.inner.history.replace(to_fragment(&initial));
        self.navigate(NavigationTarget::new(initial).without_push())
    }

    /// Stop intercepting events and push an empty fragment.
    pub fn stop(&self) {
        if self.inner.intercepting.replace(false) {
            if let Some(events) = &self.inner.events {
                events.detach();
            }
        }

        self.inner.history.push(to_fragment(""));
        debug!("router stopped");
    }

    /// [`stop`](Router::stop) and remove every route.
    pub fn reset(&self) {
        self.stop();
        self.inner.table.borrow_mut().clear();
    }

    /// Whether the router is intercepting events.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.inner.intercepting.get()
    }

    /// Navigate to a path or a [`NavigationTarget`].
    ///
    /// Paths starting with `!` are actions: they bypass the hold gate, match only action routes
    /// and never touch the history. Any other navigation goes through the hold gate, then pushes
    /// a history entry (unless the target says otherwise) and runs the first matching route.
    ///
    /// Returns [`NavigationStatus::Deferred`] if a holder parked the navigation. While a
    /// navigation is parked, a later one replaces it and the holder is not consulted again.
    pub fn navigate(
        &self,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationStatus, RouterError> {
        let target = target.into();
        let (is_action, _) = split_action(target.path());
        debug!(path = target.path(), is_action, "navigating");

        if is_action {
            self.dispatch(target)?;
            return Ok(NavigationStatus::Handled);
        }

        let admission = self.inner.hold.borrow_mut().admit(target);
        match admission {
            Admission::Proceed(target) => {
                self.dispatch(target)?;
                Ok(NavigationStatus::Handled)
            }
            Admission::Superseded => {
                warn!("parked navigation superseded");
                Ok(NavigationStatus::Deferred)
            }
            Admission::Consult { holder, generation } => {
                let release = Release::new(self.downgrade(), generation);
                match holder.consult(release.clone()) {
                    HoldOutcome::Release => {
                        release.release()?;
                        Ok(NavigationStatus::Handled)
                    }
                    HoldOutcome::Wait if release.is_released() => Ok(NavigationStatus::Handled),
                    HoldOutcome::Wait => {
                        debug!("navigation held");
                        Ok(NavigationStatus::Deferred)
                    }
                }
            }
        }
    }

    /// Like [`navigate`](Router::navigate), but overwrite the current history entry instead of
    /// pushing one. Action paths behave exactly as with `navigate`.
    pub fn replace(
        &self,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationStatus, RouterError> {
        let target = target.into();
        if split_action(target.path()).0 {
            return self.navigate(target);
        }

        self.inner.history.replace(to_fragment(target.path()));
        self.navigate(target.without_push())
    }

    /// Install a holder, or clear it with [`None`].
    ///
    /// Fails with [`RouterError::HolderAlreadyActive`] when installing a holder while another
    /// one is active.
    pub fn hold(&self, holder: Option<Holder>) -> Result<(), RouterError> {
        self.inner.hold.borrow_mut().install(holder)
    }

    /// Whether a holder is installed.
    #[must_use]
    pub fn has_holder(&self) -> bool {
        self.inner.hold.borrow().holder().is_some()
    }

    /// Whether a navigation is parked waiting for a release.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.inner.hold.borrow().is_pending()
    }

    /// Fill the placeholders of `pattern` with `args`. See [`build_url`].
    pub fn url<I>(&self, pattern: &str, args: I) -> String
    where
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        build_url(pattern, args)
    }

    /// Handle a click on a link.
    ///
    /// Returns whether the link is an in-page link that the router took over; the caller should
    /// then prevent the browser's default action. An in-page link with an empty fragment is taken
    /// over but navigates nowhere.
    pub fn follow_link(
        &self,
        href: &str,
        link: OriginLink,
        modifiers: Modifiers,
    ) -> Result<bool, RouterError> {
        let Some(path) = link_fragment(href) else {
            return Ok(false);
        };

        if !path.is_empty() {
            self.navigate(
                NavigationTarget::new(path)
                    .link(link)
                    .modifiers(modifiers),
            )?;
        }
        Ok(true)
    }

    /// Re-dispatch the current fragment after a back/forward navigation.
    ///
    /// Returns [`None`] without navigating when the fragment is not routable.
    pub fn sync_with_history(&self) -> Result<Option<NavigationStatus>, RouterError> {
        let current = self.inner.history.current_fragment();
        match fragment_path(&current) {
            Some(path) => self
                .navigate(NavigationTarget::new(path).without_push())
                .map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn resume_parked(&self, generation: u64) -> Result<(), RouterError> {
        let parked = self.inner.hold.borrow_mut().release(generation);
        match parked {
            Some(target) => {
                debug!(path = target.path(), "hold released");
                self.dispatch(target)
            }
            None => Ok(()),
        }
    }

    fn intercept(&self) {
        if self.inner.intercepting.replace(true) {
            return;
        }
        if let Some(events) = &self.inner.events {
            events.attach(self.downgrade(), &self.inner.config);
        }
    }

    /// Push history if needed, then run the first matching route.
    fn dispatch(&self, target: NavigationTarget) -> Result<(), RouterError> {
        let NavigationTarget {
            path,
            link,
            modifiers,
            push,
        } = target;
        let (is_action, path) = split_action(&path);

        if !is_action && push {
            self.inner.history.push(to_fragment(path));
        }

        let remaining = strip_separator(path);
        let resolved = self.inner.table.borrow().resolve(is_action, remaining)?;
        let Some(ResolvedRoute { handler, params }) = resolved else {
            return Err(RouterError::NoRouteMatch {
                path: match is_action {
                    true => format!("{ACTION_MARKER}{remaining}"),
                    false => remaining.to_string(),
                },
            });
        };

        handler.call(NavigationRequest::new(
            path.to_string(),
            link,
            modifiers,
            params,
        ));
        Ok(())
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.inner.config)
            .field("routes", &self.routes())
            .field("started", &self.is_started())
            .finish()
    }
}
