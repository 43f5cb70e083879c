//! The route table.

use std::rc::Rc;

use tracing::{debug, trace};
use urlencoding::decode;

use crate::{
    navigation::NavigationRequest,
    pattern::{PatternKey, RoutePattern},
    RouterError,
};

/// A route handler.
///
/// Handlers compare by identity: two clones of one [`Handler`] are equal, two handlers built from
/// identical closures are not. This is what [`Router::off`](crate::Router::off) uses to only
/// remove a route its caller owns.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(NavigationRequest)>);

impl Handler {
    /// Wrap a callback.
    pub fn new(callback: impl Fn(NavigationRequest) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub(crate) fn call(&self, request: NavigationRequest) {
        (self.0)(request)
    }
}

impl<F: Fn(NavigationRequest) + 'static> From<F> for Handler {
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pattern: RoutePattern,
    handler: Handler,
}

impl RouteDescriptor {
    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// The handler invoked on match.
    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

/// A route picked for a path, with its parameters decoded.
pub(crate) struct ResolvedRoute {
    pub(crate) handler: Handler,
    pub(crate) params: Vec<(String, String)>,
}

/// Registered routes in registration order.
///
/// Lookups by key are linear; match order is registration order, so the `Vec` is the index.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Register `pattern` with `handler`.
    pub fn insert(&mut self, pattern: &str, handler: Handler) -> Result<(), RouterError> {
        let pattern = RoutePattern::new(pattern)?;

        if let Some(existing) = self.position(pattern.pattern_key()) {
            return Err(RouterError::DuplicateRoute {
                pattern: self.routes[existing].pattern.to_string(),
            });
        }

        debug!(route = %pattern, key = pattern.key(), "route registered");
        self.routes.push(RouteDescriptor { pattern, handler });
        Ok(())
    }

    /// Remove `pattern`, but only if `handler` is [`None`] or the stored handler.
    ///
    /// Returns whether a route was removed.
    pub fn remove(&mut self, pattern: &str, handler: Option<&Handler>) -> Result<bool, RouterError> {
        let key = PatternKey::new(pattern);
        let index = self
            .position(&key)
            .ok_or_else(|| RouterError::RouteNotFound {
                pattern: pattern.to_string(),
            })?;

        if handler.is_some_and(|handler| *handler != self.routes[index].handler) {
            debug!(route = pattern, "route kept, handler does not own it");
            return Ok(false);
        }

        let removed = self.routes.remove(index);
        debug!(route = %removed.pattern, "route removed");
        Ok(true)
    }

    /// Remove every route.
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// The number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered routes in match order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Find the first route of the given class matching `path`.
    ///
    /// `path` must already be stripped of its action marker and leading separator. Returns
    /// `Ok(None)` if nothing matches.
    pub(crate) fn resolve(
        &self,
        is_action: bool,
        path: &str,
    ) -> Result<Option<ResolvedRoute>, RouterError> {
        for route in self.routes.iter().filter(|r| r.pattern.is_action() == is_action) {
            trace!(route = %route.pattern, path, "trying route");

            let Some(captures) = route.pattern.captures(path) else {
                continue;
            };

            let params = route
                .pattern
                .param_names()
                .iter()
                .zip(captures)
                .map(|(name, raw)| {
                    let decoded = escapes_are_complete(raw)
                        .then(|| decode(raw).ok())
                        .flatten();
                    match decoded {
                        Some(value) => Ok((name.clone(), value.into_owned())),
                        None => Err(RouterError::MalformedParameter {
                            name: name.clone(),
                            value: raw.to_string(),
                        }),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!(route = %route.pattern, path, "route matched");
            return Ok(Some(ResolvedRoute {
                handler: route.handler.clone(),
                params,
            }));
        }

        Ok(None)
    }

    fn position(&self, key: &PatternKey) -> Option<usize> {
        self.routes
            .iter()
            .position(|route| route.pattern.pattern_key().collides_with(key))
    }
}

/// Whether every `%` in `raw` opens a two-digit hex escape.
///
/// `decode` passes broken escapes through as literal text; captures must not.
fn escapes_are_complete(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
            _ => return false,
        }
    }
    true
}
