//! Errors raised by router calls.

/// An error returned by a [`Router`](crate::Router) call.
///
/// Errors are never caught inside the router. Whatever completed before the failure (for example
/// a history push ahead of a failed match) stays done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// A route whose compiled form is identical is already registered.
    #[error("route already defined: {pattern}")]
    DuplicateRoute {
        /// The pattern that is already registered.
        pattern: String,
    },

    /// The pattern could not be compiled into a matcher.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// No registered route has the compiled form of the pattern being removed.
    #[error("route not defined: {pattern}")]
    RouteNotFound {
        /// The pattern passed to [`Router::off`](crate::Router::off).
        pattern: String,
    },

    /// No route of the navigation's class (action or normal) matches the path.
    #[error("no route matches #{path}")]
    NoRouteMatch {
        /// The unmatched path, with its action marker if it had one.
        path: String,
    },

    /// A holder is already in place.
    #[error("a holder is already in place")]
    HolderAlreadyActive,

    /// A captured parameter is not valid percent-encoded UTF-8.
    #[error("parameter `{name}` has a malformed value: {value}")]
    MalformedParameter {
        /// The parameter name.
        name: String,
        /// The raw captured value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_offending_input() {
        assert_eq!(
            RouterError::DuplicateRoute {
                pattern: "a/:x".into()
            }
            .to_string(),
            "route already defined: a/:x"
        );
        assert_eq!(
            RouterError::NoRouteMatch {
                path: "!logout".into()
            }
            .to_string(),
            "no route matches #!logout"
        );
        assert_eq!(
            RouterError::HolderAlreadyActive.to_string(),
            "a holder is already in place"
        );
    }
}
