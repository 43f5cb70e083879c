#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod events;
pub mod hold;
pub mod navigation;
pub mod pattern;
pub mod table;

mod error;
mod router;
mod router_cfg;
mod url_builder;

#[cfg(feature = "web")]
mod web;

pub use error::RouterError;
pub use events::EventSource;
pub use router::{Router, RouterBuilder, WeakRouter};
pub use router_cfg::RouterConfig;
pub use url_builder::build_url;

#[cfg(feature = "web")]
pub use web::WebEventSource;

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::events::EventSource;
    pub use crate::hold::{HoldOutcome, Holder, Release};
    pub use crate::navigation::*;
    pub use crate::table::Handler;
    pub use crate::{build_url, url, Router, RouterConfig, RouterError, WeakRouter};
    pub use hashroute_history::{History, MemoryHistory};

    #[cfg(feature = "web")]
    pub use crate::WebEventSource;
    #[cfg(feature = "web")]
    pub use hashroute_history::WebHashHistory;
}

#[doc(hidden)]
pub mod exports {
    pub use hashroute_history;
    pub use urlencoding;
}
