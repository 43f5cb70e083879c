use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::{window, Window};

use crate::History;

/// A [`History`] that integrates with a browser through the [History API] and the fragment of
/// the [Location API].
///
/// Entries are pushed with a `null` state; the fragment is the only thing the router stores.
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
/// [Location API]: https://developer.mozilla.org/en-US/docs/Web/API/Location
pub struct WebHashHistory {
    history: web_sys::History,
    window: Window,
}

impl Default for WebHashHistory {
    fn default() -> Self {
        let window = window().expect("access to `window`");
        let history = window.history().expect("`window` has access to `history`");

        Self { history, window }
    }
}

impl WebHashHistory {
    /// Create a new [`WebHashHistory`] for the current window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl History for WebHashHistory {
    fn current_fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn go_back(&self) {
        if let Err(e) = self.history.back() {
            error!("failed to go back: {e:?}");
        }
    }

    fn go_forward(&self) {
        if let Err(e) = self.history.forward() {
            error!("failed to go forward: {e:?}");
        }
    }

    fn push(&self, fragment: String) {
        if let Err(e) = self
            .history
            .push_state_with_url(&JsValue::NULL, "", Some(&fragment))
        {
            error!("failed to push state for `{fragment}`: {e:?}");
        }
    }

    fn replace(&self, fragment: String) {
        if let Err(e) = self
            .history
            .replace_state_with_url(&JsValue::NULL, "", Some(&fragment))
        {
            error!("failed to replace state with `{fragment}`: {e:?}");
        }
    }
}
