//! The navigation hold gate.
//!
//! A holder intercepts non-action navigations, for example to ask whether unsaved changes may be
//! dropped. It receives a [`Release`] and either answers [`HoldOutcome::Release`] right away, or
//! answers [`HoldOutcome::Wait`] and fires the release later:
//!
//! ```rust
//! # use hashroute::prelude::*;
//! # use std::{cell::RefCell, rc::Rc};
//! let router = Router::new(Rc::new(MemoryHistory::default()));
//! router.on("inbox", |_: NavigationRequest| {}).unwrap();
//!
//! let parked = Rc::new(RefCell::new(None));
//! let slot = parked.clone();
//! router
//!     .hold(Some(Holder::new(move |release| {
//!         *slot.borrow_mut() = Some(release);
//!         HoldOutcome::Wait
//!     })))
//!     .unwrap();
//!
//! assert_eq!(router.navigate("inbox").unwrap(), NavigationStatus::Deferred);
//!
//! let release = parked.borrow_mut().take().unwrap();
//! release.release().unwrap();
//! assert!(!router.is_held());
//! ```

use std::{cell::Cell, rc::Rc};

use crate::{navigation::NavigationTarget, RouterError, WeakRouter};

/// What a holder decided when consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Let the navigation through now.
    Release,
    /// Keep the navigation parked until the [`Release`] fires.
    Wait,
}

/// A navigation holder.
#[derive(Clone)]
pub struct Holder(Rc<dyn Fn(Release) -> HoldOutcome>);

impl Holder {
    /// Wrap a holder callback.
    pub fn new(callback: impl Fn(Release) -> HoldOutcome + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub(crate) fn consult(&self, release: Release) -> HoldOutcome {
        (self.0)(release)
    }
}

impl<F: Fn(Release) -> HoldOutcome + 'static> From<F> for Holder {
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

impl std::fmt::Debug for Holder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Holder")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A single-use handle that resumes a parked navigation.
///
/// Clones share one shot: whichever fires first resumes the navigation, every later call is a
/// no-op returning `Ok(())`.
#[derive(Clone)]
pub struct Release(Rc<ReleaseState>);

struct ReleaseState {
    router: WeakRouter,
    generation: u64,
    fired: Cell<bool>,
}

impl Release {
    pub(crate) fn new(router: WeakRouter, generation: u64) -> Self {
        Self(Rc::new(ReleaseState {
            router,
            generation,
            fired: Cell::new(false),
        }))
    }

    /// Clear the holder and run the parked navigation.
    ///
    /// Returns the result of the resumed navigation. Does nothing if this release (or a clone of
    /// it) already fired, or if the router is gone.
    pub fn release(&self) -> Result<(), RouterError> {
        if self.0.fired.replace(true) {
            return Ok(());
        }

        match self.0.router.upgrade() {
            Some(router) => router.resume_parked(self.0.generation),
            None => Ok(()),
        }
    }

    /// Whether this release already fired.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.0.fired.get()
    }
}

impl std::fmt::Debug for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Release")
            .field("generation", &self.0.generation)
            .field("fired", &self.0.fired.get())
            .finish()
    }
}

/// A navigation waiting on a holder.
#[derive(Debug)]
pub(crate) struct Parked {
    pub(crate) generation: u64,
    pub(crate) target: NavigationTarget,
}

/// The gate between a navigation request and its dispatch.
#[derive(Debug, Default)]
pub(crate) enum HoldGate {
    #[default]
    Idle,
    Pending {
        holder: Option<Holder>,
        parked: Parked,
    },
}

/// The installed holder and the gate state.
#[derive(Debug, Default)]
pub(crate) struct HoldState {
    holder: Option<Holder>,
    gate: HoldGate,
    generation: u64,
}

/// What a navigation has to do after passing through the gate.
pub(crate) enum Admission {
    /// Dispatch right away.
    Proceed(NavigationTarget),
    /// Consult the holder; the navigation is parked under `generation`.
    Consult { holder: Holder, generation: u64 },
    /// A parked navigation was replaced by this one.
    Superseded,
}

impl HoldState {
    pub(crate) fn holder(&self) -> Option<&Holder> {
        match &self.gate {
            HoldGate::Idle => self.holder.as_ref(),
            HoldGate::Pending { holder, .. } => holder.as_ref(),
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        matches!(self.gate, HoldGate::Pending { .. })
    }

    pub(crate) fn install(&mut self, new: Option<Holder>) -> Result<(), RouterError> {
        if new.is_some() && self.holder().is_some() {
            return Err(RouterError::HolderAlreadyActive);
        }

        match &mut self.gate {
            HoldGate::Idle => self.holder = new,
            HoldGate::Pending { holder, .. } => *holder = new,
        }
        Ok(())
    }

    /// Run a non-action navigation through the gate.
    pub(crate) fn admit(&mut self, target: NavigationTarget) -> Admission {
        if let HoldGate::Pending { parked, .. } = &mut self.gate {
            parked.target = target;
            return Admission::Superseded;
        }

        let Some(holder) = self.holder.take() else {
            return Admission::Proceed(target);
        };

        self.generation += 1;
        let generation = self.generation;
        self.gate = HoldGate::Pending {
            holder: Some(holder.clone()),
            parked: Parked { generation, target },
        };

        Admission::Consult { holder, generation }
    }

    /// Take the navigation parked under `generation`, clearing its holder.
    pub(crate) fn release(&mut self, generation: u64) -> Option<NavigationTarget> {
        match &self.gate {
            HoldGate::Pending { parked, .. } if parked.generation == generation => {}
            _ => return None,
        }

        match std::mem::take(&mut self.gate) {
            HoldGate::Pending { parked, .. } => Some(parked.target),
            HoldGate::Idle => None,
        }
    }
}
