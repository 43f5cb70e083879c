//! Hold navigation while a form has unsaved changes.
//!
//! Run with `cargo run --example unsaved_changes -p hashroute`.

use std::{cell::RefCell, rc::Rc};

use hashroute::prelude::*;

fn main() -> Result<(), RouterError> {
    let history = Rc::new(MemoryHistory::default());
    let router = Router::new(history.clone());

    router.on("notes/:id", |req: NavigationRequest| {
        println!("showing note {}", req.param("id").unwrap_or("?"));
    })?;
    router.on("notes/:id/edit", |req: NavigationRequest| {
        println!("editing note {}", req.param("id").unwrap_or("?"));
    })?;
    router.on("!save", |_: NavigationRequest| println!("saved"))?;

    router.start("notes/1")?;
    router.navigate(url!("notes/:id/edit", 1))?;

    // park the next navigation until the user confirms
    let pending = Rc::new(RefCell::new(None));
    let slot = pending.clone();
    router.hold(Some(Holder::new(move |release| {
        println!("unsaved changes, asking before leaving");
        *slot.borrow_mut() = Some(release);
        HoldOutcome::Wait
    })))?;

    println!("{:?}", router.navigate("notes/2")?);

    // actions are never held
    router.navigate("!save")?;

    let release = pending.borrow_mut().take();
    if let Some(release) = release {
        println!("user confirmed");
        release.release()?;
    }

    println!("history: {:?}", history.entries());
    Ok(())
}
