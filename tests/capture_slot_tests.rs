// Host-side tests for the capture lifecycle slot.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod capture_slot {
    include!("../src/capture_slot.rs");
}

use capture_slot::CaptureSlot;
use std::cell::Cell;
use std::rc::Rc;

// Stands in for the camera handle; counts how often it was released.
struct Handle {
    released: Rc<Cell<u32>>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

fn handle(released: &Rc<Cell<u32>>) -> Handle {
    Handle {
        released: released.clone(),
    }
}

#[test]
fn starts_closed_and_empty() {
    let mut slot: CaptureSlot<Handle> = CaptureSlot::default();
    assert!(slot.is_closed());
    assert!(slot.close().is_none());
}

#[test]
fn resolved_attempt_is_kept_until_close() {
    let released = Rc::new(Cell::new(0));
    let mut slot = CaptureSlot::default();
    let attempt = slot.open();
    assert!(slot.fulfil(attempt, handle(&released)).is_none());
    assert!(!slot.is_closed());
    assert_eq!(released.get(), 0);

    let live = slot.close();
    assert!(live.is_some());
    drop(live);
    assert_eq!(released.get(), 1);
    assert!(slot.is_closed());
    assert!(slot.close().is_none());
}

#[test]
fn handle_arriving_after_close_is_released() {
    let released = Rc::new(Cell::new(0));
    let mut slot = CaptureSlot::default();
    let attempt = slot.open();
    // Page hidden while the permission prompt is still pending
    assert!(slot.close().is_none());

    let late = slot.fulfil(attempt, handle(&released));
    assert!(late.is_some());
    drop(late);
    assert_eq!(released.get(), 1);
    assert!(slot.close().is_none());
}

#[test]
fn stale_attempt_is_released_after_reopen() {
    let released = Rc::new(Cell::new(0));
    let mut slot = CaptureSlot::default();
    let first = slot.open();
    drop(slot.close());
    let second = slot.open();

    drop(slot.fulfil(first, handle(&released)));
    assert_eq!(released.get(), 1);

    assert!(slot.fulfil(second, handle(&released)).is_none());
    assert_eq!(released.get(), 1);
    let live = slot.close();
    assert!(live.is_some());
    drop(live);
    assert_eq!(released.get(), 2);
}

#[test]
fn replacing_a_live_handle_returns_the_old_one() {
    let released = Rc::new(Cell::new(0));
    let mut slot = CaptureSlot::default();
    let attempt = slot.open();
    assert!(slot.fulfil(attempt, handle(&released)).is_none());
    drop(slot.fulfil(attempt, handle(&released)));
    assert_eq!(released.get(), 1);
    assert!(slot.close().is_some());
}
