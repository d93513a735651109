//! Browser entry point: makes every `.draggable` element movable by mouse or touch
//!
//! The module installs itself on load. Pages that insert candidates later call
//! `window.reinitializeDraggable()`. Optional settings are read from
//! `window.draggableConfig` when the module starts.

use std::cell::RefCell;

use draggable_shared::{BindError, DragConfig, DragOutcome, Draggable, IgnoreReason, Readiness};
use wasm_bindgen::prelude::*;

mod dom;

pub use dom::{DomElement, DomPointerSource};

thread_local! {
    static DRAGGABLE: RefCell<Option<Draggable<DomPointerSource>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    let config = page_config();
    match install(config) {
        Ok(Readiness::Initialized { wired }) => {
            zoon::println!("[draggable] Ready, {wired} candidate(s) wired");
        }
        Ok(Readiness::Deferred) => {
            zoon::println!("[draggable] Waiting for DOMContentLoaded");
        }
        Err(error) => {
            zoon::eprintln!("[draggable] Failed to install: {error}");
            return;
        }
    }
    expose_reinitialize();
}

/// Wire candidates added since the last scan; returns how many were new
#[wasm_bindgen(js_name = reinitializeDraggable)]
pub fn reinitialize_draggable() -> Result<u32, JsValue> {
    let result = DRAGGABLE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|draggable| draggable.rescan())
    });
    match result {
        Some(Ok(wired)) => Ok(wired as u32),
        Some(Err(error)) => {
            zoon::eprintln!("[draggable] Re-scan failed: {error}");
            Err(JsValue::from_str(&error.to_string()))
        }
        None => Err(JsValue::from_str("draggable is not installed")),
    }
}

#[wasm_bindgen(js_name = isDragging)]
pub fn is_dragging() -> bool {
    DRAGGABLE.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|draggable| draggable.is_dragging())
    })
}

fn install(config: DragConfig) -> Result<Readiness, BindError> {
    let source = DomPointerSource::from_window()?;
    let draggable = Draggable::new(source, config)?;
    if draggable.controller().config().log_transitions {
        draggable.set_observer(log_outcome);
    }

    let readiness = draggable.install(|error| {
        zoon::eprintln!("[draggable] Deferred initialization failed: {error}");
    })?;
    DRAGGABLE.with(|cell| *cell.borrow_mut() = Some(draggable));
    Ok(readiness)
}

/// `window.draggableConfig`, or defaults when absent or unreadable
fn page_config() -> DragConfig {
    let Some(window) = web_sys::window() else {
        return DragConfig::default();
    };
    let value = js_sys::Reflect::get(&window, &"draggableConfig".into())
        .unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        return DragConfig::default();
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(config) => config,
        Err(error) => {
            zoon::eprintln!("[draggable] Ignoring window.draggableConfig: {error}");
            DragConfig::default()
        }
    }
}

fn expose_reinitialize() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let reinitialize_closure = Closure::wrap(Box::new(|| match reinitialize_draggable() {
        Ok(wired) => JsValue::from(wired),
        Err(error) => error,
    }) as Box<dyn Fn() -> JsValue>);
    js_sys::Reflect::set(
        &window,
        &"reinitializeDraggable".into(),
        reinitialize_closure.as_ref().unchecked_ref(),
    )
    .ok();
    reinitialize_closure.forget();
}

fn log_outcome(outcome: &DragOutcome<DomElement>) {
    match outcome {
        DragOutcome::Started { origin, .. } => {
            zoon::println!("[draggable] Drag started at ({}, {})", origin.x, origin.y);
        }
        DragOutcome::TookOver { origin, .. } => {
            zoon::println!(
                "[draggable] Drag handed to a new element at ({}, {})",
                origin.x,
                origin.y
            );
        }
        DragOutcome::Ended { .. } => {
            zoon::println!("[draggable] Drag ended");
        }
        DragOutcome::Ignored(IgnoreReason::MissingCoordinates) => {
            zoon::println!("[draggable] Pointer event without coordinates ignored");
        }
        DragOutcome::Moved { .. } | DragOutcome::Ignored(IgnoreReason::NotDragging) => {}
    }
}
