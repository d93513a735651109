//! Host-agnostic core of the draggable utility
//!
//! Data flows: host pointer events → [`Draggable`] listeners →
//! [`DragController`] → element style and class updates.

pub mod binder;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod pointer;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use binder::{Draggable, Readiness};
pub use config::DragConfig;
pub use controller::{DragController, DragOutcome, DragState, IgnoreReason, px};
pub use error::{BindError, ConfigError, HostError};
pub use host::{
    DragElement, ElementHandler, EventResponse, GlobalHandler, PointerSource, ReadyState, Rect,
};
pub use pointer::{
    Point, PointerEvent, PointerEventKind, PointerFamily, PointerPhase, TouchPoint,
    extract_coordinates,
};
