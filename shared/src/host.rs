//! Host capabilities the drag binder subscribes to
//!
//! A browser binding implements these over the DOM; tests implement them over
//! an in-memory document (see [`crate::testing`]).

use std::fmt;
use std::rc::Rc;

use crate::error::HostError;
use crate::pointer::{Point, PointerEvent, PointerEventKind};

/// Bounding client rect of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse `document.readyState`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "loading" => Some(Self::Loading),
            "interactive" => Some(Self::Interactive),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

/// What the host should do with the native event after a handler ran
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
}

impl EventResponse {
    pub const PASS: EventResponse = EventResponse {
        prevent_default: false,
    };
    pub const PREVENT_DEFAULT: EventResponse = EventResponse {
        prevent_default: true,
    };
}

/// An on-screen element the controller can read and restyle
pub trait DragElement: Clone + PartialEq + fmt::Debug + 'static {
    fn bounding_client_rect(&self) -> Rect;
    fn set_native_draggable(&self, draggable: bool);
    fn set_style(&self, property: &str, value: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Attach a boolean marker (a `data-` attribute in the DOM) that outlives rescans
    fn set_marker(&self, name: &str);
    fn has_marker(&self, name: &str) -> bool;
}

/// Listener bound to one element; receives that element (the DOM `currentTarget`)
pub type ElementHandler<E> = Rc<dyn Fn(&E, &PointerEvent) -> EventResponse>;

/// Listener bound to the whole document
pub type GlobalHandler = Rc<dyn Fn(&PointerEvent) -> EventResponse>;

/// Subscription interface over a host event system
pub trait PointerSource: 'static {
    type Element: DragElement;

    fn ready_state(&self) -> ReadyState;

    /// Run `callback` once the document has finished parsing
    fn on_content_loaded(&self, callback: Box<dyn FnOnce()>) -> Result<(), HostError>;

    /// Elements currently matching `selector`, in document order
    fn query_candidates(&self, selector: &str) -> Result<Vec<Self::Element>, HostError>;

    fn subscribe_element(
        &self,
        element: &Self::Element,
        kind: PointerEventKind,
        handler: ElementHandler<Self::Element>,
    ) -> Result<(), HostError>;

    fn subscribe_global(
        &self,
        kind: PointerEventKind,
        handler: GlobalHandler,
    ) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_parse() {
        assert_eq!(ReadyState::parse("loading"), Some(ReadyState::Loading));
        assert_eq!(ReadyState::parse("interactive"), Some(ReadyState::Interactive));
        assert_eq!(ReadyState::parse("complete"), Some(ReadyState::Complete));
        assert_eq!(ReadyState::parse("uninitialized"), None);
    }

    #[test]
    fn test_rect_top_left() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.top_left(), Point::new(10.0, 20.0));
    }
}
