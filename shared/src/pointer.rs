//! Pointer event model shared by mouse and touch input
//!
//! Hosts translate their native events into [`PointerEvent`] so the drag
//! controller never has to know which input family produced them.

use std::fmt;
use std::ops::{Add, Sub};

/// Viewport (client) coordinates in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    fn point(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerFamily {
    Mouse,
    Touch,
}

/// Where an event sits inside a drag gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl PointerEventKind {
    /// Kinds that begin a gesture, listened for on each candidate element
    pub const START: [PointerEventKind; 2] = [Self::MouseDown, Self::TouchStart];

    /// Document-level kinds that reposition the active element
    pub const MOVE: [PointerEventKind; 2] = [Self::MouseMove, Self::TouchMove];

    /// Document-level kinds that finish a gesture
    pub const END: [PointerEventKind; 3] = [Self::MouseUp, Self::TouchEnd, Self::TouchCancel];

    /// Kinds listened for once on the whole document
    pub const GLOBAL: [PointerEventKind; 5] = [
        Self::MouseMove,
        Self::MouseUp,
        Self::TouchMove,
        Self::TouchEnd,
        Self::TouchCancel,
    ];

    /// DOM event type string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
        }
    }

    pub fn from_event_type(event_type: &str) -> Option<Self> {
        let kind = match event_type {
            "mousedown" => Self::MouseDown,
            "mousemove" => Self::MouseMove,
            "mouseup" => Self::MouseUp,
            "touchstart" => Self::TouchStart,
            "touchmove" => Self::TouchMove,
            "touchend" => Self::TouchEnd,
            "touchcancel" => Self::TouchCancel,
            _ => return None,
        };
        Some(kind)
    }

    pub fn family(&self) -> PointerFamily {
        match self {
            Self::MouseDown | Self::MouseMove | Self::MouseUp => PointerFamily::Mouse,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel => {
                PointerFamily::Touch
            }
        }
    }

    /// Touch-cancel ends a gesture exactly like touch-end.
    pub fn phase(&self) -> PointerPhase {
        match self {
            Self::MouseDown | Self::TouchStart => PointerPhase::Start,
            Self::MouseMove | Self::TouchMove => PointerPhase::Move,
            Self::MouseUp | Self::TouchEnd | Self::TouchCancel => PointerPhase::End,
        }
    }

    /// Touch listeners that call `preventDefault` must be registered as non-passive
    pub fn needs_active_listener(&self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchMove)
    }
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-independent snapshot of a mouse or touch event
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Direct client coordinates, filled for mouse events
    pub client: Option<Point>,
    /// Touches currently on the surface
    pub touches: Vec<TouchPoint>,
    /// Touches that changed in this event
    pub changed_touches: Vec<TouchPoint>,
}

impl PointerEvent {
    pub fn mouse(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            client: Some(Point::new(x, y)),
            touches: Vec::new(),
            changed_touches: Vec::new(),
        }
    }

    pub fn touch(
        kind: PointerEventKind,
        touches: Vec<TouchPoint>,
        changed_touches: Vec<TouchPoint>,
    ) -> Self {
        Self {
            kind,
            client: None,
            touches,
            changed_touches,
        }
    }

    pub fn family(&self) -> PointerFamily {
        self.kind.family()
    }

    pub fn coordinates(&self) -> Option<Point> {
        extract_coordinates(self)
    }
}

/// Normalize an event to a single client point.
///
/// Touch events use the first active touch and fall back to the first changed
/// touch, which is the only data a final `touchend` carries. A zero coordinate
/// is a real coordinate and never triggers the fallback.
pub fn extract_coordinates(event: &PointerEvent) -> Option<Point> {
    match event.family() {
        PointerFamily::Touch => event
            .touches
            .first()
            .or_else(|| event.changed_touches.first())
            .map(TouchPoint::point),
        PointerFamily::Mouse => event.client,
    }
}
