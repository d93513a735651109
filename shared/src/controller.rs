//! Single-target drag controller
//!
//! Two states: idle and dragging. Start moves idle→dragging (or hands the
//! gesture to a new element), move repositions the active element, end
//! returns to idle. Nothing here blocks or defers work.

use crate::config::DragConfig;
use crate::host::DragElement;
use crate::pointer::{Point, PointerEvent, PointerPhase};

#[derive(Clone, Debug, PartialEq)]
pub enum DragState<E> {
    Idle,
    Dragging {
        element: E,
        /// Pointer position at drag start
        start: Point,
        /// Element top-left at drag start
        initial: Point,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    NotDragging,
    MissingCoordinates,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome<E> {
    Started {
        element: E,
        origin: Point,
    },
    /// A start arrived while another element was active
    TookOver {
        element: E,
        previous: E,
        origin: Point,
    },
    Moved {
        position: Point,
    },
    Ended {
        element: E,
    },
    Ignored(IgnoreReason),
}

impl<E> DragOutcome<E> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

pub struct DragController<E: DragElement> {
    config: DragConfig,
    state: DragState<E>,
}

impl<E: DragElement> DragController<E> {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn state(&self) -> &DragState<E> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn current_element(&self) -> Option<&E> {
        match &self.state {
            DragState::Dragging { element, .. } => Some(element),
            DragState::Idle => None,
        }
    }

    /// Turn a candidate into a draggable element
    pub fn prepare(&self, element: &E) {
        element.set_native_draggable(false);
        element.set_style("user-select", "none");
        element.set_style("-webkit-user-select", "none");
        element.set_style("position", "absolute");
    }

    pub fn handle(&mut self, element: &E, event: &PointerEvent) -> DragOutcome<E> {
        match event.kind.phase() {
            PointerPhase::Start => self.start(element, event),
            PointerPhase::Move => self.drag(event),
            PointerPhase::End => self.end(event),
        }
    }

    pub fn start(&mut self, element: &E, event: &PointerEvent) -> DragOutcome<E> {
        let Some(start) = event.coordinates() else {
            return DragOutcome::Ignored(IgnoreReason::MissingCoordinates);
        };

        let previous = match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging {
                element: previous, ..
            } => {
                previous.remove_class(&self.config.active_class);
                Some(previous)
            }
            DragState::Idle => None,
        };

        let initial = element.bounding_client_rect().top_left();
        self.state = DragState::Dragging {
            element: element.clone(),
            start,
            initial,
        };
        element.add_class(&self.config.active_class);

        match previous {
            Some(previous) => DragOutcome::TookOver {
                element: element.clone(),
                previous,
                origin: initial,
            },
            None => DragOutcome::Started {
                element: element.clone(),
                origin: initial,
            },
        }
    }

    pub fn drag(&mut self, event: &PointerEvent) -> DragOutcome<E> {
        let DragState::Dragging {
            element,
            start,
            initial,
        } = &self.state
        else {
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        };
        let Some(current) = event.coordinates() else {
            return DragOutcome::Ignored(IgnoreReason::MissingCoordinates);
        };

        let position = *initial + (current - *start);
        element.set_style("left", &px(position.x));
        element.set_style("top", &px(position.y));
        DragOutcome::Moved { position }
    }

    /// End events carry no required data, so only the idle check applies.
    pub fn end(&mut self, _event: &PointerEvent) -> DragOutcome<E> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { element, .. } => {
                element.remove_class(&self.config.active_class);
                DragOutcome::Ended { element }
            }
            DragState::Idle => DragOutcome::Ignored(IgnoreReason::NotDragging),
        }
    }
}

/// CSS pixel length; integral values print without a fraction (`40px`)
pub fn px(value: f64) -> String {
    format!("{value}px")
}
