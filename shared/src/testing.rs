//! In-memory host for exercising the drag binder without a browser
//!
//! `SyntheticSource` keeps a flat document of [`SyntheticElement`]s, records
//! every listener it is given, and delivers synthetic events in DOM order:
//! listeners on the target element first, then document listeners.
//! Writing `left`/`top` styles moves the element's rect, matching how an
//! absolutely positioned element without margins lays out.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::error::HostError;
use crate::host::{
    DragElement, ElementHandler, EventResponse, GlobalHandler, PointerSource, ReadyState, Rect,
};
use crate::pointer::{PointerEvent, PointerEventKind, TouchPoint};

#[derive(Debug)]
struct ElementData {
    name: String,
    rect: Rect,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    markers: BTreeSet<String>,
    native_draggable: Option<bool>,
}

#[derive(Clone)]
pub struct SyntheticElement(Rc<RefCell<ElementData>>);

impl SyntheticElement {
    pub fn new(name: &str, rect: Rect) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            name: name.to_string(),
            rect,
            classes: Vec::new(),
            styles: BTreeMap::new(),
            markers: BTreeSet::new(),
            native_draggable: None,
        })))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn rect(&self) -> Rect {
        self.0.borrow().rect
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn native_draggable(&self) -> Option<bool> {
        self.0.borrow().native_draggable
    }

    /// Live handles to this element, including the caller's
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    fn matches(&self, selector: &str) -> bool {
        selector
            .strip_prefix('.')
            .is_some_and(|class| self.has_class(class))
    }
}

impl PartialEq for SyntheticElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SyntheticElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyntheticElement({})", self.0.borrow().name)
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.parse().ok()
}

impl DragElement for SyntheticElement {
    fn bounding_client_rect(&self) -> Rect {
        self.rect()
    }

    fn set_native_draggable(&self, draggable: bool) {
        self.0.borrow_mut().native_draggable = Some(draggable);
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match property {
            "left" => {
                if let Some(left) = parse_px(value) {
                    data.rect.left = left;
                }
            }
            "top" => {
                if let Some(top) = parse_px(value) {
                    data.rect.top = top;
                }
            }
            _ => {}
        }
        data.styles.insert(property.to_string(), value.to_string());
    }

    fn add_class(&self, class: &str) {
        let mut data = self.0.borrow_mut();
        if !data.classes.iter().any(|existing| existing == class) {
            data.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|existing| existing != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|existing| existing == class)
    }

    fn set_marker(&self, name: &str) {
        self.0.borrow_mut().markers.insert(name.to_string());
    }

    fn has_marker(&self, name: &str) -> bool {
        self.0.borrow().markers.contains(name)
    }
}

/// Result of delivering one synthetic event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of listeners that ran
    pub listeners: usize,
    pub default_prevented: bool,
}

type ElementListener = (
    SyntheticElement,
    PointerEventKind,
    ElementHandler<SyntheticElement>,
);

#[derive(Default)]
struct SourceInner {
    elements: RefCell<Vec<SyntheticElement>>,
    element_listeners: RefCell<Vec<ElementListener>>,
    global_listeners: RefCell<Vec<(PointerEventKind, GlobalHandler)>>,
    ready_state: Cell<Option<ReadyState>>,
    content_loaded: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// Shared handle; clones observe and drive the same document
#[derive(Clone, Default)]
pub struct SyntheticSource(Rc<SourceInner>);

impl SyntheticSource {
    /// Document that has already finished loading
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        let source = Self::default();
        source.0.ready_state.set(Some(ReadyState::Loading));
        source
    }

    pub fn append(&self, element: SyntheticElement) -> SyntheticElement {
        self.0.elements.borrow_mut().push(element.clone());
        element
    }

    /// Detach `element` from the document, dropping the listeners bound to it
    pub fn remove(&self, element: &SyntheticElement) {
        self.0.elements.borrow_mut().retain(|existing| existing != element);
        self.0
            .element_listeners
            .borrow_mut()
            .retain(|(target, _, _)| target != element);
    }

    /// Move to `interactive` and run the pending content-loaded callbacks
    pub fn finish_loading(&self) {
        self.0.ready_state.set(Some(ReadyState::Interactive));
        let callbacks = std::mem::take(&mut *self.0.content_loaded.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }

    pub fn global_listener_count(&self, kind: PointerEventKind) -> usize {
        self.0
            .global_listeners
            .borrow()
            .iter()
            .filter(|(listener_kind, _)| *listener_kind == kind)
            .count()
    }

    pub fn element_listener_count(
        &self,
        element: &SyntheticElement,
        kind: PointerEventKind,
    ) -> usize {
        self.0
            .element_listeners
            .borrow()
            .iter()
            .filter(|(target, listener_kind, _)| target == element && *listener_kind == kind)
            .count()
    }

    /// Deliver `event` to `target`'s listeners and then to document listeners.
    /// `None` targets the document itself.
    pub fn dispatch(&self, target: Option<&SyntheticElement>, event: &PointerEvent) -> Dispatch {
        // Snapshot the listeners so handlers never run under a borrow
        let element_handlers: Vec<_> = match target {
            Some(target) => self
                .0
                .element_listeners
                .borrow()
                .iter()
                .filter(|(element, kind, _)| element == target && *kind == event.kind)
                .map(|(element, _, handler)| (element.clone(), handler.clone()))
                .collect(),
            None => Vec::new(),
        };
        let global_handlers: Vec<_> = self
            .0
            .global_listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event.kind)
            .map(|(_, handler)| handler.clone())
            .collect();

        let mut dispatch = Dispatch::default();
        let mut record = |response: EventResponse| {
            dispatch.listeners += 1;
            dispatch.default_prevented |= response.prevent_default;
        };
        for (element, handler) in element_handlers {
            record(handler(&element, event));
        }
        for handler in global_handlers {
            record(handler(event));
        }
        dispatch
    }

    pub fn mouse_down(&self, target: &SyntheticElement, x: f64, y: f64) -> Dispatch {
        self.dispatch(Some(target), &PointerEvent::mouse(PointerEventKind::MouseDown, x, y))
    }

    pub fn mouse_move(&self, x: f64, y: f64) -> Dispatch {
        self.dispatch(None, &PointerEvent::mouse(PointerEventKind::MouseMove, x, y))
    }

    pub fn mouse_up(&self, x: f64, y: f64) -> Dispatch {
        self.dispatch(None, &PointerEvent::mouse(PointerEventKind::MouseUp, x, y))
    }

    pub fn touch_start(&self, target: &SyntheticElement, x: f64, y: f64) -> Dispatch {
        let point = TouchPoint::new(x, y);
        self.dispatch(
            Some(target),
            &PointerEvent::touch(PointerEventKind::TouchStart, vec![point], vec![point]),
        )
    }

    pub fn touch_move(&self, x: f64, y: f64) -> Dispatch {
        let point = TouchPoint::new(x, y);
        self.dispatch(
            None,
            &PointerEvent::touch(PointerEventKind::TouchMove, vec![point], vec![point]),
        )
    }

    /// Final touch lifted; only `changedTouches` carries the point
    pub fn touch_end(&self, x: f64, y: f64) -> Dispatch {
        self.dispatch(
            None,
            &PointerEvent::touch(
                PointerEventKind::TouchEnd,
                Vec::new(),
                vec![TouchPoint::new(x, y)],
            ),
        )
    }

    pub fn touch_cancel(&self) -> Dispatch {
        self.dispatch(
            None,
            &PointerEvent::touch(PointerEventKind::TouchCancel, Vec::new(), Vec::new()),
        )
    }
}

impl PointerSource for SyntheticSource {
    type Element = SyntheticElement;

    fn ready_state(&self) -> ReadyState {
        self.0.ready_state.get().unwrap_or(ReadyState::Complete)
    }

    fn on_content_loaded(&self, callback: Box<dyn FnOnce()>) -> Result<(), HostError> {
        self.0.content_loaded.borrow_mut().push(callback);
        Ok(())
    }

    fn query_candidates(&self, selector: &str) -> Result<Vec<SyntheticElement>, HostError> {
        if !selector.starts_with('.') || selector.len() < 2 {
            return Err(HostError::InvalidSelector {
                selector: selector.to_string(),
                reason: "synthetic documents only match `.class` selectors".to_string(),
            });
        }
        Ok(self
            .0
            .elements
            .borrow()
            .iter()
            .filter(|element| element.matches(selector))
            .cloned()
            .collect())
    }

    fn subscribe_element(
        &self,
        element: &SyntheticElement,
        kind: PointerEventKind,
        handler: ElementHandler<SyntheticElement>,
    ) -> Result<(), HostError> {
        self.0
            .element_listeners
            .borrow_mut()
            .push((element.clone(), kind, handler));
        Ok(())
    }

    fn subscribe_global(
        &self,
        kind: PointerEventKind,
        handler: GlobalHandler,
    ) -> Result<(), HostError> {
        self.0.global_listeners.borrow_mut().push((kind, handler));
        Ok(())
    }
}
