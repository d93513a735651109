//! Browser DOM implementation of the drag host traits

use draggable_shared::{
    DragElement, ElementHandler, GlobalHandler, HostError, Point, PointerEvent, PointerEventKind,
    PointerFamily, PointerSource, ReadyState, Rect, TouchPoint,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;

#[derive(Clone, Debug, PartialEq)]
pub struct DomElement(pub web_sys::HtmlElement);

impl DragElement for DomElement {
    fn bounding_client_rect(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn set_native_draggable(&self, draggable: bool) {
        self.0.set_draggable(draggable);
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0.style().set_property(property, value).ok();
    }

    fn add_class(&self, class: &str) {
        self.0.class_list().add_1(class).ok();
    }

    fn remove_class(&self, class: &str) {
        self.0.class_list().remove_1(class).ok();
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_marker(&self, name: &str) {
        self.0.set_attribute(name, "").ok();
    }

    fn has_marker(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }
}

/// Listeners registered on `document`; they stay for the page lifetime
pub struct DomPointerSource {
    document: web_sys::Document,
}

impl DomPointerSource {
    pub fn from_window() -> Result<Self, HostError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(HostError::NoDocument)?;
        Ok(Self { document })
    }

    fn listen(
        &self,
        target: &web_sys::EventTarget,
        kind: PointerEventKind,
        mut listener: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), HostError> {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| listener(event))
            as Box<dyn FnMut(web_sys::Event)>);

        let options = web_sys::AddEventListenerOptions::new();
        // Touch listeners default to passive, which would ignore preventDefault
        if kind.needs_active_listener() {
            options.set_passive(false);
        }

        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.as_str(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|error| HostError::Listener {
                event: kind.as_str().to_string(),
                reason: format!("{error:?}"),
            })?;

        closure.forget();
        Ok(())
    }
}

impl PointerSource for DomPointerSource {
    type Element = DomElement;

    fn ready_state(&self) -> ReadyState {
        ReadyState::parse(&self.document.ready_state()).unwrap_or(ReadyState::Complete)
    }

    fn on_content_loaded(&self, callback: Box<dyn FnOnce()>) -> Result<(), HostError> {
        let callback = Closure::once_into_js(move || callback());
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);

        self.document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                callback.unchecked_ref(),
                &options,
            )
            .map_err(|error| HostError::Listener {
                event: "DOMContentLoaded".to_string(),
                reason: format!("{error:?}"),
            })
    }

    fn query_candidates(&self, selector: &str) -> Result<Vec<DomElement>, HostError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|error| HostError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!("{error:?}"),
            })?;

        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            .map(DomElement)
            .collect())
    }

    fn subscribe_element(
        &self,
        element: &DomElement,
        kind: PointerEventKind,
        handler: ElementHandler<DomElement>,
    ) -> Result<(), HostError> {
        let bound = element.clone();
        self.listen(&element.0, kind, move |event| {
            if let Some(pointer) = pointer_event(&event) {
                if handler(&bound, &pointer).prevent_default {
                    event.prevent_default();
                }
            }
        })
    }

    fn subscribe_global(
        &self,
        kind: PointerEventKind,
        handler: GlobalHandler,
    ) -> Result<(), HostError> {
        self.listen(&self.document, kind, move |event| {
            if let Some(pointer) = pointer_event(&event) {
                if handler(&pointer).prevent_default {
                    event.prevent_default();
                }
            }
        })
    }
}

/// Snapshot a native mouse or touch event
fn pointer_event(event: &web_sys::Event) -> Option<PointerEvent> {
    let kind = PointerEventKind::from_event_type(&event.type_())?;

    // Desktop browsers without touch support have no TouchEvent global to test against
    match kind.family() {
        PointerFamily::Touch => {
            let touch_event = event.dyn_ref::<web_sys::TouchEvent>()?;
            Some(PointerEvent::touch(
                kind,
                touch_points(&touch_event.touches()),
                touch_points(&touch_event.changed_touches()),
            ))
        }
        PointerFamily::Mouse => {
            let mouse_event = event.dyn_ref::<web_sys::MouseEvent>()?;
            Some(PointerEvent {
                kind,
                client: client_point(mouse_event),
                touches: Vec::new(),
                changed_touches: Vec::new(),
            })
        }
    }
}

fn touch_points(list: &web_sys::TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|touch| client_point(&touch))
        .map(|point| TouchPoint::new(point.x, point.y))
        .collect()
}

/// `clientX`/`clientY` as the browser reports them; the typed getters truncate to `i32`
fn client_point(source: &JsValue) -> Option<Point> {
    let read = |key: &str| {
        js_sys::Reflect::get(source, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_f64())
    };
    Some(Point::new(read("clientX")?, read("clientY")?))
}
