//! Wires a [`DragController`] into a [`PointerSource`]
//!
//! Start listeners go on every candidate element; move and end listeners go
//! on the document, once. Each wired element carries a marker per start
//! kind, so re-scanning never adds a second listener and the binder keeps no
//! references to elements.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::DragConfig;
use crate::controller::{DragController, DragOutcome, IgnoreReason};
use crate::error::BindError;
use crate::host::{
    DragElement, ElementHandler, EventResponse, GlobalHandler, PointerSource, ReadyState,
};
use crate::pointer::{PointerEvent, PointerEventKind};

type Observer<E> = Rc<dyn Fn(&DragOutcome<E>)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Document was ready; `wired` candidates were set up
    Initialized { wired: usize },
    /// Document still loading; setup runs on content loaded
    Deferred,
}

/// Element marker recording that the start listener for `kind` is attached
pub fn start_marker(kind: PointerEventKind) -> String {
    format!("data-draggable-{}", kind.as_str())
}

/// State the event handlers hold on to
struct DragCore<E: DragElement> {
    controller: RefCell<DragController<E>>,
    observer: RefCell<Option<Observer<E>>>,
}

impl<E: DragElement> DragCore<E> {
    fn apply(
        &self,
        step: impl FnOnce(&mut DragController<E>) -> DragOutcome<E>,
    ) -> DragOutcome<E> {
        let outcome = step(&mut self.controller.borrow_mut());
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&outcome);
        }
        outcome
    }
}

struct Binder<S: PointerSource> {
    source: S,
    core: Rc<DragCore<S::Element>>,
    globals: RefCell<Vec<PointerEventKind>>,
}

pub struct Draggable<S: PointerSource> {
    inner: Rc<Binder<S>>,
}

impl<S: PointerSource> Clone for Draggable<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: PointerSource> Draggable<S> {
    pub fn new(source: S, config: DragConfig) -> Result<Self, BindError> {
        config.validate()?;
        let core = DragCore {
            controller: RefCell::new(DragController::new(config)),
            observer: RefCell::new(None),
        };
        Ok(Self {
            inner: Rc::new(Binder {
                source,
                core: Rc::new(core),
                globals: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Called with every outcome the listeners produce, moves included
    pub fn set_observer(&self, observer: impl Fn(&DragOutcome<S::Element>) + 'static) {
        *self.inner.core.observer.borrow_mut() = Some(Rc::new(observer));
    }

    /// Initialize now if the document is ready, otherwise once content has loaded.
    /// Errors raised by a deferred initialization go to `on_deferred_error`.
    pub fn install(
        &self,
        on_deferred_error: impl FnOnce(BindError) + 'static,
    ) -> Result<Readiness, BindError> {
        if self.inner.source.ready_state() == ReadyState::Loading {
            let draggable = self.clone();
            self.inner.source.on_content_loaded(Box::new(move || {
                if let Err(error) = draggable.initialize() {
                    on_deferred_error(error);
                }
            }))?;
            return Ok(Readiness::Deferred);
        }
        let wired = self.initialize()?;
        Ok(Readiness::Initialized { wired })
    }

    /// Register the document listeners (first call only) and scan for candidates
    pub fn initialize(&self) -> Result<usize, BindError> {
        self.register_globals()?;
        self.rescan()
    }

    /// Prepare every current candidate and attach start listeners to the
    /// ones that lack them. Returns how many elements were newly wired.
    pub fn rescan(&self) -> Result<usize, BindError> {
        let selector = self.inner.core.controller.borrow().config().candidate_selector.clone();
        let candidates = self.inner.source.query_candidates(&selector)?;

        let mut newly_wired = 0;
        for element in candidates {
            self.inner.core.controller.borrow().prepare(&element);

            let mut wired = false;
            for kind in PointerEventKind::START {
                let marker = start_marker(kind);
                if element.has_marker(&marker) {
                    continue;
                }
                self.inner
                    .source
                    .subscribe_element(&element, kind, self.start_handler())?;
                element.set_marker(&marker);
                wired = true;
            }
            if wired {
                newly_wired += 1;
            }
        }
        Ok(newly_wired)
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn controller(&self) -> Ref<'_, DragController<S::Element>> {
        self.inner.core.controller.borrow()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller().is_dragging()
    }

    pub fn current_element(&self) -> Option<S::Element> {
        self.controller().current_element().cloned()
    }

    fn register_globals(&self) -> Result<(), BindError> {
        for kind in PointerEventKind::MOVE {
            self.register_global(kind, self.move_handler())?;
        }
        for kind in PointerEventKind::END {
            self.register_global(kind, self.end_handler())?;
        }
        Ok(())
    }

    fn register_global(
        &self,
        kind: PointerEventKind,
        handler: GlobalHandler,
    ) -> Result<(), BindError> {
        if self.inner.globals.borrow().contains(&kind) {
            return Ok(());
        }
        self.inner.source.subscribe_global(kind, handler)?;
        self.inner.globals.borrow_mut().push(kind);
        Ok(())
    }

    fn start_handler(&self) -> ElementHandler<S::Element> {
        let core = self.inner.core.clone();
        Rc::new(move |element: &S::Element, event: &PointerEvent| {
            core.apply(|controller| controller.start(element, event));
            EventResponse::PREVENT_DEFAULT
        })
    }

    /// Blocks scrolling for the whole gesture, even for moves without coordinates
    fn move_handler(&self) -> GlobalHandler {
        let core = self.inner.core.clone();
        Rc::new(move |event: &PointerEvent| {
            match core.apply(|controller| controller.drag(event)) {
                DragOutcome::Ignored(IgnoreReason::NotDragging) => EventResponse::PASS,
                _ => EventResponse::PREVENT_DEFAULT,
            }
        })
    }

    fn end_handler(&self) -> GlobalHandler {
        let core = self.inner.core.clone();
        Rc::new(move |event: &PointerEvent| {
            core.apply(|controller| controller.end(event));
            EventResponse::PASS
        })
    }
}
