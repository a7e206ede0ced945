use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, error};

use super::canvas::Canvas;
use crate::utils::ChartError;

/// A one-shot `content loaded` listener
pub type Listener<'a> = Box<dyn FnOnce(&mut Document<'a>) -> Result<(), ChartError> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    WaitingForPageLoad,
    ContentLoaded,
}

/// The hosting page: its elements and its load lifecycle
pub struct Document<'a> {
    elements: HashMap<String, Canvas>,
    state: LifecycleState,
    listeners: Vec<Listener<'a>>,
}

impl<'a> Document<'a> {
    pub fn new() -> Self {
        Document {
            elements: HashMap::new(),
            state: LifecycleState::WaitingForPageLoad,
            listeners: Vec::new(),
        }
    }

    /// Add a canvas element, replacing any element with the same id
    pub fn add_canvas(&mut self, id: &str, width: u32, height: u32) -> &mut Canvas {
        let canvas = Canvas::new(id, width, height);
        match self.elements.entry(id.to_string()) {
            Entry::Occupied(mut slot) => {
                slot.insert(canvas);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(canvas),
        }
    }

    pub fn get_element_by_id(&mut self, id: &str) -> Option<&mut Canvas> {
        self.elements.get_mut(id)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Register a listener for the content-loaded signal.
    /// Returns false (and drops the listener) if the signal has already fired.
    pub fn on_content_loaded<F>(&mut self, listener: F) -> bool
    where
        F: FnOnce(&mut Document<'a>) -> Result<(), ChartError> + 'a,
    {
        if self.state == LifecycleState::ContentLoaded {
            debug!("content already loaded, listener ignored");
            return false;
        }
        self.listeners.push(Box::new(listener));
        true
    }

    /// Fire the content-loaded signal.
    ///
    /// Every registered listener runs once, in registration order. A failing
    /// listener does not stop the others; the first failure is returned.
    /// Returns `Ok(false)` if the signal had already fired.
    pub fn dispatch_content_loaded(&mut self) -> Result<bool, ChartError> {
        if self.state == LifecycleState::ContentLoaded {
            debug!("content-loaded already dispatched");
            return Ok(false);
        }
        self.state = LifecycleState::ContentLoaded;

        let listeners = std::mem::take(&mut self.listeners);
        debug!("Dispatching content-loaded to {} listener(s)", listeners.len());

        let mut first_error = None;
        for listener in listeners {
            if let Err(e) = listener(self) {
                error!("content-loaded listener failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(true),
        }
    }
}

impl Default for Document<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_listener_fires_once() {
        let calls = Cell::new(0);
        let mut doc = Document::new();
        doc.on_content_loaded(|_| {
            calls.set(calls.get() + 1);
            Ok(())
        });

        assert_eq!(doc.state(), LifecycleState::WaitingForPageLoad);
        assert!(doc.dispatch_content_loaded().unwrap());
        assert!(!doc.dispatch_content_loaded().unwrap());
        assert_eq!(doc.state(), LifecycleState::ContentLoaded);
        drop(doc);

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_late_listener_never_runs() {
        let ran = Cell::new(false);
        let mut doc = Document::new();
        doc.dispatch_content_loaded().unwrap();

        assert!(!doc.on_content_loaded(|_| {
            ran.set(true);
            Ok(())
        }));
        doc.dispatch_content_loaded().unwrap();
        drop(doc);

        assert!(!ran.get());
    }

    #[test]
    fn test_failure_does_not_stop_other_listeners() {
        let second_ran = Cell::new(false);
        let mut doc = Document::new();
        doc.on_content_loaded(|_| Err(ChartError::ElementNotFound("missing".to_string())));
        doc.on_content_loaded(|_| {
            second_ran.set(true);
            Ok(())
        });

        let result = doc.dispatch_content_loaded();
        assert!(matches!(result, Err(ChartError::ElementNotFound(ref id)) if id == "missing"));
        drop(doc);
        assert!(second_ran.get());
    }

    #[test]
    fn test_listener_can_reach_elements() {
        let mut doc = Document::new();
        doc.add_canvas("stockChart", 10, 10);
        doc.on_content_loaded(|d| {
            d.get_element_by_id("stockChart")
                .map(|_| ())
                .ok_or_else(|| ChartError::ElementNotFound("stockChart".to_string()))
        });
        assert!(doc.dispatch_content_loaded().unwrap());
    }
}
