//! In-memory page elements.
//!
//! Handles are shared: cloning an element returns another handle to the same
//! state, so a caller can keep one and watch what the widget writes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::application::widget::{
    PageHost, QueryInput, RESULTS_CONTAINER_CLASS, ResultsContainer, SEARCH_INPUT_ID,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryInput {
    value: Rc<RefCell<String>>,
}

impl MemoryInput {
    /// Replace the value, as a user typing into the field would.
    pub fn type_text(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

impl QueryInput for MemoryInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    content: Rc<RefCell<String>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryContainer {
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    /// Number of times the content has been replaced.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ResultsContainer for MemoryContainer {
    fn replace_content(&self, markup: &str) {
        *self.content.borrow_mut() = markup.to_string();
        self.writes.set(self.writes.get() + 1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    inputs: HashMap<String, MemoryInput>,
    containers: Vec<(String, MemoryContainer)>,
}

impl MemoryPage {
    /// A page carrying the search input and one archive list.
    pub fn archive() -> Self {
        Self::default()
            .with_input(SEARCH_INPUT_ID)
            .with_container(RESULTS_CONTAINER_CLASS)
    }

    pub fn with_input(mut self, id: &str) -> Self {
        self.inputs.insert(id.to_string(), MemoryInput::default());
        self
    }

    /// Append a container; earlier containers with the same class win lookups.
    pub fn with_container(mut self, class: &str) -> Self {
        self.containers
            .push((class.to_string(), MemoryContainer::default()));
        self
    }
}

impl PageHost for MemoryPage {
    type Input = MemoryInput;
    type Container = MemoryContainer;

    fn input_by_id(&self, id: &str) -> Option<MemoryInput> {
        self.inputs.get(id).cloned()
    }

    fn first_by_class(&self, class: &str) -> Option<MemoryContainer> {
        self.containers
            .iter()
            .find(|(candidate, _)| candidate == class)
            .map(|(_, container)| container.clone())
    }
}
