//! Browser bindings for the archive search.
//!
//! The search page calls `mountArchiveSearch(resources, escaping)` with the
//! record list it embeds; `escaping` is `"verbatim"` (the default) or `"html"`.
//! Mounting waits for `DOMContentLoaded` when the document is still loading,
//! then wires the `#search` input to the first `.archive-list`.

use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use web_sys::{Document, Element, Event, HtmlInputElement, Window};

use crate::application::error::WidgetError;
use crate::application::widget::{PageHost, QueryInput, ResultsContainer, mount};
use crate::domain::resources::Resources;
use crate::infra::error::InfraError;
use crate::infra::resources::parse_resources;
use crate::presentation::template::{Escaping, ItemTemplate, UnknownEscaping};

#[derive(Debug, Error)]
pub enum WebError {
    #[error("window or document is unavailable")]
    DomUnavailable,
    #[error("no resource list was passed to mountArchiveSearch")]
    MissingResources,
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Escaping(#[from] UnknownEscaping),
    #[error("javascript error: {0}")]
    Js(String),
}

impl WebError {
    fn from_js(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[derive(Debug, Clone)]
pub struct DomInput(HtmlInputElement);

impl QueryInput for DomInput {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }
}

#[derive(Debug, Clone)]
pub struct DomContainer(Element);

impl ResultsContainer for DomContainer {
    fn replace_content(&self, markup: &str) {
        self.0.set_inner_html(markup);
    }
}

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageHost for DomPage {
    type Input = DomInput;
    type Container = DomContainer;

    fn input_by_id(&self, id: &str) -> Option<DomInput> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(DomInput)
    }

    fn first_by_class(&self, class: &str) -> Option<DomContainer> {
        self.document
            .get_elements_by_class_name(class)
            .item(0)
            .map(DomContainer)
    }
}

/// Decode the page's record list through its JSON form.
pub fn resources_from_js(value: &JsValue) -> Result<Resources, WebError> {
    if value.is_undefined() || value.is_null() {
        return Err(WebError::MissingResources);
    }
    let json = js_sys::JSON::stringify(value)
        .map_err(WebError::from_js)?
        .as_string();
    decode_resources(json)
}

fn decode_resources(json: Option<String>) -> Result<Resources, WebError> {
    let json = json.ok_or(WebError::MissingResources)?;
    Ok(parse_resources(&json)?)
}

#[wasm_bindgen(js_name = mountArchiveSearch)]
pub fn mount_archive_search(
    resources: JsValue,
    escaping: Option<String>,
) -> Result<(), JsValue> {
    let to_js = |err: WebError| JsValue::from_str(&err.to_string());

    let window = web_sys::window().ok_or(WebError::DomUnavailable).map_err(to_js)?;
    let document = window
        .document()
        .ok_or(WebError::DomUnavailable)
        .map_err(to_js)?;
    let resources = resources_from_js(&resources).map_err(to_js)?;
    let escaping = match escaping.as_deref() {
        Some(value) => value
            .parse::<Escaping>()
            .map_err(|err| to_js(err.into()))?,
        None => Escaping::default(),
    };
    let template = ItemTemplate::default().with_escaping(escaping);

    if document.ready_state() == "loading" {
        let ready_window = window.clone();
        let on_ready = Closure::once(move |_event: Event| {
            if let Err(err) = start(&ready_window, resources, template) {
                wasm_bindgen::throw_str(&err.to_string());
            }
        });
        window.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        start(&window, resources, template).map_err(to_js)
    }
}

fn start(window: &Window, resources: Resources, template: ItemTemplate) -> Result<(), WebError> {
    let document = window.document().ok_or(WebError::DomUnavailable)?;
    let page = DomPage::new(document);
    let widget = Rc::new(mount(&page, resources, template)?);

    let listener = {
        let widget = Rc::clone(&widget);
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            widget.handle_input();
        })
    };
    widget
        .input()
        .0
        .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
        .map_err(WebError::from_js)?;
    listener.forget();

    let href = window.location().href().map_err(WebError::from_js)?;
    widget.initialize_from_href(&href)?;
    Ok(())
}
