//! The archive search widget.
//!
//! The widget never touches a document directly. It is handed the post
//! records and two capabilities, a text input and a replaceable container, and
//! drives them through two entry points: [`SearchWidget::initialize`] once the
//! page is ready and [`SearchWidget::handle_input`] for every input event.

use metrics::{counter, histogram};
use tracing::{debug, info};
use url::Url;

use crate::application::error::WidgetError;
use crate::domain::resources::{Resources, SearchResource};
use crate::domain::search::{self, passes_length_gate};
use crate::presentation::template::ItemTemplate;

pub const SEARCH_INPUT_ID: &str = "search";
pub const RESULTS_CONTAINER_CLASS: &str = "archive-list";
pub const QUERY_PARAMETER_KEY: &str = "query";

pub const METRIC_SEARCH_TOTAL: &str = "blogsift_search_total";
pub const METRIC_SEARCH_MATCHES: &str = "blogsift_search_matches";
pub const METRIC_RESULTS_CLEARED_TOTAL: &str = "blogsift_results_cleared_total";

/// A text-input-like control.
pub trait QueryInput {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// An element whose whole content can be swapped in one assignment.
pub trait ResultsContainer {
    fn replace_content(&self, markup: &str);

    fn clear(&self) {
        self.replace_content("");
    }
}

/// Locates the widget's elements on a page.
pub trait PageHost {
    type Input: QueryInput;
    type Container: ResultsContainer;

    fn input_by_id(&self, id: &str) -> Option<Self::Input>;
    fn first_by_class(&self, class: &str) -> Option<Self::Container>;
}

/// What an input event did to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Rendered { matches: usize },
    Cleared,
}

/// Replace the container's content with the markup for `matches`.
pub fn re_render_results<C>(container: &C, template: &ItemTemplate, matches: &[&SearchResource])
where
    C: ResultsContainer + ?Sized,
{
    let markup = template.results_markup(matches.iter().copied());
    container.replace_content(&markup);
}

/// First `query` parameter of a page url, form-decoded. An empty value counts as absent.
pub fn page_query(page_url: &Url) -> Option<String> {
    page_url
        .query_pairs()
        .find(|(key, _)| key == QUERY_PARAMETER_KEY)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub struct SearchWidget<I, C> {
    resources: Resources,
    template: ItemTemplate,
    input: I,
    container: C,
}

impl<I, C> SearchWidget<I, C>
where
    I: QueryInput,
    C: ResultsContainer,
{
    pub fn new(resources: Resources, input: I, container: C) -> Self {
        Self {
            resources,
            template: ItemTemplate::default(),
            input,
            container,
        }
    }

    pub fn with_template(self, template: ItemTemplate) -> Self {
        Self { template, ..self }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn template(&self) -> &ItemTemplate {
        &self.template
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn search_for(&self, needle: &str) -> Vec<&SearchResource> {
        search::search_for(&self.resources, needle)
    }

    pub fn result_item_markup(&self, resource: &SearchResource) -> String {
        self.template.result_item_markup(resource)
    }

    pub fn re_render_results(&self, matches: &[&SearchResource]) {
        re_render_results(&self.container, &self.template, matches);
    }

    /// Run the url-driven search, if the page was opened with a `query`.
    ///
    /// The length gate does not apply here: any non-empty query is searched
    /// and echoed back into the input.
    pub fn initialize(&self, page_url: &Url) -> Option<usize> {
        let query = page_query(page_url)?;
        let matches = self.render_search(&query);
        self.input.set_value(&query);
        info!(query = %query, matches, "applied search query from page url");
        Some(matches)
    }

    /// Same as [`initialize`](Self::initialize) for a url that still has to be parsed.
    pub fn initialize_from_href(&self, href: &str) -> Result<Option<usize>, WidgetError> {
        let page_url =
            Url::parse(href).map_err(|source| WidgetError::invalid_page_url(href, source))?;
        Ok(self.initialize(&page_url))
    }

    /// React to the input's current value.
    pub fn handle_input(&self) -> InputOutcome {
        let value = self.input.value();
        if passes_length_gate(&value) {
            let matches = self.render_search(&value);
            InputOutcome::Rendered { matches }
        } else {
            self.container.clear();
            counter!(METRIC_RESULTS_CLEARED_TOTAL).increment(1);
            debug!(
                length = search::query_length(&value),
                "query below threshold; cleared results"
            );
            InputOutcome::Cleared
        }
    }

    fn render_search(&self, needle: &str) -> usize {
        let matches = self.search_for(needle);
        self.re_render_results(&matches);

        let count = matches.len();
        counter!(METRIC_SEARCH_TOTAL).increment(1);
        histogram!(METRIC_SEARCH_MATCHES).record(count as f64);
        debug!(needle, matches = count, "rendered search results");
        count
    }
}

/// Locate the search input and results container on `host` and build a widget.
pub fn mount<H: PageHost>(
    host: &H,
    resources: Resources,
    template: ItemTemplate,
) -> Result<SearchWidget<H::Input, H::Container>, WidgetError> {
    let input = host
        .input_by_id(SEARCH_INPUT_ID)
        .ok_or_else(|| WidgetError::missing_element(format!("#{SEARCH_INPUT_ID}")))?;
    let container = host
        .first_by_class(RESULTS_CONTAINER_CLASS)
        .ok_or_else(|| WidgetError::missing_element(format!(".{RESULTS_CONTAINER_CLASS}")))?;

    info!(
        resources = resources.len(),
        escaping = %template.escaping(),
        "mounted archive search"
    );
    Ok(SearchWidget::new(resources, input, container).with_template(template))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct FakeInput {
        value: RefCell<String>,
    }

    impl FakeInput {
        fn typed(value: &str) -> Self {
            Self {
                value: RefCell::new(value.to_string()),
            }
        }

        fn type_text(&self, value: &str) {
            *self.value.borrow_mut() = value.to_string();
        }
    }

    impl QueryInput for FakeInput {
        fn value(&self) -> String {
            self.value.borrow().clone()
        }

        fn set_value(&self, value: &str) {
            *self.value.borrow_mut() = value.to_string();
        }
    }

    #[derive(Default)]
    struct FakeContainer {
        content: RefCell<String>,
        writes: Cell<usize>,
    }

    impl ResultsContainer for FakeContainer {
        fn replace_content(&self, markup: &str) {
            *self.content.borrow_mut() = markup.to_string();
            self.writes.set(self.writes.get() + 1);
        }
    }

    fn resources() -> Resources {
        Resources::new(vec![
            SearchResource {
                title: "Hello World".to_string(),
                url: "/hello".to_string(),
                date_timestamp: "2020-01-01".to_string(),
                date_human_readable: "Jan 1, 2020".to_string(),
                excerpt: Some("greet".to_string()),
            },
            SearchResource {
                title: "notes on hello handlers".to_string(),
                url: "/handlers".to_string(),
                date_timestamp: "2020-02-01".to_string(),
                date_human_readable: "Feb 1, 2020".to_string(),
                excerpt: None,
            },
        ])
    }

    fn widget(initial: &str) -> SearchWidget<FakeInput, FakeContainer> {
        SearchWidget::new(
            resources(),
            FakeInput::typed(initial),
            FakeContainer::default(),
        )
        .with_template(ItemTemplate::new("[{post_link}]"))
    }

    #[test]
    fn renders_matches_in_one_write() {
        let widget = widget("hel");
        assert_eq!(widget.handle_input(), InputOutcome::Rendered { matches: 2 });
        assert_eq!(*widget.container().content.borrow(), "[/hello][/handlers]");
        assert_eq!(widget.container().writes.get(), 1);
    }

    #[test]
    fn two_characters_clear_even_when_they_would_match() {
        let widget = widget("hello");
        widget.handle_input();
        assert!(!widget.container().content.borrow().is_empty());

        widget.input().type_text("he");
        assert_eq!(widget.handle_input(), InputOutcome::Cleared);
        assert!(widget.container().content.borrow().is_empty());
    }

    #[test]
    fn empty_input_clears() {
        let widget = widget("");
        assert_eq!(widget.handle_input(), InputOutcome::Cleared);
        assert_eq!(widget.container().writes.get(), 1);
    }

    #[test]
    fn three_characters_without_matches_render_empty() {
        let widget = widget("zzz");
        assert_eq!(widget.handle_input(), InputOutcome::Rendered { matches: 0 });
        assert!(widget.container().content.borrow().is_empty());
    }

    #[test]
    fn rendering_twice_is_stable() {
        let widget = widget("");
        let matches = widget.search_for("hand");
        widget.re_render_results(&matches);
        let first = widget.container().content.borrow().clone();
        widget.re_render_results(&matches);
        assert_eq!(*widget.container().content.borrow(), first);
    }

    #[test]
    fn page_query_takes_first_decoded_value() {
        let url = Url::parse("https://blog.example/search/?query=hello+world&query=second")
            .expect("valid url");
        assert_eq!(page_query(&url).as_deref(), Some("hello world"));

        let encoded = Url::parse("https://blog.example/search/?query=caf%C3%A9").expect("valid url");
        assert_eq!(page_query(&encoded).as_deref(), Some("café"));

        let empty = Url::parse("https://blog.example/search/?query=").expect("valid url");
        assert_eq!(page_query(&empty), None);

        let absent = Url::parse("https://blog.example/search/").expect("valid url");
        assert_eq!(page_query(&absent), None);
    }

    #[test]
    fn initialize_searches_short_queries_and_echoes_them() {
        let widget = widget("");
        let url = Url::parse("https://blog.example/search/?query=h").expect("valid url");

        assert_eq!(widget.initialize(&url), Some(2));
        assert_eq!(widget.input().value(), "h");
        assert_eq!(*widget.container().content.borrow(), "[/hello][/handlers]");
    }

    #[test]
    fn initialize_without_query_leaves_page_alone() {
        let widget = widget("typed");
        let url = Url::parse("https://blog.example/search/").expect("valid url");

        assert_eq!(widget.initialize(&url), None);
        assert_eq!(widget.input().value(), "typed");
        assert_eq!(widget.container().writes.get(), 0);
    }

    #[test]
    fn initialize_rejects_relative_href() {
        let widget = widget("");
        let err = widget
            .initialize_from_href("/search/?query=hello")
            .expect_err("relative href has no base");
        assert!(matches!(err, WidgetError::InvalidPageUrl { .. }));
    }

    struct FakePage {
        has_input: bool,
        has_container: bool,
    }

    impl PageHost for FakePage {
        type Input = FakeInput;
        type Container = FakeContainer;

        fn input_by_id(&self, id: &str) -> Option<FakeInput> {
            (self.has_input && id == SEARCH_INPUT_ID).then(FakeInput::default)
        }

        fn first_by_class(&self, class: &str) -> Option<FakeContainer> {
            (self.has_container && class == RESULTS_CONTAINER_CLASS)
                .then(FakeContainer::default)
        }
    }

    #[test]
    fn mount_names_the_missing_element() {
        let missing_input = FakePage {
            has_input: false,
            has_container: true,
        };
        match mount(&missing_input, resources(), ItemTemplate::default()) {
            Err(WidgetError::MissingElement { selector }) => assert_eq!(selector, "#search"),
            _ => panic!("expected missing input"),
        }

        let missing_container = FakePage {
            has_input: true,
            has_container: false,
        };
        match mount(&missing_container, resources(), ItemTemplate::default()) {
            Err(WidgetError::MissingElement { selector }) => {
                assert_eq!(selector, ".archive-list")
            }
            _ => panic!("expected missing container"),
        }
    }

    #[test]
    fn mount_uses_supplied_template() {
        let page = FakePage {
            has_input: true,
            has_container: true,
        };
        let widget = mount(&page, resources(), ItemTemplate::new("<{post_title}>"))
            .expect("both elements present");
        widget.input().type_text("handlers");
        widget.handle_input();
        assert_eq!(
            *widget.container().content.borrow(),
            "<notes on hello handlers>"
        );
    }
}
