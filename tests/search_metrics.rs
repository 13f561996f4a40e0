use std::collections::HashMap;

use blogsift::application::widget::{
    METRIC_RESULTS_CLEARED_TOTAL, METRIC_SEARCH_MATCHES, METRIC_SEARCH_TOTAL, mount,
};
use blogsift::domain::resources::{Resources, SearchResource};
use blogsift::infra::memory::MemoryPage;
use blogsift::infra::telemetry::describe_metrics;
use blogsift::presentation::template::ItemTemplate;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

fn post(title: &str, url: &str) -> SearchResource {
    SearchResource {
        title: title.to_string(),
        url: url.to_string(),
        date_timestamp: "2024-05-01".to_string(),
        date_human_readable: "May 1, 2024".to_string(),
        excerpt: None,
    }
}

#[test]
fn widget_emits_search_and_clear_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");
    describe_metrics();

    let resources = Resources::new(vec![
        post("Hello World", "/hello"),
        post("help wanted", "/help"),
        post("Rust notes", "/rust"),
    ]);
    let page = MemoryPage::archive();
    let widget = mount(&page, resources, ItemTemplate::default()).expect("mount");

    widget
        .initialize_from_href("http://localhost/search/?query=he")
        .expect("absolute url");
    widget.input().type_text("zz");
    widget.handle_input();
    widget.input().type_text("zzz");
    widget.handle_input();

    let mut counters = HashMap::new();
    let mut histograms = HashMap::new();
    let mut descriptions = HashMap::new();
    for (composite_key, _unit, description, value) in snapshotter.snapshot().into_vec() {
        let name = composite_key.key().name().to_string();
        if let Some(description) = description {
            descriptions.insert(name.clone(), description.to_string());
        }
        match value {
            DebugValue::Counter(count) => {
                counters.insert(name, count);
            }
            DebugValue::Histogram(values) => {
                let values: Vec<f64> = values.into_iter().map(|value| value.into_inner()).collect();
                histograms.insert(name, values);
            }
            DebugValue::Gauge(_) => {}
        }
    }

    assert_eq!(counters.get(METRIC_SEARCH_TOTAL), Some(&2));
    assert_eq!(counters.get(METRIC_RESULTS_CLEARED_TOTAL), Some(&1));
    assert_eq!(
        histograms.get(METRIC_SEARCH_MATCHES),
        Some(&vec![2.0, 0.0])
    );
    assert!(descriptions.contains_key(METRIC_SEARCH_TOTAL));
}
