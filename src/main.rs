use std::{
    io::{self, Write},
    process,
};

use blogsift::{
    application::{
        error::AppError,
        widget::{InputOutcome, QueryInput, SearchWidget, mount},
    },
    config::{self, OutputFormat, QueryArgs, SimulateArgs},
    domain::search,
    infra::{
        error::InfraError,
        memory::{MemoryContainer, MemoryInput, MemoryPage},
        resources::{load_item_template, load_resources},
        telemetry,
    },
    presentation::template::ItemTemplate,
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let causes = error.chain().join(": ");
    if dispatcher::has_been_set() {
        error!(error = %causes, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %causes, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let resources = load_resources(&settings.resources.path)?;
    let template = match settings.render.template_path.as_deref() {
        Some(path) => load_item_template(path)?,
        None => ItemTemplate::default(),
    }
    .with_escaping(settings.render.escaping);

    info!(
        resources = resources.len(),
        path = %settings.resources.path.display(),
        "archive loaded"
    );

    let page = MemoryPage::archive();
    let widget = mount(&page, resources, template)?;

    match cli_args.command {
        config::Command::Query(args) => run_query(&widget, args),
        config::Command::Simulate(args) => run_simulate(&widget, args),
    }
}

fn run_query(
    widget: &SearchWidget<MemoryInput, MemoryContainer>,
    args: QueryArgs,
) -> Result<(), AppError> {
    let matches = widget.search_for(&args.needle);
    let mut stdout = io::stdout().lock();

    match args.format {
        OutputFormat::Markup => {
            widget.re_render_results(&matches);
            write!(stdout, "{}", widget.container().content()).map_err(InfraError::from)?;
        }
        OutputFormat::Json => {
            let body = serde_json::to_string_pretty(&matches).map_err(InfraError::from)?;
            writeln!(stdout, "{body}").map_err(InfraError::from)?;
        }
    }

    Ok(())
}

fn run_simulate(
    widget: &SearchWidget<MemoryInput, MemoryContainer>,
    args: SimulateArgs,
) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();

    let applied = widget.initialize_from_href(&args.page_url)?;
    let summary = match applied {
        Some(matches) => format!("query applied, {matches} matches"),
        None => "no query".to_string(),
    };
    write_step(
        &mut stdout,
        &format!("load {} ({summary})", args.page_url),
        widget,
    )?;

    for value in &args.inputs {
        widget.input().type_text(value);
        let summary = match widget.handle_input() {
            InputOutcome::Rendered { matches } => format!("{matches} matches"),
            InputOutcome::Cleared => format!(
                "cleared, {} of {} required characters",
                search::query_length(value),
                search::QUERY_LENGTH_THRESHOLD + 1
            ),
        };
        write_step(&mut stdout, &format!("input {value:?} ({summary})"), widget)?;
    }

    Ok(())
}

fn write_step(
    out: &mut impl Write,
    heading: &str,
    widget: &SearchWidget<MemoryInput, MemoryContainer>,
) -> Result<(), AppError> {
    let content = widget.container().content();
    writeln!(out, "# {heading}").map_err(InfraError::from)?;
    writeln!(out, "input: {}", widget.input().value()).map_err(InfraError::from)?;
    if !content.is_empty() {
        writeln!(out, "{content}").map_err(InfraError::from)?;
    }
    Ok(())
}
