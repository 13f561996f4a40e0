//! Archive list item markup.
//!
//! Each match becomes one `<li>` built by literal placeholder substitution.
//! Tokens are replaced one at a time, first occurrence only, each pass working
//! on the output of the previous one. Values go in verbatim unless the template
//! is built with [`Escaping::Html`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::resources::SearchResource;

pub const POST_LINK_PLACEHOLDER: &str = "{post_link}";
pub const POST_TITLE_PLACEHOLDER: &str = "{post_title}";
pub const POST_DATE_TIMESTAMP_PLACEHOLDER: &str = "{post_date_timestamp}";
pub const POST_DATE_READABLE_PLACEHOLDER: &str = "{post_date_human_readable}";
pub const POST_EXCERPT_PLACEHOLDER: &str = "{post_excerpt}";

pub const ITEM_TEMPLATE: &str = r#"<li class="archive-list-item">
<a class="archive-post-item" href="{post_link}">
<div class="date-container">
    <time datetime="{post_date_timestamp}" itemprop="datePublished">{post_date_human_readable}</time>
</div>
<div class="content-container">
    <h2 class="archive-post-title">{post_title}</h2>
    <p class="post-excerpt">
        {post_excerpt}
    </p>
</div>
</a>
</li>"#;

/// How record values are treated before they are spliced into the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    /// Insert values as-is; the resource list must already be safe markup.
    #[default]
    Verbatim,
    /// Escape every value as HTML text before insertion.
    Html,
}

impl Escaping {
    fn apply<'a>(self, value: &'a str) -> Cow<'a, str> {
        match self {
            Escaping::Verbatim => Cow::Borrowed(value),
            Escaping::Html => Cow::Owned(ammonia::clean_text(value)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown escaping mode `{0}` (expected `verbatim` or `html`)")]
pub struct UnknownEscaping(pub String);

impl FromStr for Escaping {
    type Err = UnknownEscaping;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "verbatim" => Ok(Escaping::Verbatim),
            "html" => Ok(Escaping::Html),
            other => Err(UnknownEscaping(other.to_string())),
        }
    }
}

impl fmt::Display for Escaping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Escaping::Verbatim => f.write_str("verbatim"),
            Escaping::Html => f.write_str("html"),
        }
    }
}

/// Item template plus the escaping policy used when filling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    source: Cow<'static, str>,
    escaping: Escaping,
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self {
            source: Cow::Borrowed(ITEM_TEMPLATE),
            escaping: Escaping::Verbatim,
        }
    }
}

impl ItemTemplate {
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            escaping: Escaping::Verbatim,
        }
    }

    pub fn with_escaping(self, escaping: Escaping) -> Self {
        Self { escaping, ..self }
    }

    pub fn escaping(&self) -> Escaping {
        self.escaping
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Markup for a single archive entry.
    pub fn result_item_markup(&self, resource: &SearchResource) -> String {
        let substitutions = [
            (POST_LINK_PLACEHOLDER, resource.url.as_str()),
            (POST_TITLE_PLACEHOLDER, resource.title.as_str()),
            (POST_DATE_TIMESTAMP_PLACEHOLDER, resource.date_timestamp.as_str()),
            (
                POST_DATE_READABLE_PLACEHOLDER,
                resource.date_human_readable.as_str(),
            ),
            (POST_EXCERPT_PLACEHOLDER, resource.excerpt_or_empty()),
        ];

        substitutions
            .into_iter()
            .fold(self.source.to_string(), |markup, (token, value)| {
                markup.replacen(token, &self.escaping.apply(value), 1)
            })
    }

    /// Concatenated markup for every match, in order.
    pub fn results_markup<'a, I>(&self, matches: I) -> String
    where
        I: IntoIterator<Item = &'a SearchResource>,
    {
        matches
            .into_iter()
            .map(|resource| self.result_item_markup(resource))
            .collect()
    }
}
