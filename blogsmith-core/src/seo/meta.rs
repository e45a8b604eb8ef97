//! Meta tags, social cards and JSON-LD for a post

use crate::config::SiteConfig;
use chrono::{DateTime, Utc};
use regex_utils::markdown::{PARAGRAPH_BREAK, SLUG_SEPARATOR};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_DESCRIPTION_CHARS: usize = 160;
const MAX_SLUG_CHARS: usize = 80;

/// A single `<meta>` tag, either `property=` (Open Graph) or `name=` (Twitter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn new(key: &str, content: impl Into<String>) -> Self {
        Self { key: key.to_string(), content: content.into() }
    }
}

/// Everything a page head needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaBundle {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub slug: String,
    pub canonical_url: String,
    pub open_graph: Vec<MetaTag>,
    pub twitter: Vec<MetaTag>,
    pub schema: Value,
}

/// Inputs that do not come from the body
#[derive(Debug, Clone, Default)]
pub struct PostMetadata {
    /// Explicit title; the first H1 is used when absent
    pub title: Option<String>,
    /// Content type such as "blog-post" or "guide"
    pub content_type: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Build the meta bundle for a body
pub fn build_meta(
    body: &str,
    primary_keyword: &str,
    metadata: &PostMetadata,
    site: &SiteConfig,
) -> MetaBundle {
    let raw_title = metadata
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| title_case(primary_keyword));

    let title = optimize_title(&raw_title, primary_keyword);
    let description = meta_description(body, primary_keyword);
    let slug = slugify(&raw_title);
    let canonical_url = format!("{}/{}", site.base_url(), slug);

    let mut keywords = vec![primary_keyword.to_string()];
    for keyword in &site.default_keywords {
        if !keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            keywords.push(keyword.clone());
        }
    }

    let published = metadata.published_at.unwrap_or_else(Utc::now);
    let content_type = metadata.content_type.as_deref().unwrap_or("blog-post");

    let open_graph = vec![
        MetaTag::new("og:title", title.clone()),
        MetaTag::new("og:description", description.clone()),
        MetaTag::new("og:type", "article"),
        MetaTag::new("og:url", canonical_url.clone()),
        MetaTag::new("og:site_name", site.name.clone()),
        MetaTag::new("og:image", site.logo_url.clone()),
        MetaTag::new("article:published_time", published.to_rfc3339()),
    ];

    let twitter = vec![
        MetaTag::new("twitter:card", "summary_large_image"),
        MetaTag::new("twitter:site", site.twitter_handle.clone()),
        MetaTag::new("twitter:title", title.clone()),
        MetaTag::new("twitter:description", description.clone()),
        MetaTag::new("twitter:image", site.logo_url.clone()),
    ];

    let schema = schema_markup(
        &title,
        &description,
        &canonical_url,
        &keywords,
        content_type,
        published,
        site,
    );

    MetaBundle { title, description, keywords, slug, canonical_url, open_graph, twitter, schema }
}

/// Keyword-prefixed title capped at 60 characters
pub fn optimize_title(title: &str, primary_keyword: &str) -> String {
    let title = title.trim();
    let titled = if primary_keyword.is_empty()
        || title.to_lowercase().contains(&primary_keyword.to_lowercase())
    {
        title.to_string()
    } else {
        format!("{}: {}", title_case(primary_keyword), title)
    };
    truncate_with_ellipsis(&titled, MAX_TITLE_CHARS)
}

/// Bulleted list item or a thematic break such as `---`
fn is_list_or_rule(paragraph: &str) -> bool {
    ["* ", "- ", "+ "].iter().any(|marker| paragraph.starts_with(marker))
        || (paragraph.len() >= 3 && paragraph.chars().all(|c| matches!(c, '-' | '*' | '_' | ' ')))
}

/// First plain paragraph, keyword-prefixed, capped at 160 characters
pub fn meta_description(body: &str, primary_keyword: &str) -> String {
    let paragraph = PARAGRAPH_BREAK
        .split(body)
        .map(str::trim)
        .find(|p| !p.is_empty() && !p.starts_with('#') && !is_list_or_rule(p));

    let description = match paragraph {
        Some(p) => {
            let flat = p.split_whitespace().collect::<Vec<_>>().join(" ");
            if flat.to_lowercase().contains(&primary_keyword.to_lowercase()) {
                flat
            } else {
                format!("{}: {}", title_case(primary_keyword), flat)
            }
        }
        None => format!(
            "Discover everything you need to know about {primary_keyword}, with expert insights, practical tips and the latest trends."
        ),
    };

    truncate_with_ellipsis(&description, MAX_DESCRIPTION_CHARS)
}

fn schema_markup(
    title: &str,
    description: &str,
    url: &str,
    keywords: &[String],
    content_type: &str,
    published: DateTime<Utc>,
    site: &SiteConfig,
) -> Value {
    let schema_type = match content_type {
        "blog-post" | "article" | "guide" | "tutorial" | "listicle" | "news" | "review"
        | "case-study" => "Article",
        _ => "WebPage",
    };

    let organization = json!({
        "@type": "Organization",
        "name": site.name,
        "url": site.base_url(),
    });

    json!({
        "@context": "https://schema.org",
        "@type": schema_type,
        "headline": title,
        "description": description,
        "url": url,
        "keywords": keywords.join(", "),
        "datePublished": published.to_rfc3339(),
        "dateModified": published.to_rfc3339(),
        "author": organization,
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "url": site.base_url(),
            "logo": { "@type": "ImageObject", "url": site.logo_url },
        },
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
    })
}

/// Text of the first `# ` heading
pub fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|l| l.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// URL slug: lowercase ASCII alphanumerics joined by single dashes
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let slug = SLUG_SEPARATOR.replace_all(&lower, "-");
    let slug: String = slug.trim_matches('-').chars().take(MAX_SLUG_CHARS).collect();
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() { "post".to_string() } else { slug }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept.trim_end())
}
