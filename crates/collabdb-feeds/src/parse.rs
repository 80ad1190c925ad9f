//! RSS item extraction and HTML stripping.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use collabdb_core::Article;

use crate::error::FeedError;

/// Parse an RSS document into [`Article`]s attributed to `source`.
///
/// Extracts `<item>` elements, pulling `<title>`, `<link>` and `<description>`.
/// HTML in descriptions is stripped. The first `<enclosure>`,
/// `<media:content>` or `<media:thumbnail>` carrying a `url` attribute
/// supplies the image. Items without a title are skipped. Stops after
/// `max_items` articles.
pub fn parse_rss_items(
    xml: &str,
    source: &str,
    max_items: usize,
) -> Result<Vec<Article>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    if max_items == 0 {
        return Ok(articles);
    }

    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut item = ItemFields::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(&e);
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    item = ItemFields::default();
                } else if in_item {
                    if name == "description" {
                        in_description = true;
                    }
                    item.offer_image(&e);
                }
                current_tag = name;
            }
            Ok(Event::Empty(e)) => {
                if in_item {
                    item.offer_image(&e);
                }
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if let Some(article) = std::mem::take(&mut item).into_article(source) {
                        articles.push(article);
                        if articles.len() >= max_items {
                            break;
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    item.push_text(&current_tag, in_description, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    item.push_text(&current_tag, in_description, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Xml(e)),
            _ => {}
        }
    }

    Ok(articles)
}

#[derive(Debug, Default)]
struct ItemFields {
    title: String,
    link: String,
    description: String,
    image_url: Option<String>,
}

impl ItemFields {
    fn push_text(&mut self, tag: &str, in_description: bool, text: &str) {
        if in_description {
            // Nested markup inside <description> splits the text into several
            // events; keep all of them.
            if !self.description.is_empty() {
                self.description.push(' ');
            }
            self.description.push_str(text);
            return;
        }
        match tag {
            "title" => self.title.push_str(text),
            "link" => self.link.push_str(text),
            _ => {}
        }
    }

    fn offer_image(&mut self, e: &BytesStart<'_>) {
        if self.image_url.is_some() {
            return;
        }
        let name = tag_name(e);
        if !matches!(name.as_str(), "enclosure" | "media:content" | "media:thumbnail") {
            return;
        }
        if name == "enclosure" {
            if let Some(kind) = attribute(e, "type") {
                if !kind.starts_with("image/") {
                    return;
                }
            }
        }
        self.image_url = attribute(e, "url").filter(|url| !url.is_empty());
    }

    fn into_article(self, source: &str) -> Option<Article> {
        let title = collapse_whitespace(&self.title);
        if title.is_empty() {
            return None;
        }
        let description = strip_html(&self.description);
        Some(Article {
            title,
            description: (!description.is_empty()).then_some(description),
            source: source.to_string(),
            source_url: self.link.trim().to_string(),
            image_url: self.image_url,
        })
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.try_get_attribute(key)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.trim().to_string()))
}

/// Strip HTML tags from a string and normalize whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
