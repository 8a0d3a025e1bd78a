//! Viewer Extractor for viewerscan.
//!
//! Pulls the "currently viewing" names out of a forum page. The names live in
//! `ul[@class='<list class>']/li/a/span` and are returned in document order.

use crate::types::errors::ParseError;
use crate::types::viewer::Viewer;

/// Trait defining viewer list extraction.
pub trait ViewerExtractorTrait {
    fn extract_viewers(&self, html: &str) -> Result<Vec<Viewer>, ParseError>;
}

/// Scanner for the viewer list markup.
#[derive(Debug, Clone)]
pub struct ViewerExtractor {
    list_class: String,
}

/// One element found by `find_elements`.
struct Element<'a> {
    attrs: &'a str,
    inner: &'a str,
}

impl ViewerExtractor {
    pub fn new(list_class: impl Into<String>) -> Self {
        Self {
            list_class: list_class.into(),
        }
    }

    pub fn list_class(&self) -> &str {
        &self.list_class
    }

    /// Finds every top-level `<tag ...>...</tag>` block in `html`.
    ///
    /// Tag names are matched case-insensitively. Same-name nesting is not
    /// tracked; an inner block ends at the first closing tag.
    fn find_elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
        // ASCII lowercasing keeps byte offsets aligned with `html`.
        let lower = html.to_ascii_lowercase();
        let open = format!("<{}", tag);
        let close = format!("</{}", tag);

        let mut found = Vec::new();
        let mut pos = 0;
        while let Some(rel) = lower[pos..].find(&open) {
            let start = pos + rel;
            let name_end = start + open.len();

            // Reject longer tag names sharing the prefix, e.g. `<ul` vs `<ulx`.
            match lower[name_end..].chars().next() {
                Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {}
                Some(_) => {
                    pos = name_end;
                    continue;
                }
                None => break,
            }

            let Some(tag_end) = lower[name_end..].find('>') else {
                break;
            };
            let attrs_end = name_end + tag_end;
            let content_start = attrs_end + 1;

            let Some(content_end) = Self::find_close(&lower, content_start, &close) else {
                break;
            };

            found.push(Element {
                attrs: &html[name_end..attrs_end],
                inner: &html[content_start..content_end],
            });

            pos = lower[content_end..]
                .find('>')
                .map(|i| content_end + i + 1)
                .unwrap_or(lower.len());
        }
        found
    }

    /// Position of the next `</tag` at or after `from` that really closes `tag`,
    /// skipping longer names such as `</abbr` when looking for `</a`.
    fn find_close(lower: &str, from: usize, close: &str) -> Option<usize> {
        let mut pos = from;
        while let Some(rel) = lower[pos..].find(close) {
            let start = pos + rel;
            let name_end = start + close.len();
            match lower[name_end..].chars().next() {
                Some(c) if c == '>' || c.is_ascii_whitespace() => return Some(start),
                Some(_) => pos = name_end,
                None => return None,
            }
        }
        None
    }

    /// Reads the value of attribute `name` from a raw attribute string.
    fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
        let lower = attrs.to_ascii_lowercase();
        let mut pos = 0;
        while let Some(rel) = lower[pos..].find(name) {
            let start = pos + rel;
            let preceded_ok = start == 0
                || lower[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_ascii_whitespace());
            let rest = lower[start + name.len()..].trim_start();
            if !preceded_ok || !rest.starts_with('=') {
                pos = start + name.len();
                continue;
            }

            let value_start = attrs.len() - rest.len() + 1;
            let value = attrs[value_start..].trim_start();
            let offset = attrs.len() - value.len();
            return match value.chars().next() {
                Some(q @ ('"' | '\'')) => attrs[offset + 1..]
                    .find(q)
                    .map(|end| &attrs[offset + 1..offset + 1 + end]),
                Some(_) => {
                    let end = value
                        .find(|c: char| c.is_ascii_whitespace() || c == '/')
                        .unwrap_or(value.len());
                    Some(&value[..end])
                }
                None => None,
            };
        }
        None
    }

    /// Returns the direct text of an element, dropping any nested tags.
    fn text_of(inner: &str) -> String {
        let mut result = String::with_capacity(inner.len());
        let mut in_tag = false;
        for ch in inner.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => result.push(ch),
                _ => {}
            }
        }
        Self::decode_entities(&result)
    }

    /// Decodes the handful of entities forum software emits in user names.
    fn decode_entities(text: &str) -> String {
        if !text.contains('&') {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            let tail = &rest[amp..];
            let decoded = tail.find(';').and_then(|semi| {
                let entity = &tail[1..semi];
                let ch = match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                        .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                        .and_then(char::from_u32),
                };
                ch.map(|c| (c, semi + 1))
            });
            match decoded {
                Some((c, consumed)) => {
                    out.push(c);
                    rest = &tail[consumed..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl ViewerExtractorTrait for ViewerExtractor {
    /// Extracts viewer names in page order.
    ///
    /// A page without a matching list is an error; a matching list with no
    /// entries yields an empty vector.
    fn extract_viewers(&self, html: &str) -> Result<Vec<Viewer>, ParseError> {
        let lists: Vec<Element> = Self::find_elements(html, "ul")
            .into_iter()
            .filter(|ul| Self::attribute(ul.attrs, "class") == Some(self.list_class.as_str()))
            .collect();

        if lists.is_empty() {
            return Err(ParseError::ListNotFound(self.list_class.clone()));
        }

        let mut viewers = Vec::new();
        for list in lists {
            for item in Self::find_elements(list.inner, "li") {
                for link in Self::find_elements(item.inner, "a") {
                    for span in Self::find_elements(link.inner, "span") {
                        let name = Self::text_of(span.inner);
                        if !name.is_empty() {
                            viewers.push(Viewer::from(name));
                        }
                    }
                }
            }
        }
        Ok(viewers)
    }
}
