/* src/core/rust/src/head.rs */

use serde::Serialize;

use crate::configuration::Configuration;
use crate::language::Language;
use crate::page_meta::{PageTitleConfig, build_description, build_keywords, build_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttr {
  Name,
  Property,
}

impl MetaAttr {
  fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Property => "property",
    }
  }
}

/// One `<meta>` tag, keyed either by `name` or by `property` (Open Graph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
  pub attr: MetaAttr,
  pub key: String,
  pub content: String,
}

impl MetaTag {
  pub fn name(key: impl Into<String>, content: impl Into<String>) -> Self {
    Self { attr: MetaAttr::Name, key: key.into(), content: content.into() }
  }

  pub fn property(key: impl Into<String>, content: impl Into<String>) -> Self {
    Self { attr: MetaAttr::Property, key: key.into(), content: content.into() }
  }

  pub fn to_html(&self) -> String {
    format!(
      r#"<meta {}="{}" content="{}">"#,
      self.attr.as_str(),
      escape_html(&self.key),
      escape_html(&self.content)
    )
  }
}

/// Everything a page pushes into the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadMeta {
  pub title: String,
  pub meta: Vec<MetaTag>,
}

impl HeadMeta {
  pub fn for_page(page: &PageTitleConfig, config: Option<&Configuration>, language: Language) -> Self {
    let title = build_title(page, config, language);
    let description = build_description(page, config, language);
    let meta = vec![
      MetaTag::name("description", description.clone()),
      MetaTag::name("keywords", build_keywords(config)),
      MetaTag::property("og:title", title.clone()),
      MetaTag::property("og:description", description),
      MetaTag::property("og:type", "website"),
      MetaTag::name("twitter:card", "summary"),
    ];
    Self { title, meta }
  }

  pub fn description(&self) -> Option<&str> {
    self
      .meta
      .iter()
      .find(|m| m.attr == MetaAttr::Name && m.key == "description")
      .map(|m| m.content.as_str())
  }

  pub fn to_html(&self) -> String {
    let mut html = format!("<title>{}</title>", escape_html(&self.title));
    for tag in &self.meta {
      html.push_str(&tag.to_html());
    }
    html
  }

  /// Render into a full document: replace any existing `<title>` with the
  /// computed head and set `<html lang>`. A document with no head to insert
  /// into keeps its own title.
  pub fn apply(&self, html: &str, language: Language) -> String {
    if head_insert_point(html).is_none() {
      return inject_html_lang(html, language.html_lang());
    }
    let stripped = strip_title(html);
    let with_meta = inject_head_meta(&stripped, &self.to_html());
    inject_html_lang(&with_meta, language.html_lang())
  }
}

pub(crate) fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

fn strip_title(html: &str) -> String {
  let (Some(start), Some(end)) = (html.find("<title>"), html.find("</title>")) else {
    return html.to_string();
  };
  if end < start {
    return html.to_string();
  }
  let mut out = String::with_capacity(html.len());
  out.push_str(&html[..start]);
  out.push_str(&html[end + "</title>".len()..]);
  out
}

/// Byte offset just past the charset declaration (any case or quoting),
/// else just past the opening `<head>` tag.
fn head_insert_point(html: &str) -> Option<usize> {
  // ASCII lowercasing keeps byte offsets intact
  let lower = html.to_ascii_lowercase();
  let tag_end = |start: usize| lower[start..].find('>').map(|i| start + i + 1);

  if let Some(start) = lower.find("<meta charset") {
    return tag_end(start);
  }
  let mut from = 0;
  while let Some(i) = lower[from..].find("<head") {
    let start = from + i;
    // `<header>` is not the document head
    match lower.as_bytes().get(start + "<head".len()) {
      Some(b) if *b == b'>' || b.is_ascii_whitespace() => return tag_end(start),
      _ => from = start + 1,
    }
  }
  None
}

/// Inject head markup after the `<meta charset>` declaration, or at the top
/// of `<head>` when there is none. Documents without either are returned
/// unchanged.
pub fn inject_head_meta(html: &str, meta_html: &str) -> String {
  let Some(insert_at) = head_insert_point(html) else {
    return html.to_string();
  };
  let mut result = String::with_capacity(html.len() + meta_html.len());
  result.push_str(&html[..insert_at]);
  result.push_str(meta_html);
  result.push_str(&html[insert_at..]);
  result
}

/// Set `<html lang="...">`, leaving documents that already declare one alone.
pub fn inject_html_lang(html: &str, lang: &str) -> String {
  let Some(pos) = html.find("<html") else {
    return html.to_string();
  };
  let tag_end = html[pos..].find('>').map_or(html.len(), |i| pos + i);
  if html[pos..tag_end].contains("lang=") {
    return html.to_string();
  }
  html.replacen("<html", &format!("<html lang=\"{lang}\""), 1)
}
