//! Page assembly: merge a resolved fragment into an HTML boilerplate.
//!
//! Only the two fixed insertion points are recognised, in plain and
//! `!`-prefixed form: `$(pageContent)` and `$(pageHeaders)`. Everything else
//! in the boilerplate passes through untouched.

use std::fmt::Write as _;

use crate::error::PageError;

const CONTENT_POINTS: [&str; 2] = ["$(pageContent)", "$(!pageContent)"];
const HEADER_POINTS: [&str; 2] = ["$(pageHeaders)", "$(!pageHeaders)"];
const STYLESHEET_ATTRS: &str = r#"class="auto" rel="stylesheet" type="text/css""#;

/// Page-level settings.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Stylesheets linked from the page head, in order.
    pub css_hrefs: Vec<String>,
    /// Emits `<base target="...">` when set.
    pub default_target_window: Option<String>,
    /// Line delimiter of the output.
    pub line_ending: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            css_hrefs: Vec::new(),
            default_target_window: None,
            line_ending: "\n".to_string(),
        }
    }
}

/// An HTML page template with a content insertion point.
#[derive(Debug, Clone)]
pub struct Boilerplate {
    raw: String,
}

impl Boilerplate {
    /// Wrap a template. Carriage returns are stripped.
    pub fn new(raw: &str) -> Result<Self, PageError> {
        if !CONTENT_POINTS.iter().any(|p| raw.contains(p)) {
            return Err(PageError::MissingContentPoint);
        }
        Ok(Self {
            raw: raw.replace('\r', ""),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn has_headers_point(&self) -> bool {
        HEADER_POINTS.iter().any(|p| self.raw.contains(p))
    }

    /// Build the full page around `fragment`.
    pub fn merge(&self, fragment: &str, options: &PageOptions) -> Result<String, PageError> {
        let mut page = if self.has_headers_point() {
            let headers = page_headers(options);
            replace_points(&self.raw, &HEADER_POINTS, &headers)
        } else if !options.css_hrefs.is_empty() || options.default_target_window.is_some() {
            return Err(PageError::MissingHeadersPoint);
        } else {
            self.raw.clone()
        };
        // Content last, so text inside the fragment is never taken for a point.
        page = replace_points(&page, &CONTENT_POINTS, fragment);
        Ok(convert_line_endings(page, &options.line_ending))
    }
}

/// Finish a fragment that is used without a boilerplate.
pub fn merge_fragment(fragment: &str, options: &PageOptions) -> String {
    if !options.css_hrefs.is_empty() || options.default_target_window.is_some() {
        log::warn!("no boilerplate: stylesheets and target window ignored");
    }
    convert_line_endings(fragment.to_string(), &options.line_ending)
}

/// The `<link>` and `<base>` lines for the headers insertion point.
fn page_headers(options: &PageOptions) -> String {
    let mut headers = String::new();
    for (i, href) in options.css_hrefs.iter().enumerate() {
        let _ = writeln!(
            headers,
            "<link id=\"auto{:02}\" {} href=\"{}\" />",
            i + 1,
            STYLESHEET_ATTRS,
            html_escape::encode_double_quoted_attribute(href)
        );
    }
    if let Some(target) = &options.default_target_window {
        let _ = writeln!(
            headers,
            "<base target=\"{}\">",
            html_escape::encode_double_quoted_attribute(target)
        );
    }
    headers
}

fn replace_points(text: &str, points: &[&str], with: &str) -> String {
    let mut out = text.to_string();
    for point in points {
        if out.contains(point) {
            out = out.replace(point, with);
        }
    }
    out
}

fn convert_line_endings(text: String, line_ending: &str) -> String {
    if line_ending.is_empty() || line_ending == "\n" {
        text
    } else {
        text.replace('\n', line_ending)
    }
}
