//! Content blocks and pages.

use std::fmt;

use serde::Deserialize;

/// Kind of remote document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Reusable content block embedded in other pages.
    ContentBlock,
    /// Stand-alone page.
    Page,
}

impl DocumentKind {
    /// Collection segment of the REST path.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::ContentBlock => "content_block",
            Self::Page => "pages",
        }
    }
}

/// Well-known remote document a use case publishes into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    /// REST collection the document lives in.
    pub kind: DocumentKind,
    /// WordPress post id.
    pub id: String,
}

impl DocumentRef {
    /// Reference a content block.
    #[must_use]
    pub fn content_block(id: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::ContentBlock,
            id: id.into(),
        }
    }

    /// Reference a page.
    #[must_use]
    pub fn page(id: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::Page,
            id: id.into(),
        }
    }

    /// Path relative to the REST root.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind.path_segment(), self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Document as returned by `GET {kind}/{id}`.
///
/// Only the content is read. Serde ignores the rest of the payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentResponse {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Content field; `raw` is only present in the edit context.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub rendered: Option<String>,
}

impl DocumentResponse {
    /// The body as written, falling back to the rendered form.
    pub(crate) fn into_body(self) -> Option<String> {
        let content = self.content?;
        content.raw.or(content.rendered)
    }
}
