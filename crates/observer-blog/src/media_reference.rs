//! Recovering media ids from already published content.
//!
//! Generated content references every embedded image with the token
//! produced by [`media_reference`]. This is the only link between a
//! published document and the media it shows, so the token format is a
//! versioned contract: changing it is a compatibility break for documents
//! published by older versions and needs a parser update here.
//!
//! Version 1: `/media/{id}` with a numeric id.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Version of the reference token format.
pub const MEDIA_REFERENCE_VERSION: u32 = 1;

static MEDIA_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/media/(\d+)\b").unwrap());

/// Token a generator embeds next to an image so it can be found again.
#[must_use]
pub fn media_reference(id: &str) -> String {
    format!("/media/{id}")
}

/// First media id referenced by `body`.
///
/// Absence is the normal case for a first publish. Malformed content is
/// treated the same way and never fails.
#[must_use]
pub fn extract_media_id(body: &str) -> Option<String> {
    let id = MEDIA_REFERENCE_RE
        .captures(body)
        .map(|caps| caps[1].to_owned());
    debug!(?id, "Resolved media reference");
    id
}

/// All distinct media ids referenced by `body`, in document order.
#[must_use]
pub fn extract_media_ids(body: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for caps in MEDIA_REFERENCE_RE.captures_iter(body) {
        let id = &caps[1];
        if !ids.iter().any(|known| known == id) {
            ids.push(id.to_owned());
        }
    }
    debug!(count = ids.len(), "Resolved media references");
    ids
}
