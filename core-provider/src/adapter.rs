//! Raw payload to canonical item normalization
//!
//! Each provider implements [`ItemAdapter`] for its own serde payload types.
//! Adapters are pure: no I/O, no state, and the same payload always yields
//! the same canonical output. Every extractor tolerates missing fields and
//! answers `None` (or an empty value) instead of failing.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::model::{CanonicalItem, Cursor, ListResult, CURSOR_PARAM};

/// An image rendition that can be ranked by resolution
pub trait ImageVariant {
    fn width(&self) -> Option<u32>;
    fn height(&self) -> Option<u32>;

    /// Pixel count; unknown dimensions count as zero
    fn resolution(&self) -> u64 {
        u64::from(self.width().unwrap_or(0)) * u64::from(self.height().unwrap_or(0))
    }
}

/// Order image variants by ascending resolution.
///
/// The sort is stable, so equal resolutions keep their original order, and
/// the last element is always the largest variant.
pub fn sort_images<T: ImageVariant>(mut images: Vec<T>) -> Vec<T> {
    images.sort_by_key(|image| image.resolution());
    images
}

/// Normalizes one provider's raw listing payloads
pub trait ItemAdapter {
    /// One raw entry of a listing
    type Item;
    /// The raw listing envelope
    type Page;

    fn is_folder(item: &Self::Item) -> bool;
    fn item_icon(item: &Self::Item) -> Option<String>;
    fn item_name(item: &Self::Item) -> String;
    fn mime_type(item: &Self::Item) -> Option<String>;
    fn item_id(item: &Self::Item) -> String;
    fn thumbnail_url(item: &Self::Item) -> Option<String>;
    fn request_path(item: &Self::Item) -> String;
    fn modified_date(item: &Self::Item) -> Option<DateTime<Utc>>;

    fn item_size(_item: &Self::Item) -> Option<u64> {
        None
    }

    /// Locate the entries inside the envelope
    fn sub_list(page: &Self::Page) -> &[Self::Item];

    /// Cursor for the page after `page`, `None` once pagination is exhausted
    fn next_page_path(
        page: &Self::Page,
        current_query: &[(String, String)],
        directory: Option<&str>,
    ) -> Option<Cursor>;

    fn canonical_item(item: &Self::Item) -> CanonicalItem {
        CanonicalItem {
            is_folder: Self::is_folder(item),
            icon: Self::item_icon(item),
            name: Self::item_name(item),
            mime_type: Self::mime_type(item),
            size: Self::item_size(item),
            id: Self::item_id(item),
            thumbnail: Self::thumbnail_url(item),
            request_path: Self::request_path(item),
            modified_date: Self::modified_date(item),
        }
    }

    fn adapt_page(
        page: &Self::Page,
        username: String,
        current_query: &[(String, String)],
        directory: Option<&str>,
    ) -> ListResult {
        ListResult {
            username,
            items: Self::sub_list(page)
                .iter()
                .map(Self::canonical_item)
                .collect(),
            next_page_path: Self::next_page_path(page, current_query, directory),
        }
    }
}

/// Build the next cursor, keeping the current query and replacing the page token
pub fn next_cursor(
    directory: Option<&str>,
    current_query: &[(String, String)],
    page_token: &str,
) -> Cursor {
    let mut query: Vec<(String, String)> = current_query
        .iter()
        .filter(|(key, _)| key != CURSOR_PARAM)
        .cloned()
        .collect();
    query.push((CURSOR_PARAM.to_string(), page_token.to_string()));
    Cursor::from_parts(directory, &query)
}

/// Parse an RFC 3339 timestamp (`2024-01-02T03:04:05.000Z`)
pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an ISO 8601 timestamp whose offset has no colon (`2024-01-02T03:04:05+0000`)
pub fn parse_compact_offset(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| parse_rfc3339(value))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
