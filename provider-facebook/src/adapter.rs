//! Graph payload normalization

use chrono::{DateTime, Utc};
use core_provider::adapter::{next_cursor, parse_compact_offset};
use core_provider::{sort_images, Cursor, ItemAdapter};

use crate::types::{FacebookImage, FacebookItem, FacebookPage};

/// Photos are always served as JPEG by the Graph CDN
const PHOTO_MIME_TYPE: &str = "image/jpeg";
const FOLDER_ICON: &str = "folder";

pub struct FacebookAdapter;

impl FacebookAdapter {
    fn sorted_images(item: &FacebookItem) -> Vec<FacebookImage> {
        sort_images(item.images.clone().unwrap_or_default())
    }
}

impl ItemAdapter for FacebookAdapter {
    type Item = FacebookItem;
    type Page = FacebookPage;

    /// Albums have no `images`; photos always do
    fn is_folder(item: &FacebookItem) -> bool {
        item.images.is_none()
    }

    fn item_icon(item: &FacebookItem) -> Option<String> {
        if Self::is_folder(item) {
            Some(FOLDER_ICON.to_string())
        } else {
            item.icon.clone()
        }
    }

    fn item_name(item: &FacebookItem) -> String {
        match &item.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!(
                "{} {}",
                item.id,
                item.created_time.as_deref().unwrap_or_default()
            )
            .trim_end()
            .to_string(),
        }
    }

    fn mime_type(item: &FacebookItem) -> Option<String> {
        (!Self::is_folder(item)).then(|| PHOTO_MIME_TYPE.to_string())
    }

    fn item_id(item: &FacebookItem) -> String {
        item.id.clone()
    }

    /// Smallest rendition of a photo
    fn thumbnail_url(item: &FacebookItem) -> Option<String> {
        if Self::is_folder(item) {
            return None;
        }
        Self::sorted_images(item)
            .into_iter()
            .find_map(|image| image.source)
    }

    fn request_path(item: &FacebookItem) -> String {
        item.id.clone()
    }

    fn modified_date(item: &FacebookItem) -> Option<DateTime<Utc>> {
        item.created_time.as_deref().and_then(parse_compact_offset)
    }

    fn sub_list(page: &FacebookPage) -> &[FacebookItem] {
        &page.data
    }

    /// Facebook keeps handing out an `after` cursor on the last page, so
    /// `paging.next` decides whether another page exists.
    fn next_page_path(
        page: &FacebookPage,
        current_query: &[(String, String)],
        directory: Option<&str>,
    ) -> Option<Cursor> {
        let paging = page.paging.as_ref()?;
        paging.next.as_ref()?;
        let after = paging.cursors.as_ref()?.after.as_deref()?;
        Some(next_cursor(directory, current_query, after))
    }
}

/// Source URL of the largest rendition
pub fn largest_image_source(images: Vec<FacebookImage>) -> Option<String> {
    sort_images(images)
        .into_iter()
        .rev()
        .find_map(|image| image.source)
}
