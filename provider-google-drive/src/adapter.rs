//! Drive payload normalization

use chrono::{DateTime, Utc};
use core_provider::adapter::{next_cursor, parse_rfc3339};
use core_provider::{Cursor, ItemAdapter};

use crate::types::{DriveFile, FilesListResponse};

pub struct DriveAdapter;

impl ItemAdapter for DriveAdapter {
    type Item = DriveFile;
    type Page = FilesListResponse;

    fn is_folder(item: &DriveFile) -> bool {
        item.is_folder()
    }

    fn item_icon(item: &DriveFile) -> Option<String> {
        item.icon_link.clone()
    }

    /// Workspace documents are named after the format they download as
    fn item_name(item: &DriveFile) -> String {
        let name = item.name.clone().unwrap_or_default();
        match item.export_format() {
            Some(format) if !name.is_empty() => format!("{}.{}", name, format.extension),
            _ => name,
        }
    }

    fn mime_type(item: &DriveFile) -> Option<String> {
        match item.export_format() {
            Some(format) => Some(format.mime_type.to_string()),
            None => item.mime_type.clone(),
        }
    }

    fn item_id(item: &DriveFile) -> String {
        item.id.clone()
    }

    fn thumbnail_url(item: &DriveFile) -> Option<String> {
        item.thumbnail_link.clone()
    }

    fn request_path(item: &DriveFile) -> String {
        item.id.clone()
    }

    fn modified_date(item: &DriveFile) -> Option<DateTime<Utc>> {
        item.modified_time.as_deref().and_then(parse_rfc3339)
    }

    fn item_size(item: &DriveFile) -> Option<u64> {
        item.size_bytes()
    }

    fn sub_list(page: &FilesListResponse) -> &[DriveFile] {
        &page.files
    }

    fn next_page_path(
        page: &FilesListResponse,
        current_query: &[(String, String)],
        directory: Option<&str>,
    ) -> Option<Cursor> {
        let token = page.next_page_token.as_deref().filter(|t| !t.is_empty())?;
        Some(next_cursor(directory, current_query, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime_type: &str) -> DriveFile {
        DriveFile {
            id: "f1".to_string(),
            name: Some("Budget".to_string()),
            mime_type: Some(mime_type.to_string()),
            modified_time: Some("2023-01-02T00:00:00.000Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_binary_file() {
        let mut item = file("image/png");
        item.size = Some("2048".to_string());
        item.thumbnail_link = Some("https://lh3.example/thumb".to_string());

        let canonical = DriveAdapter::canonical_item(&item);
        assert!(!canonical.is_folder);
        assert_eq!(canonical.name, "Budget");
        assert_eq!(canonical.mime_type.as_deref(), Some("image/png"));
        assert_eq!(canonical.size, Some(2048));
        assert_eq!(canonical.thumbnail.as_deref(), Some("https://lh3.example/thumb"));
        assert!(canonical.modified_date.is_some());
    }

    #[test]
    fn test_workspace_document_uses_export_format() {
        let canonical =
            DriveAdapter::canonical_item(&file("application/vnd.google-apps.spreadsheet"));

        assert_eq!(canonical.name, "Budget.xlsx");
        assert_eq!(
            canonical.mime_type.as_deref(),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        );
        assert_eq!(canonical.size, None);
    }

    #[test]
    fn test_non_exportable_workspace_item_keeps_native_type() {
        let canonical = DriveAdapter::canonical_item(&file("application/vnd.google-apps.form"));

        assert_eq!(canonical.name, "Budget");
        assert_eq!(
            canonical.mime_type.as_deref(),
            Some("application/vnd.google-apps.form")
        );
    }

    #[test]
    fn test_folder() {
        let canonical = DriveAdapter::canonical_item(&file("application/vnd.google-apps.folder"));

        assert!(canonical.is_folder);
        assert_eq!(canonical.name, "Budget");
        assert_eq!(canonical.request_path, "f1");
    }

    #[test]
    fn test_missing_fields() {
        let canonical = DriveAdapter::canonical_item(&DriveFile::default());

        assert!(!canonical.is_folder);
        assert_eq!(canonical.name, "");
        assert_eq!(canonical.mime_type, None);
        assert_eq!(canonical.size, None);
        assert_eq!(canonical.modified_date, None);
    }

    #[test]
    fn test_next_page_path() {
        let page = FilesListResponse {
            next_page_token: Some("tok2".to_string()),
            ..Default::default()
        };
        let cursor = DriveAdapter::next_page_path(&page, &[], Some("folderA")).unwrap();
        assert_eq!(cursor.as_str(), "folderA?cursor=tok2");

        let last = FilesListResponse::default();
        assert_eq!(DriveAdapter::next_page_path(&last, &[], None), None);

        let empty_token = FilesListResponse {
            next_page_token: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(DriveAdapter::next_page_path(&empty_token, &[], None), None);
    }
}
