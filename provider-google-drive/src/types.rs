//! Google Drive API response types
//!
//! Data structures for deserializing Google Drive API v3 responses. Fields
//! are optional because `fields=` masks and item kinds decide what is sent.

use serde::Deserialize;

/// MIME type Drive uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Prefix of Google Workspace document types, which have no binary content
pub const WORKSPACE_MIME_PREFIX: &str = "application/vnd.google-apps.";

/// Google Drive API file resource
///
/// See: https://developers.google.com/drive/api/v3/reference/files#resource
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    #[serde(default)]
    pub id: String,

    pub name: Option<String>,

    pub mime_type: Option<String>,

    /// Size in bytes as a decimal string; absent for folders and Workspace documents
    pub size: Option<String>,

    /// Modification time (RFC 3339)
    pub modified_time: Option<String>,

    pub icon_link: Option<String>,

    /// Short-lived thumbnail URL, absent when Drive has not generated one
    pub thumbnail_link: Option<String>,
}

impl DriveFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }

    /// Google-native item (document, form, shortcut...) with no stored bytes
    pub fn is_workspace(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|m| m.starts_with(WORKSPACE_MIME_PREFIX))
    }

    /// Export format for Google Workspace documents, `None` for binary files
    /// and for Workspace kinds Drive cannot export
    pub fn export_format(&self) -> Option<ExportFormat> {
        if self.is_folder() {
            return None;
        }
        self.mime_type.as_deref().and_then(ExportFormat::for_mime_type)
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Target format of a Workspace document export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    pub mime_type: &'static str,
    pub extension: &'static str,
}

impl ExportFormat {
    /// Format a Workspace type is exported as; `None` when Drive offers no
    /// export for it (forms, sites, shortcuts, folders, unknown kinds)
    pub fn for_mime_type(mime_type: &str) -> Option<Self> {
        let kind = mime_type.strip_prefix(WORKSPACE_MIME_PREFIX)?;
        let (mime_type, extension) = match kind {
            "document" => (
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "docx",
            ),
            "spreadsheet" => (
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                "xlsx",
            ),
            "presentation" => (
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                "pptx",
            ),
            "drawing" => ("image/png", "png"),
            "jam" => ("application/pdf", "pdf"),
            _ => return None,
        };
        Some(Self {
            mime_type,
            extension,
        })
    }
}

/// Google Drive API files.list response
///
/// See: https://developers.google.com/drive/api/v3/reference/files/list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesListResponse {
    #[serde(default)]
    pub files: Vec<DriveFile>,

    /// Token for next page
    pub next_page_token: Option<String>,

    #[serde(default)]
    pub incomplete_search: bool,
}

/// Google Drive API about.get response (`fields=user`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AboutResponse {
    pub user: Option<DriveUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveUser {
    pub email_address: Option<String>,
    pub display_name: Option<String>,
    pub permission_id: Option<String>,
}

impl AboutResponse {
    /// Display identity: e-mail, then display name, then permission id
    pub fn username(self) -> String {
        self.user
            .and_then(|u| u.email_address.or(u.display_name).or(u.permission_id))
            .unwrap_or_default()
    }
}
