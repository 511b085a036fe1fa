//! Graph API response types
//!
//! Every field is optional: the Graph API omits fields the token's
//! permissions do not cover, and album and photo entries share one shape.

use serde::Deserialize;

use core_provider::ImageVariant;

/// An album (folder) or photo (file) entry
///
/// Albums carry `cover_photo` and `type`; photos carry `images`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacebookItem {
    #[serde(default)]
    pub id: String,

    pub name: Option<String>,

    /// Graph timestamp, e.g. `2020-05-17T10:30:00+0000`
    pub created_time: Option<String>,

    pub cover_photo: Option<CoverPhoto>,

    /// Album type (`profile`, `mobile`, `normal`, ...)
    #[serde(rename = "type")]
    pub album_type: Option<String>,

    pub icon: Option<String>,

    /// Renditions of a photo, in no particular order
    pub images: Option<Vec<FacebookImage>>,

    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoverPhoto {
    pub id: Option<String>,
}

/// One rendition of a photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FacebookImage {
    pub source: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageVariant for FacebookImage {
    fn width(&self) -> Option<u32> {
        self.width
    }

    fn height(&self) -> Option<u32> {
        self.height
    }
}

/// Envelope of `me/albums` and `{album}/photos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacebookPage {
    #[serde(default)]
    pub data: Vec<FacebookItem>,

    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    pub cursors: Option<PagingCursors>,

    /// Present only when another page exists
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagingCursors {
    pub before: Option<String>,
    pub after: Option<String>,
}

/// `me?fields=email,name`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Me {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Me {
    /// Display identity: e-mail, then name, then user id
    pub fn username(self) -> String {
        self.email
            .or(self.name)
            .or(self.id)
            .unwrap_or_default()
    }
}

/// `{photo}?fields=images`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoImages {
    #[serde(default)]
    pub images: Vec<FacebookImage>,
}

/// `DELETE me/permissions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevokeResponse {
    #[serde(default)]
    pub success: bool,
}
