//! Image search result model.
//!
//! [`ImageItem`] mirrors one hit of the Pixabay search API and [`SearchPage`]
//! one page of the response. Field names follow the API's camelCase JSON via
//! serde renames; everything except the identifier and the two URLs defaults
//! when missing so a sparse upstream record still decodes.

use serde::Deserialize;

/// Number of hits requested per page.
///
/// Fixed by the controller; it is not a configuration option.
pub const PAGE_SIZE: u32 = 12;

/// One search hit returned by the image catalog.
///
/// The controller treats the record as opaque apart from the full-size URL it
/// hands to the preview overlay. The remaining fields only feed the gallery
/// and preview renderers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageItem {
    pub id: u64,

    /// Medium-sized rendition used for gallery thumbnails.
    #[serde(rename = "webformatURL")]
    pub web_format_url: String,

    /// Full-size rendition shown in the preview overlay.
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,

    /// Comma-separated tag list, e.g. `"cat, animal, pet"`.
    #[serde(default)]
    pub tags: String,

    /// Catalog page for the image.
    #[serde(rename = "pageURL", default)]
    pub page_url: String,

    #[serde(rename = "imageWidth", default)]
    pub image_width: u32,

    #[serde(rename = "imageHeight", default)]
    pub image_height: u32,

    /// Uploader's display name.
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub likes: u64,

    #[serde(default)]
    pub views: u64,
}

impl ImageItem {
    /// Creates an item with only the fields the controller relies on.
    ///
    /// # Examples
    ///
    /// ```
    /// use imagefinder::domain::ImageItem;
    ///
    /// let item = ImageItem::new(7, "https://cdn/thumb.jpg", "https://cdn/full.jpg");
    /// assert_eq!(item.large_image_url, "https://cdn/full.jpg");
    /// assert!(item.tags.is_empty());
    /// ```
    #[must_use]
    pub fn new(id: u64, web_format_url: impl Into<String>, large_image_url: impl Into<String>) -> Self {
        Self {
            id,
            web_format_url: web_format_url.into(),
            large_image_url: large_image_url.into(),
            tags: String::new(),
            page_url: String::new(),
            image_width: 0,
            image_height: 0,
            user: String::new(),
            likes: 0,
            views: 0,
        }
    }

    /// Returns the image dimensions as `WIDTHxHEIGHT`, or `"?"` when unknown.
    #[must_use]
    pub fn dimensions(&self) -> String {
        if self.image_width == 0 || self.image_height == 0 {
            "?".to_string()
        } else {
            format!("{}x{}", self.image_width, self.image_height)
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    /// Number of hits reachable through the API for this query.
    #[serde(rename = "totalHits")]
    pub total_hits: u64,

    /// Hits on the requested page, in catalog order.
    #[serde(default)]
    pub hits: Vec<ImageItem>,
}

impl SearchPage {
    /// Number of pages needed to reach every hit at [`PAGE_SIZE`] per page.
    ///
    /// Rounds up, so 30 hits make 3 pages and 0 hits make 0 pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use imagefinder::domain::SearchPage;
    ///
    /// let page = SearchPage { total_hits: 30, hits: vec![] };
    /// assert_eq!(page.total_pages(), 3);
    /// ```
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_hits.div_ceil(PAGE_SIZE as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pixabay_hit() {
        let json = r#"{
            "id": 195893,
            "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
            "type": "photo",
            "tags": "blossom, bloom, flower",
            "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
            "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
            "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
            "imageWidth": 4000,
            "imageHeight": 2250,
            "views": 7671,
            "downloads": 6439,
            "likes": 5,
            "comments": 2,
            "user_id": 48777,
            "user": "Josch13"
        }"#;

        let item: ImageItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 195_893);
        assert_eq!(item.tags, "blossom, bloom, flower");
        assert_eq!(item.large_image_url, "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg");
        assert_eq!(item.dimensions(), "4000x2250");
        assert_eq!(item.user, "Josch13");
    }

    #[test]
    fn sparse_hit_uses_defaults() {
        let json = r#"{"id": 1, "webformatURL": "a", "largeImageURL": "b"}"#;
        let item: ImageItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, ImageItem::new(1, "a", "b"));
        assert_eq!(item.dimensions(), "?");
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = |total_hits| SearchPage { total_hits, hits: vec![] };
        assert_eq!(page(0).total_pages(), 0);
        assert_eq!(page(1).total_pages(), 1);
        assert_eq!(page(12).total_pages(), 1);
        assert_eq!(page(13).total_pages(), 2);
        assert_eq!(page(30).total_pages(), 3);
        assert_eq!(page(500).total_pages(), 42);
    }
}
