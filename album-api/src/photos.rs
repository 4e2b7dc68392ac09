use chrono::NaiveDate;
use reqwest::multipart::Form;
use serde_json::json;

use crate::albums::FilePart;
use crate::client::ApiClient;
use crate::envelope::Page;
use crate::error::ApiError;
use crate::models::{Member, Photo};

/// Filter set for search-mode photo queries. All fields optional; empty
/// fields are simply left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoFilter {
    pub name_like: Option<String>,
    /// Owning member.
    pub member_id: Option<i64>,
    /// Uploader.
    pub operator_id: Option<i64>,
    /// Inclusive shoot-date range.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PhotoFilter {
    pub fn is_empty(&self) -> bool {
        self == &PhotoFilter::default()
    }

    fn query(&self, album_id: i64, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("album_id", album_id.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(name) = &self.name_like {
            if !name.is_empty() {
                query.push(("name_like", name.clone()));
            }
        }
        if let Some(id) = self.member_id {
            query.push(("member_id", id.to_string()));
        }
        if let Some(id) = self.operator_id {
            query.push(("operator_id", id.to_string()));
        }
        if let Some(date) = self.start_date {
            query.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            query.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
        query
    }
}

/// Metadata accompanying a photo upload. `member_id` (owning member) is
/// mandatory; the server derives the operator from the session token.
#[derive(Debug, Clone, Default)]
pub struct PhotoUploadMeta {
    pub album_id: i64,
    pub member_id: i64,
    pub photo_name: Option<String>,
    pub shoot_time: Option<String>,
    pub remarks: Option<String>,
}

impl ApiClient {
    pub async fn members(&self) -> Result<Vec<Member>, ApiError> {
        self.get("/members", &[]).await?.into_data()
    }

    /// One page of an album, newest upload first.
    pub async fn album_photos(
        &self,
        album_id: i64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Photo>, ApiError> {
        let path = format!("/photos/album/{}", album_id);
        let query = [
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        self.get(&path, &query).await?.into_page()
    }

    /// One page of an album under a filter set.
    pub async fn search_photos(
        &self,
        album_id: i64,
        filter: &PhotoFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Photo>, ApiError> {
        let query = filter.query(album_id, page, page_size);
        self.get("/photos/search", &query).await?.into_page()
    }

    /// Multipart photo upload. Pre-flight validation (owning member,
    /// extension, size) is the upload coordinator's job; this only ships
    /// what it is given.
    pub async fn upload_photo(
        &self,
        file: FilePart,
        meta: &PhotoUploadMeta,
    ) -> Result<(), ApiError> {
        let file_name = file.file_name.clone();
        let mut form = Form::new()
            .part("photo", file.into_part()?)
            .text("album_id", meta.album_id.to_string())
            .text("member_id", meta.member_id.to_string())
            .text(
                "photo_name",
                meta.photo_name.clone().unwrap_or(file_name),
            )
            .text("shoot_time", meta.shoot_time.clone().unwrap_or_default());
        if let Some(remarks) = &meta.remarks {
            form = form.text("remarks", remarks.clone());
        }
        self.post_multipart("/photos/upload", form).await?.into_ok()
    }

    pub async fn delete_photo(&self, photo_id: i64) -> Result<(), ApiError> {
        let body = json!({ "photo_id": photo_id });
        self.post_json("/photos/delete", &body).await?.into_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_skips_empty_fields() {
        let filter = PhotoFilter {
            name_like: Some(String::new()),
            member_id: Some(4),
            ..Default::default()
        };
        let query = filter.query(3, 1, 12);
        assert_eq!(
            query,
            vec![
                ("album_id", "3".to_string()),
                ("page", "1".to_string()),
                ("page_size", "12".to_string()),
                ("member_id", "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_query_formats_date_range() {
        let filter = PhotoFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
            ..Default::default()
        };
        let query = filter.query(1, 2, 12);
        assert!(query.contains(&("start_date", "2024-06-01".to_string())));
        assert!(query.contains(&("end_date", "2024-06-30".to_string())));
    }

    #[test]
    fn test_empty_filter() {
        assert!(PhotoFilter::default().is_empty());
        let filter = PhotoFilter {
            name_like: Some("birthday".to_string()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
