use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::Album;

/// An in-memory file to be sent as a multipart part.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

impl FilePart {
    pub(crate) fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::Transport(format!("Invalid mime type: {}", e)))
    }
}

impl ApiClient {
    pub async fn albums(&self) -> Result<Vec<Album>, ApiError> {
        self.get("/albums", &[]).await?.into_data()
    }

    /// Create an album with an optional cover image.
    pub async fn create_album(
        &self,
        name: &str,
        cover: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let mut form = Form::new().text("name", name.to_string());
        if let Some(cover) = cover {
            form = form.part("cover", cover.into_part()?);
        }
        self.post_multipart("/album/create", form).await?.into_ok()
    }

    pub async fn rename_album(&self, album_id: i64, new_name: &str) -> Result<(), ApiError> {
        let body = json!({ "album_id": album_id, "new_name": new_name });
        self.post_json("/album/rename", &body).await?.into_ok()
    }

    /// Deletes the album; the backend cascades to the contained photos.
    pub async fn delete_album(&self, album_id: i64) -> Result<(), ApiError> {
        let body = json!({ "album_id": album_id });
        self.post_json("/album/delete", &body).await?.into_ok()
    }

    /// Replace an album cover; returns the new cover file name.
    pub async fn upload_album_cover(
        &self,
        album_id: i64,
        file: FilePart,
    ) -> Result<String, ApiError> {
        let form = Form::new()
            .text("album_id", album_id.to_string())
            .part("file", file.into_part()?);
        #[derive(serde::Deserialize)]
        struct CoverData {
            cover_url: String,
        }
        let data: CoverData = self
            .post_multipart("/album/cover/upload", form)
            .await?
            .into_data()?;
        Ok(data.cover_url)
    }
}
