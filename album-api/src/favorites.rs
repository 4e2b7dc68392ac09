use serde_json::json;

use crate::client::ApiClient;
use crate::envelope::Page;
use crate::error::ApiError;
use crate::models::{FavoriteFolder, Photo};

impl ApiClient {
    /// Folders of the given member, default folder first.
    pub async fn favorite_folders(&self, member_id: i64) -> Result<Vec<FavoriteFolder>, ApiError> {
        let query = [("member_id", member_id.to_string())];
        self.get("/favorite/folders", &query).await?.into_data()
    }

    pub async fn create_favorite_folder(&self, folder_name: &str) -> Result<(), ApiError> {
        let body = json!({ "folder_name": folder_name });
        self.post_json("/favorite/folders", &body).await?.into_ok()
    }

    pub async fn rename_favorite_folder(
        &self,
        folder_id: i64,
        folder_name: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/favorite/folders/{}", folder_id);
        let body = json!({ "folder_name": folder_name });
        self.put_json(&path, &body).await?.into_ok()
    }

    /// The default folder cannot be deleted; the backend enforces this.
    pub async fn delete_favorite_folder(&self, folder_id: i64) -> Result<(), ApiError> {
        let path = format!("/favorite/folders/{}", folder_id);
        self.delete_json(&path, &json!({})).await?.into_ok()
    }

    /// One page of the photos collected in a folder.
    pub async fn favorite_photos(
        &self,
        folder_id: i64,
        member_id: i64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Photo>, ApiError> {
        let path = format!("/favorite/photos/{}", folder_id);
        let query = [
            ("member_id", member_id.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        self.get(&path, &query).await?.into_page()
    }

    /// Idempotence lives server side: an "already favorited" conflict comes
    /// back as a business error, not checked here.
    pub async fn add_favorite(
        &self,
        photo_id: i64,
        folder_id: i64,
        member_id: i64,
    ) -> Result<(), ApiError> {
        let body = json!({
            "photo_id": photo_id,
            "folder_id": folder_id,
            "member_id": member_id,
        });
        self.post_json("/favorite/photos", &body).await?.into_ok()
    }

    pub async fn remove_favorite(&self, photo_id: i64, folder_id: i64) -> Result<(), ApiError> {
        let body = json!({ "photo_id": photo_id, "folder_id": folder_id });
        self.delete_json("/favorite/photos", &body).await?.into_ok()
    }
}
