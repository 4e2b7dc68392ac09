use serde::{Deserialize, Serialize};

/// A named collection of photos with a cover image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub id: i64,
    pub album_name: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub last_upload_time: Option<String>,
    #[serde(default)]
    pub last_upload_user_name: Option<String>,
}

/// A family member (read-only lookup list).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The member behind the current session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginData {
    pub token: String,
    pub member: SessionMember,
}

/// A photo row as returned by listing and search endpoints.
///
/// `member_name`/`operator_name`/`album_name` are joined in by the backend
/// and only present on the endpoints that provide them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: i64,
    pub photo_name: String,
    pub file_path: String,
    pub album_id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub operator_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub shoot_time: Option<String>,
    #[serde(default)]
    pub upload_time: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// At most one folder per viewing member; display annotation only.
    #[serde(default)]
    pub favorite_folder_id: Option<i64>,
    #[serde(default)]
    pub album_name: Option<String>,
}

/// A per-member favorite folder; exactly one default folder per member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteFolder {
    pub id: i64,
    pub folder_name: String,
    #[serde(default)]
    pub is_default: i64,
    #[serde(default)]
    pub create_time: Option<String>,
}

impl FavoriteFolder {
    /// The backend stores the flag as 0/1.
    pub fn is_default_folder(&self) -> bool {
        self.is_default == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_decodes_with_sparse_fields() {
        let photo: Photo = serde_json::from_str(
            r#"{"id":7,"photo_name":"birthday.png","file_path":"3/birthday.png","album_id":3}"#,
        )
        .unwrap();
        assert_eq!(photo.id, 7);
        assert!(photo.favorite_folder_id.is_none());
        assert!(photo.shoot_time.is_none());
    }

    #[test]
    fn test_folder_default_flag() {
        let folder: FavoriteFolder = serde_json::from_str(
            r#"{"id":1,"folder_name":"My favorites","is_default":1}"#,
        )
        .unwrap();
        assert!(folder.is_default_folder());
    }
}
