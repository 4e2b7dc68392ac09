use std::time::{Duration, SystemTime};

use album_api::{FilePart, PhotoUploadMeta};
use chrono::{DateTime, Local, NaiveDate};

use crate::capture::CapturedImage;
use crate::error::AppError;

/// Extensions the backend accepts.
pub const PHOTO_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Ceiling for picker uploads. Camera captures have none, they are
/// PNG-encoded frames and far below it anyway.
pub const MAX_PHOTO_BYTES: u64 = 16 * 1024 * 1024;

/// Ceiling for album cover images.
pub const MAX_COVER_BYTES: u64 = 10 * 1024 * 1024;

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// MIME type for a known image extension.
pub fn mime_for(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Pre-flight check for picked files: extension allow-list and size
/// ceiling, both enforced before any network contact.
pub fn check_image_file(file_name: &str, size: u64, max_bytes: u64) -> Result<(), AppError> {
    let ext = extension(file_name).unwrap_or_default();
    if !PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::InvalidFormat(
            "Only png/jpg/jpeg/gif/bmp photos are supported.".to_string(),
        ));
    }
    if size >= max_bytes {
        return Err(AppError::TooLarge(format!(
            "Photos must be smaller than {} MB.",
            max_bytes / 1024 / 1024
        )));
    }
    Ok(())
}

/// Millisecond file timestamp as reported by pickers; zero means the
/// platform did not provide one.
pub fn modified_from_millis(millis: u64) -> Option<SystemTime> {
    (millis > 0).then(|| SystemTime::UNIX_EPOCH + Duration::from_millis(millis))
}

/// Shoot time sent with an upload: the user's value if present, else the
/// file's modification time, else empty (backend stores NULL).
pub fn derive_shoot_time(user_date: Option<NaiveDate>, modified: Option<SystemTime>) -> String {
    if let Some(date) = user_date {
        return format!("{} 00:00:00", date.format("%Y-%m-%d"));
    }
    if let Some(time) = modified {
        let local: DateTime<Local> = time.into();
        return local.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    String::new()
}

/// Inputs of a picker upload, before validation.
#[derive(Debug, Clone, Default)]
pub struct FileUploadForm {
    pub photo_name: Option<String>,
    pub shoot_date: Option<NaiveDate>,
    pub member_id: Option<i64>,
    pub remarks: Option<String>,
}

/// Builds validated upload submissions and guards against concurrent
/// re-submits. One coordinator per upload surface.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    uploading: bool,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    fn begin(&mut self) -> Result<(), AppError> {
        if self.uploading {
            return Err(AppError::Validation(
                "an upload is already in progress".to_string(),
            ));
        }
        self.uploading = true;
        Ok(())
    }

    /// Call when the submission resolved, success or not.
    pub fn finish(&mut self) {
        self.uploading = false;
    }

    /// Package a captured still for upload. The owning member is mandatory;
    /// without it (or an album) this fails before any network call.
    pub fn submit_captured(
        &mut self,
        image: &CapturedImage,
        album_id: Option<i64>,
        member_id: Option<i64>,
    ) -> Result<(FilePart, PhotoUploadMeta), AppError> {
        let album_id = album_id.ok_or_else(|| {
            AppError::Validation("Please select an album first.".to_string())
        })?;
        let member_id = member_id.ok_or_else(|| {
            AppError::Validation("Please select the owning member.".to_string())
        })?;
        self.begin()?;

        let part = FilePart {
            bytes: image.bytes.clone(),
            file_name: image.file_name.clone(),
            mime: "image/png".to_string(),
        };
        let meta = PhotoUploadMeta {
            album_id,
            member_id,
            photo_name: Some(image.file_name.clone()),
            shoot_time: Some(derive_shoot_time(None, Some(SystemTime::now()))),
            remarks: None,
        };
        Ok((part, meta))
    }

    /// Package a picked file for upload, with pre-flight format and size
    /// checks and shoot-time derivation.
    pub fn submit_file(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
        modified: Option<SystemTime>,
        album_id: i64,
        form: &FileUploadForm,
    ) -> Result<(FilePart, PhotoUploadMeta), AppError> {
        let member_id = form.member_id.ok_or_else(|| {
            AppError::Validation("Please select the owning member.".to_string())
        })?;
        check_image_file(file_name, bytes.len() as u64, MAX_PHOTO_BYTES)?;
        self.begin()?;

        let part = FilePart {
            mime: mime_for(file_name).to_string(),
            file_name: file_name.to_string(),
            bytes,
        };
        let meta = PhotoUploadMeta {
            album_id,
            member_id,
            photo_name: form
                .photo_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .or_else(|| Some(file_name.to_string())),
            shoot_time: Some(derive_shoot_time(form.shoot_date, modified)),
            remarks: form.remarks.clone(),
        };
        Ok((part, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn captured() -> CapturedImage {
        CapturedImage {
            bytes: vec![1, 2, 3],
            data_url: "data:image/png;base64,AQID".to_string(),
            file_name: "capture_1700000000000.png".to_string(),
        }
    }

    #[test]
    fn test_missing_member_blocks_before_network() {
        let mut coordinator = UploadCoordinator::new();
        let err = coordinator
            .submit_captured(&captured(), Some(1), None)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // The guard was never taken, a corrected submit goes through.
        assert!(!coordinator.is_uploading());
        assert!(coordinator
            .submit_captured(&captured(), Some(1), Some(2))
            .is_ok());
    }

    #[test]
    fn test_missing_album_blocks() {
        let mut coordinator = UploadCoordinator::new();
        assert!(matches!(
            coordinator.submit_captured(&captured(), None, Some(2)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_no_concurrent_submission() {
        let mut coordinator = UploadCoordinator::new();
        coordinator
            .submit_captured(&captured(), Some(1), Some(2))
            .unwrap();
        assert!(coordinator.is_uploading());
        assert!(matches!(
            coordinator.submit_captured(&captured(), Some(1), Some(2)),
            Err(AppError::Validation(_))
        ));

        coordinator.finish();
        assert!(coordinator
            .submit_captured(&captured(), Some(1), Some(2))
            .is_ok());
    }

    #[test]
    fn test_extension_allow_list() {
        assert!(check_image_file("photo.JPG", 1024, MAX_PHOTO_BYTES).is_ok());
        assert!(check_image_file("photo.jpeg", 1024, MAX_PHOTO_BYTES).is_ok());
        assert!(matches!(
            check_image_file("notes.txt", 1024, MAX_PHOTO_BYTES),
            Err(AppError::InvalidFormat(_))
        ));
        assert!(matches!(
            check_image_file("no_extension", 1024, MAX_PHOTO_BYTES),
            Err(AppError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_size_ceiling() {
        assert!(check_image_file("big.png", MAX_PHOTO_BYTES - 1, MAX_PHOTO_BYTES).is_ok());
        assert!(matches!(
            check_image_file("big.png", MAX_PHOTO_BYTES, MAX_PHOTO_BYTES),
            Err(AppError::TooLarge(_))
        ));
    }

    #[test]
    fn test_shoot_time_prefers_user_value() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let shoot = derive_shoot_time(date, Some(SystemTime::now()));
        assert_eq!(shoot, "2024-06-01 00:00:00");
    }

    #[test]
    fn test_shoot_time_falls_back_to_mtime_then_empty() {
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let shoot = derive_shoot_time(None, Some(mtime));
        assert_eq!(shoot.len(), "2023-11-14 22:13:20".len());

        assert_eq!(derive_shoot_time(None, None), "");
    }

    #[test]
    fn test_modified_from_millis_skips_zero() {
        assert_eq!(modified_from_millis(0), None);
        let mtime = modified_from_millis(1_700_000_000_000).unwrap();
        assert_eq!(
            mtime,
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
        );
    }

    #[test]
    fn test_file_upload_uses_mtime_when_date_blank() {
        let mut coordinator = UploadCoordinator::new();
        let form = FileUploadForm {
            member_id: Some(4),
            ..Default::default()
        };
        let mtime = modified_from_millis(1_700_000_000_000);
        let (_, meta) = coordinator
            .submit_file("walk.jpg", vec![0u8; 10], mtime, 7, &form)
            .unwrap();
        assert!(!meta.shoot_time.as_deref().unwrap_or_default().is_empty());
    }

    #[test]
    fn test_file_upload_defaults_photo_name() {
        let mut coordinator = UploadCoordinator::new();
        let form = FileUploadForm {
            member_id: Some(4),
            photo_name: Some("   ".to_string()),
            ..Default::default()
        };
        let (part, meta) = coordinator
            .submit_file("walk.jpg", vec![0u8; 10], None, 7, &form)
            .unwrap();
        assert_eq!(part.mime, "image/jpeg");
        assert_eq!(meta.photo_name.as_deref(), Some("walk.jpg"));
        assert_eq!(meta.album_id, 7);
    }
}
