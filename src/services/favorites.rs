use album_api::{FavoriteFolder, Photo};

/// Shown when a photo references a folder the local list does not know.
/// A miss is not an error and triggers no re-fetch.
pub const UNKNOWN_FOLDER: &str = "Unknown folder";

/// Display annotation for a photo card: the name of the folder the photo
/// sits in, resolved against the caller's loaded folder list.
pub fn folder_annotation(photo: &Photo, folders: &[FavoriteFolder]) -> Option<String> {
    let folder_id = photo.favorite_folder_id?;
    Some(
        folders
            .iter()
            .find(|f| f.id == folder_id)
            .map(|f| f.folder_name.clone())
            .unwrap_or_else(|| UNKNOWN_FOLDER.to_string()),
    )
}

/// Initial folder selection: the default folder, else the first one.
pub fn pick_active_folder(folders: &[FavoriteFolder]) -> Option<i64> {
    folders
        .iter()
        .find(|f| f.is_default_folder())
        .or_else(|| folders.first())
        .map(|f| f.id)
}

/// Active-folder id after deleting `deleted_id`: unchanged when some other
/// folder was active, otherwise the first remaining folder or none.
pub fn next_active_folder(
    folders: &[FavoriteFolder],
    active: Option<i64>,
    deleted_id: i64,
) -> Option<i64> {
    match active {
        Some(id) if id != deleted_id => Some(id),
        _ => folders.iter().find(|f| f.id != deleted_id).map(|f| f.id),
    }
}

/// Fetch ticket for one page of a favorite folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderQuery {
    pub generation: u64,
    pub folder_id: i64,
    pub page: u32,
}

/// Orders folder photo fetches. Each issued ticket supersedes the ones
/// before it; a finished fetch only applies while its ticket is still the
/// newest, so a slow response never overwrites a later selection.
#[derive(Debug, Default)]
pub struct FolderPager {
    generation: u64,
}

impl FolderPager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, folder_id: i64, page: u32) -> FolderQuery {
        self.generation += 1;
        FolderQuery {
            generation: self.generation,
            folder_id,
            page,
        }
    }

    pub fn is_current(&self, query: &FolderQuery) -> bool {
        query.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: i64, name: &str, is_default: i64) -> FavoriteFolder {
        FavoriteFolder {
            id,
            folder_name: name.to_string(),
            is_default,
            create_time: None,
        }
    }

    fn favorited_photo(folder_id: Option<i64>) -> Photo {
        Photo {
            id: 1,
            photo_name: "p".to_string(),
            file_path: "1/p.png".to_string(),
            album_id: 1,
            member_id: None,
            operator_id: None,
            member_name: None,
            operator_name: None,
            shoot_time: None,
            upload_time: None,
            remarks: None,
            favorite_folder_id: folder_id,
            album_name: None,
        }
    }

    #[test]
    fn test_annotation_resolves_name_or_sentinel() {
        let folders = vec![folder(1, "My favorites", 1), folder(2, "Trips", 0)];
        assert_eq!(
            folder_annotation(&favorited_photo(Some(2)), &folders),
            Some("Trips".to_string())
        );
        assert_eq!(
            folder_annotation(&favorited_photo(Some(99)), &folders),
            Some(UNKNOWN_FOLDER.to_string())
        );
        assert_eq!(folder_annotation(&favorited_photo(None), &folders), None);
    }

    #[test]
    fn test_pick_active_prefers_default() {
        let folders = vec![folder(5, "Trips", 0), folder(6, "My favorites", 1)];
        assert_eq!(pick_active_folder(&folders), Some(6));
        assert_eq!(pick_active_folder(&[folder(5, "Trips", 0)]), Some(5));
        assert_eq!(pick_active_folder(&[]), None);
    }

    #[test]
    fn test_pager_drops_superseded_folder_fetch() {
        let mut pager = FolderPager::new();
        // Folder A is selected, then folder B before A's response lands.
        let first = pager.begin(1, 1);
        let second = pager.begin(2, 1);
        assert!(!pager.is_current(&first));
        assert!(pager.is_current(&second));
    }

    #[test]
    fn test_pager_only_newest_page_applies() {
        let mut pager = FolderPager::new();
        let page_one = pager.begin(7, 1);
        assert!(pager.is_current(&page_one));
        let page_two = pager.begin(7, 2);
        assert!(!pager.is_current(&page_one));
        assert_eq!(page_two.page, 2);
        assert!(pager.is_current(&page_two));
    }

    #[test]
    fn test_next_active_after_delete() {
        let folders = vec![folder(1, "a", 1), folder(2, "b", 0), folder(3, "c", 0)];
        // Deleting an inactive folder keeps the selection.
        assert_eq!(next_active_folder(&folders, Some(1), 2), Some(1));
        // Deleting the active folder falls over to the first remaining one.
        assert_eq!(next_active_folder(&folders, Some(2), 2), Some(1));
        // No folders left.
        assert_eq!(next_active_folder(&[folder(4, "d", 0)], Some(4), 4), None);
    }
}
