use album_api::{ApiClient, Page, Photo, PhotoFilter};

use crate::error::AppError;

/// Fixed page size of the photo grid.
pub const PAGE_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    Normal,
    Search,
}

/// Phase of the current page-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// What the view layer must fetch on the controller's behalf. Carries the
/// generation tag that [`PhotoListing::apply`] checks before applying the
/// result, so a slow response for an abandoned page is discarded instead of
/// clobbering newer data.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchQuery {
    pub generation: u64,
    pub album_id: i64,
    pub page: u32,
    pub page_size: u32,
    pub mode: ListingMode,
    pub filter: PhotoFilter,
}

/// Paginated, optionally filtered photo collection for one album.
///
/// Pure state machine: it never performs requests itself. The owning view
/// asks for a [`FetchQuery`], runs the matching API call, and feeds the
/// result back through [`PhotoListing::apply`]. Each page fetch fully
/// replaces the visible set; pages are never accumulated.
pub struct PhotoListing {
    album_id: i64,
    phase: FetchPhase,
    mode: ListingMode,
    filter: PhotoFilter,
    page: u32,
    total: i64,
    photos: Vec<Photo>,
    /// Normal-mode results parked while in search mode. Valid only until
    /// the next mutation; lets the first toggle back skip a re-fetch.
    normal_slot: Option<(Vec<Photo>, i64, u32)>,
    generation: u64,
}

impl PhotoListing {
    pub fn new(album_id: i64) -> Self {
        Self {
            album_id,
            phase: FetchPhase::Idle,
            mode: ListingMode::Normal,
            filter: PhotoFilter::default(),
            page: 1,
            total: 0,
            photos: Vec::new(),
            normal_slot: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn mode(&self) -> ListingMode {
        self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn page_count(&self) -> u32 {
        if self.total <= 0 {
            0
        } else {
            ((self.total as u64 + PAGE_SIZE as u64 - 1) / PAGE_SIZE as u64) as u32
        }
    }

    fn next_query(&mut self, page: u32) -> FetchQuery {
        self.generation += 1;
        self.phase = FetchPhase::Loading;
        self.page = page;
        FetchQuery {
            generation: self.generation,
            album_id: self.album_id,
            page,
            page_size: PAGE_SIZE,
            mode: self.mode,
            filter: self.filter.clone(),
        }
    }

    /// Request a page fetch. Returns `None` while a fetch is outstanding:
    /// rapid page clicks are dropped, not queued.
    pub fn begin_fetch(&mut self, page: u32) -> Option<FetchQuery> {
        if self.phase == FetchPhase::Loading {
            log::debug!("Page fetch dropped, one already in flight");
            return None;
        }
        Some(self.next_query(page))
    }

    /// Apply a finished fetch. Stale generations are discarded silently.
    pub fn apply(&mut self, query: &FetchQuery, result: Result<Page<Photo>, AppError>) {
        if query.generation != self.generation {
            log::debug!(
                "Discarding stale page result (generation {} < {})",
                query.generation,
                self.generation
            );
            return;
        }
        match result {
            Ok(page) => {
                self.photos = page.items;
                self.total = page.total;
                self.phase = FetchPhase::Loaded;
            }
            Err(e) => {
                log::error!("Photo listing fetch failed: {}", e);
                self.phase = FetchPhase::Error;
            }
        }
    }

    /// Switch to search mode with the given filter set, from page 1. The
    /// current Normal results are parked for a free toggle back.
    pub fn enter_search(&mut self, filter: PhotoFilter) -> Option<FetchQuery> {
        if self.phase == FetchPhase::Loading {
            return None;
        }
        if self.mode == ListingMode::Normal {
            self.normal_slot = Some((std::mem::take(&mut self.photos), self.total, self.page));
        }
        self.mode = ListingMode::Search;
        self.filter = filter;
        Some(self.next_query(1))
    }

    /// Back to Normal mode. Restores the parked results when still valid,
    /// otherwise re-fetches page 1.
    pub fn exit_search(&mut self) -> Option<FetchQuery> {
        if self.phase == FetchPhase::Loading {
            return None;
        }
        self.mode = ListingMode::Normal;
        self.filter = PhotoFilter::default();
        if let Some((photos, total, page)) = self.normal_slot.take() {
            self.photos = photos;
            self.total = total;
            self.page = page;
            self.phase = FetchPhase::Loaded;
            return None;
        }
        Some(self.next_query(1))
    }

    /// After any mutation (delete, favorite, upload): the parked slot is no
    /// longer trustworthy and the cursor resets to page 1 in the current
    /// mode. Mutations re-fetch even while a read is in flight; the
    /// generation bump invalidates the stale read.
    pub fn note_mutation(&mut self) -> FetchQuery {
        self.normal_slot = None;
        self.next_query(1)
    }
}

/// Run a fetch ticket against the API. The caller feeds the result back
/// through [`PhotoListing::apply`] together with the same ticket.
pub async fn run_query(client: &ApiClient, query: &FetchQuery) -> Result<Page<Photo>, AppError> {
    let result = match query.mode {
        ListingMode::Normal => {
            client
                .album_photos(query.album_id, query.page, query.page_size)
                .await
        }
        ListingMode::Search => {
            client
                .search_photos(query.album_id, &query.filter, query.page, query.page_size)
                .await
        }
    };
    result.map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: i64) -> Photo {
        Photo {
            id,
            photo_name: format!("photo-{}", id),
            file_path: format!("1/photo-{}.png", id),
            album_id: 1,
            member_id: None,
            operator_id: None,
            member_name: None,
            operator_name: None,
            shoot_time: None,
            upload_time: None,
            remarks: None,
            favorite_folder_id: None,
            album_name: None,
        }
    }

    fn page(ids: std::ops::Range<i64>, total: i64) -> Result<Page<Photo>, AppError> {
        Ok(Page {
            items: ids.map(photo).collect(),
            total,
        })
    }

    #[test]
    fn test_second_fetch_while_loading_is_dropped() {
        let mut listing = PhotoListing::new(1);
        let query = listing.begin_fetch(1).unwrap();
        assert!(listing.begin_fetch(2).is_none());
        listing.apply(&query, page(0..12, 13));
        assert!(listing.begin_fetch(2).is_some());
    }

    #[test]
    fn test_thirteen_photos_two_pages() {
        let mut listing = PhotoListing::new(1);
        let q1 = listing.begin_fetch(1).unwrap();
        listing.apply(&q1, page(0..12, 13));
        assert_eq!(listing.photos().len(), 12);
        assert_eq!(listing.total(), 13);
        assert_eq!(listing.page_count(), 2);

        let q2 = listing.begin_fetch(2).unwrap();
        assert_eq!(q2.page, 2);
        listing.apply(&q2, page(12..13, 13));
        assert_eq!(listing.photos().len(), 1);
        assert_eq!(listing.page(), 2);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut listing = PhotoListing::new(1);
        let q1 = listing.begin_fetch(1).unwrap();
        listing.apply(&q1, page(0..12, 24));

        let q2 = listing.begin_fetch(2).unwrap();
        // A mutation supersedes the page-2 fetch before it lands.
        let q3 = listing.note_mutation();
        assert_eq!(q3.page, 1);

        // Page-2 result arrives late: discarded.
        listing.apply(&q2, page(12..24, 24));
        assert_eq!(listing.photos()[0].id, 0);

        // The superseding fetch applies normally.
        listing.apply(&q3, page(0..12, 23));
        assert_eq!(listing.total(), 23);
        assert_eq!(listing.page(), 1);
    }

    #[test]
    fn test_mutation_resets_to_page_one_in_current_mode() {
        let mut listing = PhotoListing::new(1);
        let q = listing.begin_fetch(1).unwrap();
        listing.apply(&q, page(0..12, 30));

        let filter = PhotoFilter {
            name_like: Some("birthday".to_string()),
            ..Default::default()
        };
        let q = listing.enter_search(filter.clone()).unwrap();
        listing.apply(&q, page(0..5, 5));

        let q = listing.note_mutation();
        assert_eq!(q.page, 1);
        assert_eq!(q.mode, ListingMode::Search);
        assert_eq!(q.filter, filter);
    }

    #[test]
    fn test_first_search_toggle_back_is_free_until_mutation() {
        let mut listing = PhotoListing::new(1);
        let q = listing.begin_fetch(1).unwrap();
        listing.apply(&q, page(0..12, 30));

        let q = listing
            .enter_search(PhotoFilter {
                name_like: Some("x".to_string()),
                ..Default::default()
            })
            .unwrap();
        listing.apply(&q, page(20..22, 2));
        assert_eq!(listing.photos().len(), 2);

        // First toggle back restores the parked page without a fetch.
        assert!(listing.exit_search().is_none());
        assert_eq!(listing.mode(), ListingMode::Normal);
        assert_eq!(listing.photos().len(), 12);
        assert_eq!(listing.total(), 30);

        // After a mutation the slot is gone; toggling needs a fetch.
        let q = listing.enter_search(PhotoFilter::default()).unwrap();
        listing.apply(&q, page(0..1, 1));
        let q = listing.note_mutation();
        listing.apply(&q, page(0..1, 1));
        assert!(listing.exit_search().is_some());
    }

    #[test]
    fn test_empty_search_is_loaded_not_error() {
        let mut listing = PhotoListing::new(1);
        let q = listing
            .enter_search(PhotoFilter {
                name_like: Some("生日".to_string()),
                ..Default::default()
            })
            .unwrap();
        listing.apply(&q, page(0..0, 0));
        assert_eq!(listing.phase(), FetchPhase::Loaded);
        assert_eq!(listing.total(), 0);
        assert!(listing.photos().is_empty());
    }

    #[test]
    fn test_fetch_error_keeps_previous_photos() {
        let mut listing = PhotoListing::new(1);
        let q = listing.begin_fetch(1).unwrap();
        listing.apply(&q, page(0..12, 12));

        let q = listing.begin_fetch(1).unwrap();
        listing.apply(
            &q,
            Err(AppError::Api(album_api::ApiError::Transport(
                "timeout".to_string(),
            ))),
        );
        assert_eq!(listing.phase(), FetchPhase::Error);
        assert_eq!(listing.photos().len(), 12);
    }
}
