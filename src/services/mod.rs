pub mod favorites;
pub mod listing;
pub mod upload;

pub use listing::{FetchPhase, FetchQuery, ListingMode, PhotoListing, PAGE_SIZE};
pub use upload::UploadCoordinator;
