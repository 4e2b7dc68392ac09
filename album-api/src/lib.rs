//! # Album API
//!
//! Typed REST client for the family photo album backend.
//!
//! The backend wraps every response in a `{ code, msg, data, total? }`
//! envelope; this crate decodes that into a tagged result so callers match
//! on success, business errors and session expiry instead of duck-typing
//! fields. The bearer token for the active session is held by [`ApiClient`]
//! and injected into every request (header for API calls, query parameter
//! for image URLs).
//!
//! No UI dependencies; the application crate owns all view state.

pub mod albums;
pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod favorites;
pub mod models;
pub mod photos;

pub use albums::FilePart;
pub use auth::hash_password;
pub use client::{ApiClient, ApiConfig};
pub use envelope::{Envelope, Page};
pub use error::ApiError;
pub use models::{Album, FavoriteFolder, LoginData, Member, Photo, SessionMember};
pub use photos::{PhotoFilter, PhotoUploadMeta};
