mod album_detail;
mod album_list;
mod create_album;
mod favorite_confirm;
mod favorite_manager;
mod filter_popwin;
mod login;
mod photo_capture;
mod upload_form;

pub use album_detail::AlbumDetailScreen;
pub use album_list::AlbumListScreen;
pub use create_album::CreateAlbumScreen;
pub use favorite_confirm::FavoriteConfirm;
pub use favorite_manager::FavoriteManagerScreen;
pub use filter_popwin::FilterPopwin;
pub use login::LoginScreen;
pub use photo_capture::PhotoCaptureModal;
pub use upload_form::UploadForm;

use dioxus::prelude::*;

use crate::error::AppError;
use crate::session::Session;
use crate::Screen;

/// Shared error surfacing: a 401 tears the session down and bounces the
/// user to the login screen, everything else lands in the banner signal.
pub(crate) fn surface_error(
    err: &AppError,
    mut session: Signal<Session>,
    on_navigate: EventHandler<Screen>,
    mut error: Signal<Option<String>>,
) {
    if err.is_session_expired() {
        log::warn!("session expired, forcing logout: {}", err);
        session.write().teardown();
        on_navigate.call(Screen::Login);
    } else {
        error.set(Some(err.user_message()));
    }
}
