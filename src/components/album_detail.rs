use crate::components::{surface_error, FavoriteConfirm, FilterPopwin, PhotoCaptureModal, UploadForm};
use crate::services::favorites::folder_annotation;
use crate::services::listing::{run_query, FetchPhase, FetchQuery, ListingMode, PhotoListing};
use crate::session::Session;
use crate::Screen;
use album_api::{FavoriteFolder, Member, Photo, PhotoFilter};
use dioxus::prelude::*;

#[component]
pub fn AlbumDetailScreen(album_id: i64, on_navigate: EventHandler<Screen>) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut listing = use_signal(move || PhotoListing::new(album_id));
    let mut album_name = use_signal(String::new);
    let mut members = use_signal(Vec::<Member>::new);
    let mut folders = use_signal(Vec::<FavoriteFolder>::new);
    let mut filter = use_signal(PhotoFilter::default);
    let mut error = use_signal(|| None::<String>);

    let mut show_filter = use_signal(|| false);
    let mut show_capture = use_signal(|| false);
    let mut show_upload = use_signal(|| false);
    let mut delete_target = use_signal(|| None::<(i64, String)>);
    let mut favorite_target = use_signal(|| None::<i64>);
    let mut busy = use_signal(|| false);

    // Runs a fetch ticket and feeds the tagged result back; a response for
    // a superseded ticket is dropped inside `apply`.
    let run_fetch = move |query: FetchQuery| {
        spawn(async move {
            let client = session.read().client();
            let result = run_query(&client, &query).await;
            match &result {
                Ok(_) => error.set(None),
                Err(err) => {
                    surface_error(err, session, on_navigate, error);
                    if err.is_session_expired() {
                        return;
                    }
                }
            }
            listing.with_mut(|l| l.apply(&query, result));
        });
    };

    let reload_folders = move || {
        let Some(member_id) = session.peek().member_id() else {
            return;
        };
        spawn(async move {
            let client = session.read().client();
            match client.favorite_folders(member_id).await {
                Ok(list) => folders.set(list),
                Err(err) => log::warn!("favorite folder load failed: {}", err),
            }
        });
    };

    use_effect(move || {
        if let Some(query) = listing.with_mut(|l| l.begin_fetch(1)) {
            run_fetch(query);
        }
        reload_folders();
        spawn(async move {
            let client = session.peek().client();
            match client.members().await {
                Ok(list) => members.set(list),
                Err(err) => log::warn!("member list load failed: {}", err),
            }
            match client.albums().await {
                Ok(list) => {
                    if let Some(album) = list.into_iter().find(|a| a.id == album_id) {
                        album_name.set(album.album_name);
                    }
                }
                Err(err) => log::warn!("album lookup failed: {}", err),
            }
        });
    });

    // Any successful mutation invalidates the current pages.
    let mut reload = move || {
        let query = listing.with_mut(|l| l.note_mutation());
        run_fetch(query);
    };

    let mut goto_page = move |page: u32| {
        if let Some(query) = listing.with_mut(|l| l.begin_fetch(page)) {
            run_fetch(query);
        }
    };

    let mut handle_delete = move || {
        let Some((photo_id, _)) = delete_target() else {
            return;
        };
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.delete_photo(photo_id).await {
                Ok(()) => {
                    delete_target.set(None);
                    reload();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let mut handle_favorite = move |folder_id: i64| {
        let Some(photo_id) = favorite_target() else {
            return;
        };
        let Some(member_id) = session.peek().member_id() else {
            return;
        };
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.add_favorite(photo_id, folder_id, member_id).await {
                Ok(()) => {
                    favorite_target.set(None);
                    reload();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let (phase, mode, page, pages, total) =
        listing.with(|l| (l.phase(), l.mode(), l.page(), l.page_count(), l.total()));
    let photos = listing.with(|l| l.photos().to_vec());
    let searching = mode == ListingMode::Search;
    let client = session.read().client();
    let folder_list = folders();

    rsx! {
        div { style: "padding: 16px; max-width: 1000px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; padding-top: 8px; flex-wrap: wrap; gap: 8px;",
                div { style: "display: flex; align-items: center; gap: 12px;",
                    button {
                        class: "btn-secondary",
                        style: "padding: 8px 16px;",
                        onclick: move |_| on_navigate.call(Screen::AlbumList),
                        "← Back"
                    }
                    h1 { style: "color: #0066cc; margin: 0; font-size: 24px; font-weight: 700;",
                        if album_name().is_empty() {
                            "Album"
                        } else {
                            "{album_name}"
                        }
                    }
                    if searching {
                        span { style: "background: #e3f2fd; color: #0066cc; padding: 4px 10px; border-radius: 12px; font-size: 12px;",
                            "filtered"
                        }
                    }
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        class: "btn-primary",
                        style: "padding: 10px 14px;",
                        onclick: move |_| show_capture.set(true),
                        "📷 Take photo"
                    }
                    button {
                        class: "btn-primary",
                        style: "padding: 10px 14px;",
                        onclick: move |_| show_upload.set(true),
                        "⬆️ Upload"
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 10px 14px;",
                        onclick: move |_| show_filter.set(true),
                        "🔍 Search"
                    }
                    if searching {
                        button {
                            class: "btn-secondary",
                            style: "padding: 10px 14px;",
                            onclick: move |_| {
                                filter.set(PhotoFilter::default());
                                if let Some(query) = listing.with_mut(|l| l.exit_search()) {
                                    run_fetch(query);
                                }
                            },
                            "✖ Clear search"
                        }
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 10px 14px;",
                        onclick: move |_| on_navigate.call(Screen::Favorites { from_album: Some(album_id) }),
                        "⭐ Favorites"
                    }
                }
            }

            if let Some(err) = error() {
                div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                    "⚠️ {err}"
                }
            }

            if phase == FetchPhase::Loading && photos.is_empty() {
                div { style: "text-align: center; padding: 40px; color: #999;", "⏳ Loading…" }
            } else if photos.is_empty() {
                div { style: "text-align: center; padding: 40px; color: #999;",
                    if searching {
                        "No photos match the search."
                    } else {
                        "This album is empty. Upload the first photo!"
                    }
                }
            } else {
                div { class: "photo-grid",
                    for photo in photos {
                        PhotoCard {
                            src: client.photo_url(&photo.file_path),
                            annotation: folder_annotation(&photo, &folder_list),
                            photo,
                            on_favorite: move |id| favorite_target.set(Some(id)),
                            on_delete: move |target: (i64, String)| delete_target.set(Some(target)),
                        }
                    }
                }

                div { class: "pagination",
                    button {
                        class: "btn-secondary",
                        disabled: page <= 1 || phase == FetchPhase::Loading,
                        onclick: move |_| goto_page(page - 1),
                        "← Prev"
                    }
                    span { style: "color: #666; font-size: 14px;",
                        "Page {page} / {pages} · {total} photos"
                    }
                    button {
                        class: "btn-secondary",
                        disabled: page >= pages || phase == FetchPhase::Loading,
                        onclick: move |_| goto_page(page + 1),
                        "Next →"
                    }
                }
            }

            if show_filter() {
                FilterPopwin {
                    members: members(),
                    initial: filter(),
                    on_search: move |f: PhotoFilter| {
                        show_filter.set(false);
                        filter.set(f.clone());
                        let query = if f.is_empty() {
                            listing.with_mut(|l| l.exit_search())
                        } else {
                            listing.with_mut(|l| l.enter_search(f))
                        };
                        if let Some(query) = query {
                            run_fetch(query);
                        }
                    },
                    on_close: move |_| show_filter.set(false),
                }
            }

            if favorite_target().is_some() {
                FavoriteConfirm {
                    folders: folder_list.clone(),
                    on_confirm: move |folder_id| handle_favorite(folder_id),
                    on_cancel: move |_| favorite_target.set(None),
                }
            }

            if let Some((_, name)) = delete_target() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px;", "Delete \"{name}\"?" }
                        p { style: "color: #666; font-size: 14px; margin: 0 0 20px 0;",
                            "The photo is removed from the album and from all favorite folders."
                        }
                        div { style: "display: flex; gap: 12px;",
                            button {
                                class: "btn-danger",
                                style: "flex: 1;",
                                disabled: busy(),
                                onclick: move |_| handle_delete(),
                                "Delete"
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                onclick: move |_| delete_target.set(None),
                                "Cancel"
                            }
                        }
                    }
                }
            }

            if show_capture() {
                PhotoCaptureModal {
                    album_id,
                    members: members(),
                    on_navigate,
                    on_uploaded: move |_| {
                        reload();
                        reload_folders();
                    },
                    on_close: move |_| show_capture.set(false),
                }
            }

            if show_upload() {
                UploadForm {
                    album_id,
                    members: members(),
                    on_navigate,
                    on_uploaded: move |_| reload(),
                    on_close: move |_| show_upload.set(false),
                }
            }
        }
    }
}

#[component]
fn PhotoCard(
    photo: Photo,
    src: String,
    annotation: Option<String>,
    on_favorite: EventHandler<i64>,
    on_delete: EventHandler<(i64, String)>,
) -> Element {
    let photo_id = photo.id;
    let delete_name = photo.photo_name.clone();

    rsx! {
        div { class: "photo-card",
            div { class: "photo-thumb",
                img {
                    src,
                    alt: photo.photo_name.clone(),
                    loading: "lazy",
                    style: "width: 100%; height: 100%; object-fit: cover;",
                }
                if let Some(folder) = annotation {
                    div { class: "photo-ribbon", "⭐ {folder}" }
                }
            }
            div { style: "padding: 10px;",
                div { style: "font-size: 14px; font-weight: 600; color: #333; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{photo.photo_name}"
                }
                div { style: "font-size: 12px; color: #999; margin-top: 2px;",
                    if let Some(member) = &photo.member_name {
                        "👤 {member}"
                    }
                    if let Some(operator) = &photo.operator_name {
                        " · ⬆️ {operator}"
                    }
                }
                if let Some(shot) = &photo.shoot_time {
                    div { style: "font-size: 12px; color: #999; margin-top: 2px;", "📅 {shot}" }
                }
                div { style: "display: flex; gap: 6px; margin-top: 8px;",
                    button {
                        class: "btn-secondary",
                        style: "padding: 5px 10px; font-size: 12px;",
                        onclick: move |_| on_favorite.call(photo_id),
                        "⭐"
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 5px 10px; font-size: 12px;",
                        onclick: move |_| on_delete.call((photo_id, delete_name.clone())),
                        "🗑️"
                    }
                }
            }
        }
    }
}
