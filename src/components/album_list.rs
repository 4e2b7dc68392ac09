use crate::components::surface_error;
use crate::services::upload::{check_image_file, mime_for, MAX_COVER_BYTES};
use crate::session::Session;
use crate::Screen;
use album_api::{Album, FilePart};
use dioxus::prelude::*;

#[component]
pub fn AlbumListScreen(on_navigate: EventHandler<Screen>) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut albums = use_signal(Vec::<Album>::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    // Modal state: (album id, current name) for rename and delete,
    // album id for cover replacement.
    let mut rename_target = use_signal(|| None::<(i64, String)>);
    let mut rename_value = use_signal(String::new);
    let mut delete_target = use_signal(|| None::<(i64, String)>);
    let mut cover_target = use_signal(|| None::<i64>);
    let mut busy = use_signal(|| false);

    let mut load_albums = move || {
        loading.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.albums().await {
                Ok(list) => {
                    error.set(None);
                    albums.set(list);
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            loading.set(false);
        });
    };

    use_effect(move || {
        load_albums();
    });

    let mut handle_rename = move || {
        let Some((album_id, _)) = rename_target() else {
            return;
        };
        let name = rename_value();
        let name = name.trim().to_string();
        if name.is_empty() {
            error.set(Some("Album name must not be empty.".to_string()));
            return;
        }
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.rename_album(album_id, &name).await {
                Ok(()) => {
                    rename_target.set(None);
                    load_albums();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let mut handle_delete = move || {
        let Some((album_id, _)) = delete_target() else {
            return;
        };
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.delete_album(album_id).await {
                Ok(()) => {
                    delete_target.set(None);
                    load_albums();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let handle_logout = move |_| {
        let mut session = session;
        spawn(async move {
            let client = session.read().client();
            if let Err(err) = client.logout().await {
                log::warn!("server-side logout failed: {}", err);
            }
            session.write().teardown();
            on_navigate.call(Screen::Login);
        });
    };

    let member_name = session
        .read()
        .member()
        .map(|m| m.name.clone())
        .unwrap_or_default();
    let client = session.read().client();

    rsx! {
        div { style: "padding: 16px; max-width: 900px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; padding-top: 8px;",
                h1 { style: "color: #0066cc; margin: 0; font-size: 24px; font-weight: 700;",
                    "📚 Albums"
                }
                div { style: "display: flex; gap: 8px; align-items: center;",
                    span { style: "color: #666; font-size: 14px;", "{member_name}" }
                    button {
                        class: "btn-secondary",
                        style: "padding: 10px 16px;",
                        onclick: move |_| on_navigate.call(Screen::Favorites { from_album: None }),
                        "⭐ Favorites"
                    }
                    button {
                        class: "btn-primary",
                        style: "padding: 10px 16px;",
                        onclick: move |_| on_navigate.call(Screen::CreateAlbum),
                        "+ New album"
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 10px 16px;",
                        onclick: handle_logout,
                        "Sign out"
                    }
                }
            }

            if let Some(err) = error() {
                div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                    "⚠️ {err}"
                }
            }

            if loading() && albums().is_empty() {
                div { style: "text-align: center; padding: 40px; color: #999;", "⏳ Loading…" }
            } else if albums().is_empty() {
                div { style: "text-align: center; padding: 40px; color: #999;",
                    "No albums yet. Create the first one!"
                }
            } else {
                div { class: "album-grid",
                    for album in albums() {
                        AlbumCard {
                            cover_src: album.cover_url.as_deref().map(|c| client.cover_url(c)),
                            album,
                            on_open: move |id| on_navigate.call(Screen::AlbumDetail(id)),
                            on_rename: move |(id, name): (i64, String)| {
                                rename_value.set(name.clone());
                                rename_target.set(Some((id, name)));
                            },
                            on_cover: move |id| cover_target.set(Some(id)),
                            on_delete: move |target: (i64, String)| delete_target.set(Some(target)),
                        }
                    }
                }
            }

            if let Some((_, old_name)) = rename_target() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h2 { style: "margin: 0 0 16px 0; font-size: 18px;", "Rename \"{old_name}\"" }
                        input {
                            r#type: "text",
                            class: "input",
                            maxlength: 20,
                            value: "{rename_value}",
                            oninput: move |e| rename_value.set(e.value()),
                            autofocus: true,
                        }
                        div { style: "display: flex; gap: 12px; margin-top: 20px;",
                            button {
                                class: "btn-primary",
                                style: "flex: 1;",
                                disabled: busy(),
                                onclick: move |_| handle_rename(),
                                "Save"
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                onclick: move |_| rename_target.set(None),
                                "Cancel"
                            }
                        }
                    }
                }
            }

            if let Some((_, name)) = delete_target() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px;", "Delete \"{name}\"?" }
                        p { style: "color: #666; font-size: 14px; margin: 0 0 20px 0;",
                            "All photos in this album will be deleted as well."
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

            if let Some(album_id) = cover_target() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px;", "Replace cover" }
                        p { style: "color: #666; font-size: 13px; margin: 0 0 16px 0;",
                            "PNG, JPG, JPEG, GIF or BMP, up to 10 MB."
                        }
                        input {
                            r#type: "file",
                            accept: ".png,.jpg,.jpeg,.gif,.bmp",
                            onchange: move |evt| {
                                let files = evt.files();
                                busy.set(true);
                                spawn(async move {
                                    let Some(file) = files.into_iter().next() else {
                                        busy.set(false);
                                        return;
                                    };
                                    let name = file.name();
                                    if let Err(err) = check_image_file(&name, file.size(), MAX_COVER_BYTES) {
                                        error.set(Some(err.user_message()));
                                        busy.set(false);
                                        return;
                                    }
                                    let bytes = match file.read_bytes().await {
                                        Ok(bytes) => bytes.to_vec(),
                                        Err(err) => {
                                            log::warn!("could not read picked cover: {:?}", err);
                                            error.set(Some("Could not read the selected file.".to_string()));
                                            busy.set(false);
                                            return;
                                        }
                                    };
                                    let part = FilePart {
                                        mime: mime_for(&name).to_string(),
                                        file_name: name,
                                        bytes,
                                    };
                                    let client = session.read().client();
                                    match client.upload_album_cover(album_id, part).await {
                                        Ok(_) => {
                                            cover_target.set(None);
                                            load_albums();
                                        }
                                        Err(err) => surface_error(&err.into(), session, on_navigate, error),
                                    }
                                    busy.set(false);
                                });
                            },
                        }
                        div { style: "margin-top: 20px;",
                            button {
                                class: "btn-secondary",
                                style: "width: 100%;",
                                onclick: move |_| cover_target.set(None),
                                "Cancel"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AlbumCard(
    album: Album,
    cover_src: Option<String>,
    on_open: EventHandler<i64>,
    on_rename: EventHandler<(i64, String)>,
    on_cover: EventHandler<i64>,
    on_delete: EventHandler<(i64, String)>,
) -> Element {
    let album_id = album.id;
    let rename_name = album.album_name.clone();
    let delete_name = album.album_name.clone();

    rsx! {
        div { class: "album-card", onclick: move |_| on_open.call(album_id),
            div { class: "album-cover",
                if let Some(src) = cover_src {
                    img {
                        src,
                        alt: album.album_name.clone(),
                        style: "width: 100%; height: 100%; object-fit: cover;",
                    }
                } else {
                    div { class: "album-cover-placeholder", "🖼️" }
                }
            }
            div { style: "padding: 12px;",
                div { style: "font-size: 16px; font-weight: 600; color: #333;", "{album.album_name}" }
                if let Some(time) = &album.last_upload_time {
                    div { style: "font-size: 12px; color: #999; margin-top: 4px;",
                        "Last upload {time}"
                        if let Some(who) = &album.last_upload_user_name {
                            " by {who}"
                        }
                    }
                } else {
                    div { style: "font-size: 12px; color: #999; margin-top: 4px;", "No uploads yet" }
                }
                div { style: "display: flex; gap: 6px; margin-top: 10px;",
                    button {
                        class: "btn-secondary",
                        style: "padding: 6px 10px; font-size: 12px;",
                        onclick: move |e| {
                            e.stop_propagation();
                            on_rename.call((album_id, rename_name.clone()));
                        },
                        "✏️"
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 6px 10px; font-size: 12px;",
                        onclick: move |e| {
                            e.stop_propagation();
                            on_cover.call(album_id);
                        },
                        "🖼️"
                    }
                    button {
                        class: "btn-secondary",
                        style: "padding: 6px 10px; font-size: 12px;",
                        onclick: move |e| {
                            e.stop_propagation();
                            on_delete.call((album_id, delete_name.clone()));
                        },
                        "🗑️"
                    }
                }
            }
        }
    }
}
