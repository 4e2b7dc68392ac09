use crate::components::surface_error;
use crate::services::favorites::{next_active_folder, pick_active_folder, FolderPager};
use crate::services::listing::PAGE_SIZE;
use crate::session::Session;
use crate::Screen;
use album_api::{FavoriteFolder, Photo};
use dioxus::prelude::*;

/// Favorites manager: folder sidebar with CRUD on the left, paginated
/// photos of the active folder on the right.
#[component]
pub fn FavoriteManagerScreen(
    from_album: Option<i64>,
    on_navigate: EventHandler<Screen>,
) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut folders = use_signal(Vec::<FavoriteFolder>::new);
    let mut active = use_signal(|| None::<i64>);
    let mut photos = use_signal(Vec::<Photo>::new);
    let mut total = use_signal(|| 0i64);
    let mut page = use_signal(|| 1u32);
    let mut loading = use_signal(|| false);
    let mut pager = use_signal(FolderPager::new);
    let mut error = use_signal(|| None::<String>);

    let mut create_open = use_signal(|| false);
    let mut create_name = use_signal(String::new);
    let mut rename_target = use_signal(|| None::<(i64, String)>);
    let mut rename_value = use_signal(String::new);
    let mut delete_target = use_signal(|| None::<(i64, String)>);
    let mut remove_target = use_signal(|| None::<(i64, String)>);
    let mut busy = use_signal(|| false);

    let mut load_photos = move |target_page: u32| {
        let Some(folder_id) = active() else {
            photos.set(Vec::new());
            total.set(0);
            return;
        };
        let Some(member_id) = session.peek().member_id() else {
            return;
        };
        let query = pager.with_mut(|p| p.begin(folder_id, target_page));
        loading.set(true);
        spawn(async move {
            let client = session.read().client();
            let result = client
                .favorite_photos(query.folder_id, member_id, query.page, PAGE_SIZE)
                .await;
            // A later selection or page move owns the view by now.
            if !pager.peek().is_current(&query) {
                return;
            }
            match result {
                Ok(result) => {
                    error.set(None);
                    photos.set(result.items);
                    total.set(result.total);
                    page.set(query.page);
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            loading.set(false);
        });
    };

    // Reloads the folder list and, when the active folder vanished,
    // repoints the selection before fetching photos.
    let load_folders = move || {
        let Some(member_id) = session.peek().member_id() else {
            return;
        };
        spawn(async move {
            let client = session.read().client();
            match client.favorite_folders(member_id).await {
                Ok(list) => {
                    let still_there = active().is_some_and(|id| list.iter().any(|f| f.id == id));
                    if !still_there {
                        active.set(pick_active_folder(&list));
                    }
                    folders.set(list);
                    load_photos(1);
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
        });
    };

    use_effect(move || {
        load_folders();
    });

    let mut handle_create = move || {
        let name = create_name();
        let name = name.trim().to_string();
        if name.is_empty() {
            error.set(Some("Folder name must not be empty.".to_string()));
            return;
        }
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.create_favorite_folder(&name).await {
                Ok(()) => {
                    create_open.set(false);
                    create_name.set(String::new());
                    load_folders();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let mut handle_rename = move || {
        let Some((folder_id, _)) = rename_target() else {
            return;
        };
        let name = rename_value();
        let name = name.trim().to_string();
        if name.is_empty() {
            error.set(Some("Folder name must not be empty.".to_string()));
            return;
        }
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.rename_favorite_folder(folder_id, &name).await {
                Ok(()) => {
                    rename_target.set(None);
                    load_folders();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let mut handle_delete_folder = move || {
        let Some((folder_id, _)) = delete_target() else {
            return;
        };
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.delete_favorite_folder(folder_id).await {
                Ok(()) => {
                    delete_target.set(None);
                    let next = folders.with(|list| next_active_folder(list, active(), folder_id));
                    active.set(next);
                    load_folders();
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let mut handle_remove = move || {
        let Some((photo_id, _)) = remove_target() else {
            return;
        };
        let Some(folder_id) = active() else {
            return;
        };
        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.remove_favorite(photo_id, folder_id).await {
                Ok(()) => {
                    remove_target.set(None);
                    load_photos(1);
                }
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    let pages = {
        let total = total();
        if total <= 0 {
            0
        } else {
            ((total as u64).div_ceil(PAGE_SIZE as u64)) as u32
        }
    };
    let current_page = page();
    let client = session.read().client();
    let back_screen = match from_album {
        Some(id) => Screen::AlbumDetail(id),
        None => Screen::AlbumList,
    };

    rsx! {
        div { style: "padding: 16px; max-width: 1000px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px; padding-top: 8px;",
                div { style: "display: flex; align-items: center; gap: 12px;",
                    button {
                        class: "btn-secondary",
                        style: "padding: 8px 16px;",
                        onclick: move |_| on_navigate.call(back_screen.clone()),
                        "← Back"
                    }
                    h1 { style: "color: #0066cc; margin: 0; font-size: 24px; font-weight: 700;",
                        "⭐ Favorites"
                    }
                }
                button {
                    class: "btn-primary",
                    style: "padding: 10px 16px;",
                    onclick: move |_| {
                        create_name.set(String::new());
                        create_open.set(true);
                    },
                    "+ New folder"
                }
            }

            if let Some(err) = error() {
                div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                    "⚠️ {err}"
                }
            }

            div { style: "display: flex; gap: 16px; align-items: flex-start;",

                div { class: "card", style: "width: 240px; flex-shrink: 0; padding: 12px;",
                    if folders().is_empty() {
                        div { style: "color: #999; font-size: 13px; padding: 8px;",
                            "No folders yet."
                        }
                    }
                    for folder in folders() {
                        FolderRow {
                            folder: folder.clone(),
                            active: active() == Some(folder.id),
                            on_select: move |id| {
                                active.set(Some(id));
                                load_photos(1);
                            },
                            on_rename: move |(id, name): (i64, String)| {
                                rename_value.set(name.clone());
                                rename_target.set(Some((id, name)));
                            },
                            on_delete: move |target: (i64, String)| delete_target.set(Some(target)),
                        }
                    }
                }

                div { style: "flex: 1;",
                    if loading() && photos().is_empty() {
                        div { style: "text-align: center; padding: 40px; color: #999;", "⏳ Loading…" }
                    } else if photos().is_empty() {
                        div { style: "text-align: center; padding: 40px; color: #999;",
                            "This folder is empty."
                        }
                    } else {
                        div { class: "photo-grid",
                            for photo in photos() {
                                FavoritePhotoCard {
                                    src: client.photo_url(&photo.file_path),
                                    photo,
                                    on_remove: move |target: (i64, String)| remove_target.set(Some(target)),
                                }
                            }
                        }

                        div { class: "pagination",
                            button {
                                class: "btn-secondary",
                                disabled: current_page <= 1 || loading(),
                                onclick: move |_| load_photos(current_page - 1),
                                "← Prev"
                            }
                            span { style: "color: #666; font-size: 14px;",
                                "Page {current_page} / {pages} · {total} photos"
                            }
                            button {
                                class: "btn-secondary",
                                disabled: current_page >= pages || loading(),
                                onclick: move |_| load_photos(current_page + 1),
                                "Next →"
                            }
                        }
                    }
                }
            }

            if create_open() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h2 { style: "margin: 0 0 16px 0; font-size: 18px;", "New favorite folder" }
                        input {
                            r#type: "text",
                            class: "input",
                            maxlength: 20,
                            placeholder: "Folder name",
                            value: "{create_name}",
                            oninput: move |e| create_name.set(e.value()),
                            autofocus: true,
                        }
                        div { style: "display: flex; gap: 12px; margin-top: 20px;",
                            button {
                                class: "btn-primary",
                                style: "flex: 1;",
                                disabled: busy(),
                                onclick: move |_| handle_create(),
                                "Create"
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                onclick: move |_| create_open.set(false),
                                "Cancel"
                            }
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
                            "The folder is removed; the photos themselves stay in their albums."
                        }
                        div { style: "display: flex; gap: 12px;",
                            button {
                                class: "btn-danger",
                                style: "flex: 1;",
                                disabled: busy(),
                                onclick: move |_| handle_delete_folder(),
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

            if let Some((_, name)) = remove_target() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h2 { style: "margin: 0 0 12px 0; font-size: 18px;", "Remove \"{name}\" from this folder?" }
                        p { style: "color: #666; font-size: 14px; margin: 0 0 20px 0;",
                            "The photo stays in its album."
                        }
                        div { style: "display: flex; gap: 12px;",
                            button {
                                class: "btn-danger",
                                style: "flex: 1;",
                                disabled: busy(),
                                onclick: move |_| handle_remove(),
                                "Remove"
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                onclick: move |_| remove_target.set(None),
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
fn FolderRow(
    folder: FavoriteFolder,
    active: bool,
    on_select: EventHandler<i64>,
    on_rename: EventHandler<(i64, String)>,
    on_delete: EventHandler<(i64, String)>,
) -> Element {
    let folder_id = folder.id;
    let rename_name = folder.folder_name.clone();
    let delete_name = folder.folder_name.clone();
    let is_default = folder.is_default_folder();

    let row_style = if active {
        "background: #e3f2fd; border-radius: 8px;"
    } else {
        ""
    };

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 6px; padding: 8px; cursor: pointer; {row_style}",
            onclick: move |_| on_select.call(folder_id),
            div { style: "flex: 1; font-size: 14px; color: #333; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                if is_default {
                    "📁 {folder.folder_name} ★"
                } else {
                    "📁 {folder.folder_name}"
                }
            }
            button {
                class: "btn-secondary",
                style: "padding: 4px 8px; font-size: 11px;",
                onclick: move |e| {
                    e.stop_propagation();
                    on_rename.call((folder_id, rename_name.clone()));
                },
                "✏️"
            }
            if !is_default {
                button {
                    class: "btn-secondary",
                    style: "padding: 4px 8px; font-size: 11px;",
                    onclick: move |e| {
                        e.stop_propagation();
                        on_delete.call((folder_id, delete_name.clone()));
                    },
                    "🗑️"
                }
            }
        }
    }
}

#[component]
fn FavoritePhotoCard(photo: Photo, src: String, on_remove: EventHandler<(i64, String)>) -> Element {
    let photo_id = photo.id;
    let name = photo.photo_name.clone();

    rsx! {
        div { class: "photo-card",
            div { class: "photo-thumb",
                img {
                    src,
                    alt: photo.photo_name.clone(),
                    loading: "lazy",
                    style: "width: 100%; height: 100%; object-fit: cover;",
                }
            }
            div { style: "padding: 10px;",
                div { style: "font-size: 14px; font-weight: 600; color: #333; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                    "{photo.photo_name}"
                }
                if let Some(album) = &photo.album_name {
                    div { style: "font-size: 12px; color: #999; margin-top: 2px;", "📚 {album}" }
                }
                button {
                    class: "btn-secondary",
                    style: "padding: 5px 10px; font-size: 12px; margin-top: 8px;",
                    onclick: move |_| on_remove.call((photo_id, name.clone())),
                    "✖ Remove"
                }
            }
        }
    }
}
