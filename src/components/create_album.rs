use crate::components::surface_error;
use crate::services::upload::{check_image_file, mime_for, MAX_COVER_BYTES};
use crate::session::Session;
use crate::Screen;
use album_api::FilePart;
use dioxus::prelude::*;

/// Album names are capped server side; mirrored here so the user hears
/// about it before the request goes out.
const MAX_NAME_CHARS: usize = 20;

#[component]
pub fn CreateAlbumScreen(on_navigate: EventHandler<Screen>) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut name = use_signal(String::new);
    let mut cover = use_signal(|| None::<(String, Vec<u8>)>);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let mut handle_submit = move || {
        error.set(None);

        let name_value = name();
        let trimmed = name_value.trim().to_string();
        if trimmed.is_empty() {
            error.set(Some("Album name must not be empty.".to_string()));
            return;
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            error.set(Some(format!(
                "Album name must be at most {} characters.",
                MAX_NAME_CHARS
            )));
            return;
        }

        let part = cover().map(|(file_name, bytes)| FilePart {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes,
        });

        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            match client.create_album(&trimmed, part).await {
                Ok(()) => on_navigate.call(Screen::AlbumList),
                Err(err) => surface_error(&err.into(), session, on_navigate, error),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",

            div { style: "display: flex; align-items: center; margin-bottom: 24px;",
                button {
                    class: "btn-secondary",
                    style: "margin-right: 12px; padding: 8px 16px;",
                    onclick: move |_| on_navigate.call(Screen::AlbumList),
                    "← Back"
                }
                h1 { style: "color: #0066cc; font-size: 24px; font-weight: 700; margin: 0;",
                    "New album"
                }
            }

            if let Some(err) = error() {
                div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                    "⚠️ {err}"
                }
            }

            div { class: "card",

                div { style: "margin-bottom: 20px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Name *"
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        placeholder: "Summer holidays",
                        maxlength: 20,
                        value: "{name}",
                        oninput: move |e| name.set(e.value()),
                        autofocus: true,
                    }
                }

                div { style: "margin-bottom: 20px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Cover (optional)"
                    }

                    if let Some((file_name, _)) = cover() {
                        div { style: "display: flex; align-items: center; gap: 12px; padding: 12px; background: #f0f0f0; border-radius: 8px; margin-bottom: 12px;",
                            div { style: "font-size: 32px;", "🖼️" }
                            div { style: "flex: 1; font-size: 13px; color: #666; word-break: break-all;",
                                "{file_name}"
                            }
                            button {
                                class: "btn-secondary",
                                style: "padding: 6px 12px; font-size: 12px;",
                                onclick: move |_| cover.set(None),
                                "🗑️"
                            }
                        }
                    }

                    input {
                        r#type: "file",
                        accept: ".png,.jpg,.jpeg,.gif,.bmp",
                        onchange: move |evt| {
                            let files = evt.files();
                            spawn(async move {
                                let Some(file) = files.into_iter().next() else {
                                    return;
                                };
                                let file_name = file.name();
                                if let Err(err) = check_image_file(&file_name, file.size(), MAX_COVER_BYTES) {
                                    error.set(Some(err.user_message()));
                                    return;
                                }
                                match file.read_bytes().await {
                                    Ok(bytes) => {
                                        error.set(None);
                                        cover.set(Some((file_name, bytes.to_vec())));
                                    }
                                    Err(err) => {
                                        log::warn!("could not read picked cover: {:?}", err);
                                        error.set(Some("Could not read the selected file.".to_string()));
                                    }
                                }
                            });
                        },
                    }
                }

                div { style: "display: flex; gap: 12px; margin-top: 24px;",
                    button {
                        class: "btn-primary",
                        style: "flex: 1; padding: 14px;",
                        disabled: busy(),
                        onclick: move |_| handle_submit(),
                        if busy() {
                            "⏳ Creating…"
                        } else {
                            "💾 Create"
                        }
                    }
                    button {
                        class: "btn-secondary",
                        style: "flex: 1; padding: 14px;",
                        onclick: move |_| on_navigate.call(Screen::AlbumList),
                        "❌ Cancel"
                    }
                }
            }
        }
    }
}
