use crate::components::surface_error;
use crate::services::upload::{
    check_image_file, modified_from_millis, FileUploadForm, MAX_PHOTO_BYTES, UploadCoordinator,
};
use std::time::SystemTime;
use crate::session::Session;
use crate::Screen;
use album_api::Member;
use chrono::NaiveDate;
use dioxus::prelude::*;

/// File-picker upload dialog. Several files can be picked at once; they
/// are validated up front and shipped one after another.
#[component]
pub fn UploadForm(
    album_id: i64,
    members: Vec<Member>,
    on_navigate: EventHandler<Screen>,
    on_uploaded: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut coordinator = use_signal(UploadCoordinator::new);
    let mut picked = use_signal(Vec::<(String, Vec<u8>, Option<SystemTime>)>::new);
    let mut photo_name = use_signal(String::new);
    let mut shoot_date = use_signal(String::new);
    let mut member_id = use_signal(|| None::<i64>);
    let mut remarks = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let handle_pick = move |evt: FormEvent| {
        let files = evt.files();
        spawn(async move {
            let mut collected = Vec::new();
            for file in files {
                let name = file.name();
                if let Err(err) = check_image_file(&name, file.size(), MAX_PHOTO_BYTES) {
                    error.set(Some(format!("{}: {}", name, err.user_message())));
                    return;
                }
                let modified = modified_from_millis(file.last_modified());
                match file.read_bytes().await {
                    Ok(bytes) => collected.push((name, bytes.to_vec(), modified)),
                    Err(err) => {
                        log::warn!("could not read {}: {:?}", name, err);
                        error.set(Some(format!("Could not read {}.", name)));
                        return;
                    }
                }
            }
            error.set(None);
            picked.set(collected);
        });
    };

    let handle_submit = move |_| {
        error.set(None);
        let files = picked();
        if files.is_empty() {
            error.set(Some("Pick at least one photo first.".to_string()));
            return;
        }
        let name_value = photo_name();
        let remarks_value = remarks();
        let form = FileUploadForm {
            photo_name: Some(name_value.trim().to_string()).filter(|s| !s.is_empty()),
            shoot_date: NaiveDate::parse_from_str(&shoot_date(), "%Y-%m-%d").ok(),
            member_id: member_id(),
            remarks: Some(remarks_value.trim().to_string()).filter(|s| !s.is_empty()),
        };

        busy.set(true);
        spawn(async move {
            let client = session.read().client();
            let mut uploaded = 0usize;
            for (file_name, bytes, modified) in files {
                let packaged =
                    coordinator
                        .write()
                        .submit_file(&file_name, bytes, modified, album_id, &form);
                let (part, meta) = match packaged {
                    Ok(packaged) => packaged,
                    Err(err) => {
                        error.set(Some(format!("{}: {}", file_name, err.user_message())));
                        break;
                    }
                };
                let result = client.upload_photo(part, &meta).await;
                coordinator.write().finish();
                match result {
                    Ok(()) => uploaded += 1,
                    Err(err) => {
                        surface_error(&err.into(), session, on_navigate, error);
                        break;
                    }
                }
            }
            busy.set(false);
            if uploaded > 0 {
                on_uploaded.call(());
            }
            if error.peek().is_none() {
                on_close.call(());
            }
        });
    };

    let picked_count = picked.with(|p| p.len());

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal", style: "width: 480px;",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px;", "⬆️ Upload photos" }

                if let Some(err) = error() {
                    div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 10px; margin-bottom: 12px; border-radius: 8px; font-size: 13px;",
                        "⚠️ {err}"
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Files * (PNG, JPG, JPEG, GIF, BMP, up to 16 MB each)"
                    }
                    input {
                        r#type: "file",
                        accept: ".png,.jpg,.jpeg,.gif,.bmp",
                        multiple: true,
                        onchange: handle_pick,
                    }
                    if picked_count > 0 {
                        div { style: "font-size: 12px; color: #666; margin-top: 6px;",
                            "{picked_count} file(s) selected"
                        }
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Who is in the photos? *"
                    }
                    select {
                        class: "input",
                        onchange: move |e| member_id.set(e.value().parse::<i64>().ok()),
                        option { value: "", selected: member_id().is_none(), "Select a member" }
                        for member in members.clone() {
                            option {
                                value: "{member.id}",
                                selected: member_id() == Some(member.id),
                                "{member.name}"
                            }
                        }
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Photo name (optional, file name is used otherwise)"
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        value: "{photo_name}",
                        oninput: move |e| photo_name.set(e.value()),
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Taken on (optional)"
                    }
                    input {
                        r#type: "date",
                        class: "input",
                        value: "{shoot_date}",
                        oninput: move |e| shoot_date.set(e.value()),
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Remarks (optional)"
                    }
                    textarea {
                        class: "input",
                        rows: 3,
                        value: "{remarks}",
                        oninput: move |e| remarks.set(e.value()),
                    }
                }

                div { style: "display: flex; gap: 12px; margin-top: 20px;",
                    button {
                        class: "btn-primary",
                        style: "flex: 1;",
                        disabled: busy(),
                        onclick: handle_submit,
                        if busy() {
                            "⏳ Uploading…"
                        } else {
                            "Upload"
                        }
                    }
                    button {
                        class: "btn-secondary",
                        style: "flex: 1;",
                        disabled: busy(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
