use crate::camera::{Facing, PlatformBackend};
use crate::capture::{CaptureSession, CaptureState};
use crate::components::surface_error;
use crate::services::upload::UploadCoordinator;
use crate::session::Session;
use crate::Screen;
use album_api::Member;
use dioxus::prelude::*;

/// Modal walking the camera flow: live preview, still capture, member
/// assignment, upload. The stream is released whichever way it closes.
#[component]
pub fn PhotoCaptureModal(
    album_id: i64,
    members: Vec<Member>,
    on_navigate: EventHandler<Screen>,
    on_uploaded: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut capture = use_signal(|| CaptureSession::new(Box::new(PlatformBackend)));
    let mut coordinator = use_signal(UploadCoordinator::new);
    let mut facing = use_signal(|| Facing::Rear);
    let mut member_id = use_signal(|| None::<i64>);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        let target = *facing.peek();
        if let Err(err) = capture.write().open(target) {
            log::warn!("camera open failed: {}", err);
        }
    });

    let state = capture.with(|c| c.state());
    let preview = capture.with(|c| c.image().map(|i| i.data_url.clone()));
    let uploading = state == CaptureState::Uploading;

    let mut handle_flip = move || {
        let next = match facing() {
            Facing::Rear => Facing::Front,
            Facing::Front => Facing::Rear,
        };
        facing.set(next);
        if let Err(err) = capture.write().open(next) {
            log::warn!("camera open failed: {}", err);
        }
    };

    let mut handle_shoot = move || {
        error.set(None);
        if let Err(err) = capture.write().capture() {
            error.set(Some(err.user_message()));
        }
    };

    let mut handle_retake = move || {
        error.set(None);
        if let Err(err) = capture.write().retake() {
            error.set(Some(err.user_message()));
        }
    };

    let mut handle_confirm = move || {
        error.set(None);
        let image = match capture.write().begin_upload() {
            Ok(image) => image,
            Err(err) => {
                error.set(Some(err.user_message()));
                return;
            }
        };
        let packaged = coordinator
            .write()
            .submit_captured(&image, Some(album_id), member_id());
        let (part, meta) = match packaged {
            Ok(packaged) => packaged,
            Err(err) => {
                capture.write().finish_upload(false);
                error.set(Some(err.user_message()));
                return;
            }
        };
        spawn(async move {
            let client = session.read().client();
            let result = client.upload_photo(part, &meta).await;
            coordinator.write().finish();
            match result {
                Ok(()) => {
                    capture.write().finish_upload(true);
                    on_uploaded.call(());
                    on_close.call(());
                }
                Err(err) => {
                    capture.write().finish_upload(false);
                    surface_error(&err.into(), session, on_navigate, error);
                }
            }
        });
    };

    let close = move |_| {
        capture.write().cancel();
        on_close.call(());
    };

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal", style: "width: 480px;",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px;", "📷 Take a photo" }

                if let Some(err) = error() {
                    div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 10px; margin-bottom: 12px; border-radius: 8px; font-size: 13px;",
                        "⚠️ {err}"
                    }
                }

                div { style: "width: 100%; height: 320px; background: #222; border-radius: 8px; display: flex; align-items: center; justify-content: center; overflow: hidden; margin-bottom: 16px;",
                    match state {
                        CaptureState::Captured | CaptureState::Uploading => rsx! {
                            if let Some(src) = preview.clone() {
                                img {
                                    src,
                                    alt: "Captured photo",
                                    style: "width: 100%; height: 100%; object-fit: contain;",
                                }
                            }
                        },
                        CaptureState::Previewing => rsx! {
                            div { style: "color: #888; font-size: 14px; text-align: center;",
                                div { style: "font-size: 48px; margin-bottom: 8px;", "🎥" }
                                "Camera is live"
                            }
                        },
                        CaptureState::Error => rsx! {
                            div { style: "color: #c33; font-size: 14px; text-align: center; padding: 0 24px;",
                                div { style: "font-size: 48px; margin-bottom: 8px;", "🚫" }
                                "The camera could not be opened. Check the permission and try again."
                            }
                        },
                        _ => rsx! {
                            div { style: "color: #888; font-size: 14px;", "⏳ Starting camera…" }
                        },
                    }
                }

                if state == CaptureState::Captured || state == CaptureState::Uploading {
                    div { style: "margin-bottom: 16px;",
                        label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                            "Who is in the photo? *"
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
                }

                div { style: "display: flex; gap: 8px;",
                    match state {
                        CaptureState::Previewing => rsx! {
                            button {
                                class: "btn-primary",
                                style: "flex: 2;",
                                onclick: move |_| handle_shoot(),
                                "📸 Shoot"
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                onclick: move |_| handle_flip(),
                                "🔄 Flip"
                            }
                        },
                        CaptureState::Captured | CaptureState::Uploading => rsx! {
                            button {
                                class: "btn-primary",
                                style: "flex: 2;",
                                disabled: uploading,
                                onclick: move |_| handle_confirm(),
                                if uploading {
                                    "⏳ Uploading…"
                                } else {
                                    "⬆️ Upload"
                                }
                            }
                            button {
                                class: "btn-secondary",
                                style: "flex: 1;",
                                disabled: uploading,
                                onclick: move |_| handle_retake(),
                                "↩️ Retake"
                            }
                        },
                        CaptureState::Error => rsx! {
                            button {
                                class: "btn-primary",
                                style: "flex: 1;",
                                onclick: move |_| {
                                    error.set(None);
                                    let target = facing();
                                    if let Err(err) = capture.write().open(target) {
                                        log::warn!("camera open failed: {}", err);
                                    }
                                },
                                "🔁 Try again"
                            }
                        },
                        _ => rsx! {},
                    }
                    button {
                        class: "btn-secondary",
                        style: "flex: 1;",
                        disabled: uploading,
                        onclick: close,
                        "Close"
                    }
                }
            }
        }
    }
}
