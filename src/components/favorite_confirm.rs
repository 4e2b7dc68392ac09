use crate::services::favorites::pick_active_folder;
use album_api::FavoriteFolder;
use dioxus::prelude::*;

/// Folder picker shown before a photo is favorited. Preselects the
/// default folder when the member has one.
#[component]
pub fn FavoriteConfirm(
    folders: Vec<FavoriteFolder>,
    on_confirm: EventHandler<i64>,
    on_cancel: EventHandler<()>,
) -> Element {
    let preselected = pick_active_folder(&folders);
    let mut selected = use_signal(|| preselected);

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px;", "⭐ Add to favorites" }

                if folders.is_empty() {
                    p { style: "color: #666; font-size: 14px; margin: 0 0 20px 0;",
                        "You have no favorite folders yet. Create one in the favorites manager first."
                    }
                } else {
                    div { style: "margin-bottom: 20px;",
                        label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                            "Folder"
                        }
                        select {
                            class: "input",
                            onchange: move |e| selected.set(e.value().parse::<i64>().ok()),
                            for folder in folders.clone() {
                                option {
                                    value: "{folder.id}",
                                    selected: selected() == Some(folder.id),
                                    if folder.is_default_folder() {
                                        "{folder.folder_name} (default)"
                                    } else {
                                        "{folder.folder_name}"
                                    }
                                }
                            }
                        }
                    }
                }

                div { style: "display: flex; gap: 12px;",
                    button {
                        class: "btn-primary",
                        style: "flex: 1;",
                        disabled: selected().is_none(),
                        onclick: move |_| {
                            if let Some(folder_id) = selected() {
                                on_confirm.call(folder_id);
                            }
                        },
                        "Add"
                    }
                    button {
                        class: "btn-secondary",
                        style: "flex: 1;",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
