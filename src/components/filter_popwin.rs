use album_api::{Member, PhotoFilter};
use chrono::NaiveDate;
use dioxus::prelude::*;

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Search criteria popup for the photo grid. Emits the assembled filter;
/// the owning screen decides what to do with it.
#[component]
pub fn FilterPopwin(
    members: Vec<Member>,
    initial: PhotoFilter,
    on_search: EventHandler<PhotoFilter>,
    on_close: EventHandler<()>,
) -> Element {
    let mut name_like = use_signal(|| initial.name_like.clone().unwrap_or_default());
    let mut member_id = use_signal(|| initial.member_id);
    let mut operator_id = use_signal(|| initial.operator_id);
    let mut start_date = use_signal(|| {
        initial
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    });
    let mut end_date = use_signal(|| {
        initial
            .end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);

    let handle_search = move |_| {
        let start = parse_date(&start_date());
        let end = parse_date(&end_date());
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                error.set(Some("Start date must not be after end date.".to_string()));
                return;
            }
        }

        let name_value = name_like();
        let filter = PhotoFilter {
            name_like: Some(name_value.trim().to_string()).filter(|s| !s.is_empty()),
            member_id: member_id(),
            operator_id: operator_id(),
            start_date: start,
            end_date: end,
        };
        on_search.call(filter);
    };

    let handle_reset = move |_| {
        name_like.set(String::new());
        member_id.set(None);
        operator_id.set(None);
        start_date.set(String::new());
        end_date.set(String::new());
        error.set(None);
    };

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal",
                h2 { style: "margin: 0 0 16px 0; font-size: 18px;", "🔍 Search photos" }

                if let Some(err) = error() {
                    div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 10px; margin-bottom: 12px; border-radius: 8px; font-size: 13px;",
                        "⚠️ {err}"
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Photo name"
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        placeholder: "Name contains…",
                        value: "{name_like}",
                        oninput: move |e| name_like.set(e.value()),
                    }
                }

                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                        "Person in the photo"
                    }
                    select {
                        class: "input",
                        onchange: move |e| member_id.set(e.value().parse::<i64>().ok()),
                        option { value: "", selected: member_id().is_none(), "Anyone" }
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
                        "Uploaded by"
                    }
                    select {
                        class: "input",
                        onchange: move |e| operator_id.set(e.value().parse::<i64>().ok()),
                        option { value: "", selected: operator_id().is_none(), "Anyone" }
                        for member in members.clone() {
                            option {
                                value: "{member.id}",
                                selected: operator_id() == Some(member.id),
                                "{member.name}"
                            }
                        }
                    }
                }

                div { style: "display: flex; gap: 8px; margin-bottom: 14px;",
                    div { style: "flex: 1;",
                        label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                            "Taken from"
                        }
                        input {
                            r#type: "date",
                            class: "input",
                            value: "{start_date}",
                            oninput: move |e| start_date.set(e.value()),
                        }
                    }
                    div { style: "flex: 1;",
                        label { style: "display: block; margin-bottom: 4px; font-weight: 600; color: #333; font-size: 13px;",
                            "Taken until"
                        }
                        input {
                            r#type: "date",
                            class: "input",
                            value: "{end_date}",
                            oninput: move |e| end_date.set(e.value()),
                        }
                    }
                }

                div { style: "display: flex; gap: 12px; margin-top: 20px;",
                    button {
                        class: "btn-primary",
                        style: "flex: 1;",
                        onclick: handle_search,
                        "Search"
                    }
                    button {
                        class: "btn-secondary",
                        style: "flex: 1;",
                        onclick: handle_reset,
                        "Reset"
                    }
                    button {
                        class: "btn-secondary",
                        style: "flex: 1;",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-01"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("01.06.2024"), None);
    }
}
