use crate::session::Session;
use crate::Screen;
use dioxus::prelude::*;

#[component]
pub fn LoginScreen(on_navigate: EventHandler<Screen>) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let mut handle_login = move || {
        error.set(None);

        let user = username();
        let user = user.trim().to_string();
        let pass = password();
        if user.is_empty() || pass.is_empty() {
            error.set(Some("Please enter username and password.".to_string()));
            return;
        }

        busy.set(true);
        let mut session = session;
        spawn(async move {
            let client = session.read().client();
            match client.login(&user, &pass).await {
                Ok(data) => {
                    session.write().establish(data);
                    busy.set(false);
                    on_navigate.call(Screen::AlbumList);
                }
                Err(err) => {
                    log::warn!("login failed: {}", err);
                    error.set(Some(err.user_message()));
                    busy.set(false);
                }
            }
        });
    };

    rsx! {
        div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #f5f5f5;",
            div { class: "card", style: "width: 360px; padding: 32px;",
                h1 { style: "color: #0066cc; font-size: 24px; font-weight: 700; text-align: center; margin: 0 0 8px 0;",
                    "📷 Family Album"
                }
                p { style: "text-align: center; color: #999; font-size: 14px; margin: 0 0 24px 0;",
                    "Sign in to browse the family photos"
                }

                if let Some(err) = error() {
                    div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                        "⚠️ {err}"
                    }
                }

                div { style: "margin-bottom: 16px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Username"
                    }
                    input {
                        r#type: "text",
                        class: "input",
                        placeholder: "Username",
                        value: "{username}",
                        oninput: move |e| username.set(e.value()),
                        autofocus: true,
                    }
                }

                div { style: "margin-bottom: 24px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600; color: #333; font-size: 14px;",
                        "Password"
                    }
                    input {
                        r#type: "password",
                        class: "input",
                        placeholder: "Password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                        onkeydown: move |e| {
                            if e.key() == Key::Enter {
                                handle_login();
                            }
                        },
                    }
                }

                button {
                    class: "btn-primary",
                    style: "width: 100%; padding: 14px;",
                    disabled: busy(),
                    onclick: move |_| handle_login(),
                    if busy() {
                        "⏳ Signing in…"
                    } else {
                        "Sign in"
                    }
                }
            }
        }
    }
}
