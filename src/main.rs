use std::sync::Arc;

use dioxus::prelude::*;

mod camera;
mod capture;
mod components;
mod config;
mod error;
mod services;
mod session;

use album_api::ApiClient;
use components::{
    AlbumDetailScreen, AlbumListScreen, CreateAlbumScreen, FavoriteManagerScreen, LoginScreen,
};
use config::Config;
use session::Session;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("using default configuration: {}", err);
        Config::default()
    });
    let client = match ApiClient::new(&config.api) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            log::error!("could not build the HTTP client: {}", err);
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new()
        .with_context(Session::new(client))
        .launch(App);
}

/// Screen navigation for the app.
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Login,
    AlbumList,
    AlbumDetail(i64),
    CreateAlbum,
    Favorites { from_album: Option<i64> },
}

#[component]
fn App() -> Element {
    let seed = use_context::<Session>();
    use_context_provider(|| Signal::new(seed));

    let mut current_screen = use_signal(|| Screen::Login);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "min-height: 100vh; font-family: sans-serif;",
            match current_screen() {
                Screen::Login => rsx! {
                    LoginScreen { on_navigate: move |s| current_screen.set(s) }
                },
                Screen::AlbumList => rsx! {
                    AlbumListScreen { on_navigate: move |s| current_screen.set(s) }
                },
                Screen::AlbumDetail(id) => rsx! {
                    AlbumDetailScreen { album_id: id, on_navigate: move |s| current_screen.set(s) }
                },
                Screen::CreateAlbum => rsx! {
                    CreateAlbumScreen { on_navigate: move |s| current_screen.set(s) }
                },
                Screen::Favorites { from_album } => rsx! {
                    FavoriteManagerScreen {
                        from_album,
                        on_navigate: move |s| current_screen.set(s),
                    }
                },
            }
        }
    }
}
