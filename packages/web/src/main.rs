use dioxus::prelude::*;

use forms::FormSettings;
use ui::{ClientProvider, ExerciseLogForm, FriendRequestList, ProfileForm, RegisterForm, UserSearch};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Register,
    Profile,
    Exercise,
    Friends,
}

impl Screen {
    const ALL: [Screen; 4] = [Screen::Register, Screen::Profile, Screen::Exercise, Screen::Friends];

    fn title(&self) -> &'static str {
        match self {
            Screen::Register => "Sign up",
            Screen::Profile => "Profile",
            Screen::Exercise => "Log exercise",
            Screen::Friends => "Friends",
        }
    }
}

fn main() {
    dioxus::launch(App);
}

/// `forms.toml` next to the binary on native builds; defaults everywhere else.
fn load_form_settings() -> FormSettings {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match std::fs::read_to_string(FormSettings::filename()) {
            Ok(text) => match FormSettings::from_toml(&text) {
                Ok(settings) => return settings,
                Err(e) => tracing::warn!("Ignoring invalid {}: {}", FormSettings::filename(), e),
            },
            Err(e) => tracing::debug!("No {}: {}", FormSettings::filename(), e),
        }
    }
    FormSettings::default()
}

#[component]
fn App() -> Element {
    let backend = use_hook(|| {
        api::Settings::new().unwrap_or_else(|e| {
            tracing::error!("Failed to load backend settings: {}", e);
            api::Settings::default()
        })
    });
    let settings = use_hook(load_form_settings);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ClientProvider {
            backend,
            settings,
            Screens {}
        }
    }
}

#[component]
fn Screens() -> Element {
    let mut screen = use_signal(|| Screen::Register);

    rsx! {
        div {
            class: "flex flex-col items-center min-h-screen p-8 bg-white gap-6",
            nav {
                class: "flex gap-2",
                for s in Screen::ALL {
                    button {
                        key: "{s:?}",
                        class: if screen() == s { "px-3 py-1 rounded bg-primary-500 text-white text-sm" } else { "px-3 py-1 rounded border border-neutral-300 text-sm" },
                        onclick: move |_| screen.set(s),
                        {s.title()}
                    }
                }
            }
            match screen() {
                Screen::Register => rsx! {
                    RegisterForm { on_registered: move |_| screen.set(Screen::Profile) }
                },
                Screen::Profile => rsx! { ProfileForm {} },
                Screen::Exercise => rsx! { ExerciseLogForm {} },
                Screen::Friends => rsx! {
                    FriendRequestList {}
                    UserSearch {}
                },
            }
        }
    }
}
