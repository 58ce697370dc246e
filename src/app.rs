use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::features::FeatureKey;
use crate::pages::home::HomePage;
use crate::pages::settings::SettingsPage;
use crate::pages::studio::StudioPage;

/// Active UI language ("vi" or "en"), shared app-wide.
#[derive(Clone, Copy)]
pub struct LanguageContext {
    pub language: ReadSignal<String>,
    pub set_language: WriteSignal<String>,
}

/// The tool chosen on the home page, read by the studio.
#[derive(Clone, Copy)]
pub struct SelectedFeature(pub RwSignal<FeatureKey>);

#[component]
pub fn App() -> impl IntoView {
    let (language, set_language) = signal(String::from("vi"));
    provide_context(LanguageContext {
        language,
        set_language,
    });
    provide_context(SelectedFeature(RwSignal::new(FeatureKey::SurrealExterior)));

    // Restore the saved language preference on startup.
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(saved) = commands::get_language().await {
                set_language.set(saved);
            }
        });
    });

    view! {
        <Router>
            <main class="app-root">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/studio") view=StudioPage />
                    <Route path=path!("/settings") view=SettingsPage />
                </Routes>
            </main>
        </Router>
    }
}
