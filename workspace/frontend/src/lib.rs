use yew::prelude::*;
use yew_router::prelude::*;

pub mod api_client;
pub mod common;
mod components;
pub mod format;
pub mod hooks;
mod pages;
pub mod router;
pub mod session;
pub mod settings;

use crate::common::toast::ToastProvider;
use crate::router::{switch, Route};
use crate::session::SessionProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <SessionProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </SessionProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== TutorDesk Frontend Starting ===");
    log::debug!("API base URL: {}", settings.api_base_url());

    yew::Renderer::<App>::new().render();
}
