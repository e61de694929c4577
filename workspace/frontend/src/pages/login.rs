use common::LoginRequest;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api_client::auth::sign_in;
use crate::components::form::bind_input;
use crate::router::Route;
use crate::session::SessionContext;

#[function_component(Login)]
pub fn login() -> Html {
    let session_ctx = use_context::<SessionContext>();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let busy = busy.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if email.trim().is_empty() || password.is_empty() {
                error.set(Some("กรุณากรอกอีเมลและรหัสผ่าน".to_string()));
                return;
            }

            let request = LoginRequest {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let busy = busy.clone();
            let error = error.clone();
            let session_ctx = session_ctx.clone();
            let navigator = navigator.clone();

            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match sign_in(&request).await {
                    Ok(session) => {
                        let home = Route::home_for(&session);
                        if let Some(ctx) = &session_ctx {
                            ctx.login.emit(session);
                        }
                        if let Some(navigator) = &navigator {
                            navigator.push(&home);
                        }
                    }
                    Err(e) => {
                        log::warn!("Login failed: {}", e);
                        error.set(Some(e));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-200">
            <form class="card w-96 bg-base-100 shadow-xl p-8 space-y-4" onsubmit={on_submit}>
                <h1 class="text-2xl font-bold text-center">{"เข้าสู่ระบบ"}</h1>
                if let Some(err) = &*error {
                    <div class="alert alert-error text-sm">{err.clone()}</div>
                }
                <input class="input input-bordered w-full" type="email" placeholder="อีเมล"
                    value={(*email).clone()} oninput={bind_input(&email)} />
                <input class="input input-bordered w-full" type="password" placeholder="รหัสผ่าน"
                    value={(*password).clone()} oninput={bind_input(&password)} />
                <button class={classes!("btn", "btn-primary", "w-full", (*busy).then_some("btn-disabled"))} type="submit">
                    {"เข้าสู่ระบบ"}
                </button>
                <p class="text-sm text-center">
                    {"ยังไม่มีบัญชี? "}
                    <Link<Route> to={Route::Register} classes="link link-primary">{"สมัครสมาชิก"}</Link<Route>>
                </p>
            </form>
        </div>
    }
}
