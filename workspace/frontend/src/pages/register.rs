use common::RegisterRequest;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api_client::auth::register;
use crate::common::toast::ToastContext;
use crate::components::form::{bind_input, bind_select};
use crate::router::Route;
use crate::session::Session;

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[function_component(Register)]
pub fn register_page() -> Html {
    let navigator = use_navigator();
    let toast_ctx = use_context::<ToastContext>();
    let fname = use_state(String::new);
    let lname = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let role = use_state(|| Session::TUTOR.to_string());
    let phone = use_state(String::new);
    let line = use_state(String::new);
    let facebook = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_submit = {
        let (fname, lname, email, password) = (fname.clone(), lname.clone(), email.clone(), password.clone());
        let (role, phone, line, facebook) = (role.clone(), phone.clone(), line.clone(), facebook.clone());
        let busy = busy.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = RegisterRequest {
                fname: fname.trim().to_string(),
                lname: lname.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
                role: (*role).clone(),
                phone: optional(&phone),
                line: optional(&line),
                facebook: optional(&facebook),
            };
            let busy = busy.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            let toast_ctx = toast_ctx.clone();

            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match register(&request).await {
                    Ok(_) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_success("สมัครสมาชิกสำเร็จ กรุณาเข้าสู่ระบบ".to_string());
                        }
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(e) => error.set(Some(e)),
                }
                busy.set(false);
            });
        })
    };

    let field = |placeholder: &'static str, kind: &'static str, state: &UseStateHandle<String>| {
        html! {
            <input class="input input-bordered w-full" type={kind} {placeholder}
                value={(**state).clone()} oninput={bind_input(state)} />
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-200">
            <form class="card w-[28rem] bg-base-100 shadow-xl p-8 space-y-3" onsubmit={on_submit}>
                <h1 class="text-2xl font-bold text-center">{"สมัครสมาชิก"}</h1>
                if let Some(err) = &*error {
                    <div class="alert alert-error text-sm">{err.clone()}</div>
                }
                <div class="grid grid-cols-2 gap-2">
                    {field("ชื่อ", "text", &fname)}
                    {field("นามสกุล", "text", &lname)}
                </div>
                {field("อีเมล", "email", &email)}
                {field("รหัสผ่าน", "password", &password)}
                <select class="select select-bordered w-full" onchange={bind_select(&role)}>
                    <option value={Session::TUTOR} selected={*role == Session::TUTOR}>{"ติวเตอร์"}</option>
                    <option value={Session::PARENT} selected={*role == Session::PARENT}>{"ผู้ปกครอง"}</option>
                </select>
                {field("เบอร์โทรศัพท์", "tel", &phone)}
                <div class="grid grid-cols-2 gap-2">
                    {field("LINE", "text", &line)}
                    {field("Facebook", "text", &facebook)}
                </div>
                <button class={classes!("btn", "btn-primary", "w-full", (*busy).then_some("btn-disabled"))} type="submit">
                    {"สมัครสมาชิก"}
                </button>
                <p class="text-sm text-center">
                    <Link<Route> to={Route::Login} classes="link">{"กลับไปหน้าเข้าสู่ระบบ"}</Link<Route>>
                </p>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_drop_blanks() {
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" @mikasa "), Some("@mikasa".to_string()));
    }
}
