use yew::prelude::*;

use crate::session::SessionContext;

#[function_component(ParentHome)]
pub fn parent_home() -> Html {
    let name = use_context::<SessionContext>()
        .and_then(|ctx| ctx.session.map(|s| s.display_name()))
        .unwrap_or_default();

    html! {
        <div class="hero bg-base-100 rounded-box shadow py-16">
            <div class="hero-content text-center">
                <div>
                    <h1 class="text-3xl font-bold">{format!("สวัสดี {}", name)}</h1>
                    <p class="py-4 opacity-70">{"ตารางเรียนและประวัติการชำระเงินของบุตรหลานจะแสดงที่นี่"}</p>
                </div>
            </div>
        </div>
    }
}
