use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::session::SessionContext;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: AttrValue,
}

#[function_component(Sidebar)]
fn sidebar() -> Html {
    let ctx = use_context::<SessionContext>();
    let navigator = use_navigator();
    let session = ctx.as_ref().and_then(|c| c.session.clone());

    let on_logout = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            if let Some(ctx) = &ctx {
                ctx.logout.emit(());
            }
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let links = match &session {
        Some(s) if s.is_tutor() => html! {
            <>
                <li class="menu-title">{"การสอน"}</li>
                <li><Link<Route> to={Route::TutorHome}><i class="fas fa-calendar-day w-5"></i>{" คาบเรียน"}</Link<Route>></li>
                <li><Link<Route> to={Route::StatTutor}><i class="fas fa-chart-bar w-5"></i>{" สถิติการสอน"}</Link<Route>></li>
                <li class="menu-title">{"การเงิน"}</li>
                <li><Link<Route> to={Route::PaymentStatus}><i class="fas fa-credit-card w-5"></i>{" อัปเดตสถานะชำระเงิน"}</Link<Route>></li>
                <li><Link<Route> to={Route::FinanceReport}><i class="fas fa-chart-line w-5"></i>{" รายงานการเงิน"}</Link<Route>></li>
            </>
        },
        Some(_) => html! {
            <li><Link<Route> to={Route::Parent}><i class="fas fa-child w-5"></i>{" บุตรของฉัน"}</Link<Route>></li>
        },
        None => html! {},
    };

    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="main-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <i class="fas fa-book-open text-2xl text-primary"></i>
                        <span class="text-2xl font-bold tracking-tight">{"TutorDesk"}</span>
                    </div>
                </li>
                {links}
                <div class="divider"></div>
                if let Some(session) = &session {
                    <li class="disabled"><span><i class="fas fa-user w-5"></i>{session.display_name()}</span></li>
                }
                <li><a onclick={on_logout}><i class="fas fa-sign-out-alt w-5"></i>{" ออกจากระบบ"}</a></li>
            </ul>
        </div>
    }
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <div class="drawer lg:drawer-open">
            <input id="main-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
                    <div class="flex-none lg:hidden">
                        <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="main-drawer">
                            <i class="fas fa-bars text-xl"></i>
                        </label>
                    </div>
                    <h1 class="flex-1 px-4 text-xl font-bold">{&props.title}</h1>
                </div>
                <main class="flex-1 p-6 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
            <Sidebar />
        </div>
    }
}
