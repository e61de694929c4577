use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::Layout;
use crate::pages::{
    finance_report::FinanceReport, login::Login, parent::ParentHome, payment_status::PaymentStatus,
    register::Register, stat_tutor::StatTutor, tutor_home::TutorHome,
};
use crate::session::{Session, SessionContext};

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Login,
    #[at("/register")]
    Register,
    #[at("/tutor/home")]
    TutorHome,
    #[at("/teaching/statistics")]
    StatTutor,
    #[at("/finance/payment-status")]
    PaymentStatus,
    #[at("/finance/reports")]
    FinanceReport,
    #[at("/parent")]
    Parent,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Landing page after login.
    pub fn home_for(session: &Session) -> Self {
        if session.is_tutor() {
            Route::TutorHome
        } else {
            Route::Parent
        }
    }

    /// Pages restricted to one role; `None` means public.
    fn required_role(&self) -> Option<&'static str> {
        match self {
            Route::TutorHome | Route::StatTutor | Route::PaymentStatus | Route::FinanceReport => {
                Some(Session::TUTOR)
            }
            Route::Parent => Some(Session::PARENT),
            Route::Login | Route::Register | Route::NotFound => None,
        }
    }
}

#[derive(Properties, PartialEq)]
struct GuardProps {
    route: Route,
}

/// Sends visitors without a matching session back to login, or to their own home.
#[function_component(Guarded)]
fn guarded(props: &GuardProps) -> Html {
    let Some(ctx) = use_context::<SessionContext>() else {
        log::error!("SessionContext missing");
        return html! {};
    };

    let role = props.route.required_role();
    match (&ctx.session, role) {
        (None, Some(_)) => {
            log::debug!("No session, redirecting to login");
            html! { <Redirect<Route> to={Route::Login} /> }
        }
        (Some(session), Some(role)) if session.role != role => {
            log::warn!("Account {} cannot open {:?}", session.account_id, props.route);
            html! { <Redirect<Route> to={Route::home_for(session)} /> }
        }
        (Some(session), None) if props.route == Route::Login => {
            html! { <Redirect<Route> to={Route::home_for(session)} /> }
        }
        _ => render(&props.route),
    }
}

fn render(route: &Route) -> Html {
    match route {
        Route::Login => html! { <Login /> },
        Route::Register => html! { <Register /> },
        Route::TutorHome => html! { <Layout title="คาบเรียน"><TutorHome /></Layout> },
        Route::StatTutor => html! { <Layout title="รายงานสถิติการสอน"><StatTutor /></Layout> },
        Route::PaymentStatus => html! { <Layout title="อัปเดตสถานะการชำระเงิน"><PaymentStatus /></Layout> },
        Route::FinanceReport => html! { <Layout title="รายงานการเงิน"><FinanceReport /></Layout> },
        Route::Parent => html! { <Layout title="ผู้ปกครอง"><ParentHome /></Layout> },
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <div class="p-12 text-center"><h1 class="text-2xl">{"404 ไม่พบหน้านี้"}</h1></div> }
        }
    }
}

pub fn switch(route: Route) -> Html {
    log::debug!("Routing to: {:?}", route);
    html! { <Guarded {route} /> }
}
