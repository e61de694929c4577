use common::IncomeSummary;
use yew::prelude::*;

use crate::api_client::statistics::get_income_summary;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::stat_card::StatCard;
use crate::format::baht;
use crate::session::SessionContext;

fn render_summary(summary: IncomeSummary) -> Html {
    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-4 gap-4 mb-6">
                <StatCard title="รายรับวันนี้" value={baht(summary.today)} icon="fas fa-calendar-day" />
                <StatCard title="รายรับสัปดาห์นี้" value={baht(summary.week)} icon="fas fa-calendar-week" />
                <StatCard title="รายรับเดือนนี้" value={baht(summary.month)} icon="fas fa-calendar-alt" />
                <StatCard title="รายรับปีนี้" value={baht(summary.year)} icon="fas fa-calendar" />
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <StatCard title="รายรับทั้งหมด" value={baht(summary.total)} icon="fas fa-coins" value_class="text-success" />
                <StatCard title="ยอดค้างชำระ" value={baht(summary.outstanding)} icon="fas fa-hourglass-half" value_class="text-error" />
            </div>
        </>
    }
}

#[function_component(FinanceReport)]
pub fn finance_report() -> Html {
    let tutor_id = use_context::<SessionContext>().and_then(|ctx| ctx.tutor_id());

    let (state, refetch) = use_fetch_with_refetch(tutor_id, |tutor_id| async move {
        match tutor_id {
            Some(id) => get_income_summary(id).await,
            None => Err("ไม่พบข้อมูลติวเตอร์".to_string()),
        }
    });

    html! {
        <FetchRender<IncomeSummary>
            state={(*state).clone()}
            render={Callback::from(render_summary)}
            on_retry={Some(refetch)}
        />
    }
}
