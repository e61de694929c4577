use chrono::{Datelike, Local};
use common::{CourseSummary, ALL};
use yew::prelude::*;

use crate::api_client::statistics::{load_tutor_statistics, TutorStatistics};
use crate::common::error::EmptyState;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::form::bind_select;
use crate::components::stat_card::StatCard;
use crate::format::{baht, hours, month_options, to_buddhist_year, year_options, year_param};
use crate::session::SessionContext;

const YEARS_SHOWN: i32 = 5;

fn course_row(course: &CourseSummary) -> Html {
    html! {
        <tr key={course.course_name.clone()}>
            <td>{course.course_name.clone()}</td>
            <td class="text-right">{hours(course.total_hours)}</td>
            <td class="text-right">{course.total_students.to_string()}</td>
            <td class="text-right">{course.total_sessions.to_string()}</td>
            <td class="text-right">{baht(course.total_income)}</td>
        </tr>
    }
}

fn render_statistics(stats: Option<TutorStatistics>) -> Html {
    let Some(TutorStatistics { dashboard, courses }) = stats else {
        return html! { <EmptyState message="กรุณาเลือกเดือนและปีเพื่อดูข้อมูล" /> };
    };

    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                <StatCard title="จำนวนชั่วโมงที่สอน" value={hours(dashboard.total_hours)} icon="fas fa-clock" />
                <StatCard title="จำนวนนักเรียน" value={format!("{} คน", dashboard.total_students)} icon="fas fa-user-graduate" />
                <StatCard title="จำนวนคลาสที่สอน" value={format!("{} คลาส", dashboard.total_sessions)} icon="fas fa-chalkboard" />
                <StatCard title="รายรับทั้งหมด" value={baht(dashboard.total_income)} icon="fas fa-coins" value_class="text-success" />
            </div>

            <h2 class="text-xl font-bold mt-8 mb-4">{"รายงานสถิติการสอนต่อคอร์ส"}</h2>
            if courses.is_empty() {
                <EmptyState message="ยังไม่มีข้อมูลรายคอร์สในเดือนและปีที่เลือก" />
            } else {
                <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{"ชื่อคอร์ส"}</th>
                                <th class="text-right">{"ชั่วโมง"}</th>
                                <th class="text-right">{"นักเรียน"}</th>
                                <th class="text-right">{"คลาส"}</th>
                                <th class="text-right">{"รายรับ"}</th>
                            </tr>
                        </thead>
                        <tbody>{ for courses.iter().map(course_row) }</tbody>
                    </table>
                </div>
            }
        </>
    }
}

#[function_component(StatTutor)]
pub fn stat_tutor() -> Html {
    let account_id = use_context::<SessionContext>()
        .and_then(|ctx| ctx.session)
        .map(|s| s.account_id);
    let month = use_state(String::new);
    let year = use_state(String::new);

    // Nothing is fetched until both selectors have a value
    let deps = (account_id, (*month).clone(), (*year).clone());
    let (state, refetch) = use_fetch_with_refetch(deps, |(account_id, month, year)| async move {
        let (Some(account_id), Some(year)) = (account_id, year_param(&year)) else {
            return Ok(None);
        };
        if month.is_empty() {
            return Ok(None);
        }
        load_tutor_statistics(account_id, &month, &year).await.map(Some)
    });

    let on_clear = {
        let month = month.clone();
        let year = year.clone();
        Callback::from(move |_| {
            month.set(String::new());
            year.set(String::new());
        })
    };

    let current_year = Local::now().date_naive().year();

    html! {
        <>
            <div class="flex flex-wrap items-center gap-3 mb-6">
                <h3 class="text-lg font-semibold">{"รายงานสถิติการสอนทั้งหมด"}</h3>
                <select class="select select-bordered select-sm" onchange={bind_select(&month)}>
                    <option value="" selected={month.is_empty()} disabled={true} hidden={true}>{"เลือกเดือน"}</option>
                    <option value={ALL} selected={*month == ALL}>{"ทั้งหมด"}</option>
                    { for month_options().into_iter().map(|(value, name)| {
                        let selected = *month == value;
                        html! { <option {selected} {value}>{name}</option> }
                    }) }
                </select>
                <select class="select select-bordered select-sm" onchange={bind_select(&year)}>
                    <option value="" selected={year.is_empty()} disabled={true} hidden={true}>{"เลือกปี"}</option>
                    <option value={ALL} selected={*year == ALL}>{"ทั้งหมด"}</option>
                    { for year_options(current_year, YEARS_SHOWN).into_iter().map(|be| {
                        let value = be.to_string();
                        let selected = *year == value;
                        html! { <option {selected} value={value.clone()}>{value}</option> }
                    }) }
                </select>
                if !month.is_empty() || !year.is_empty() {
                    <button class="btn btn-ghost btn-sm" onclick={on_clear}>{"ล้างตัวกรอง"}</button>
                }
                <span class="text-sm opacity-60">{format!("ปีปัจจุบัน {}", to_buddhist_year(current_year))}</span>
            </div>

            <FetchRender<Option<TutorStatistics>>
                state={(*state).clone()}
                render={Callback::from(render_statistics)}
                on_retry={Some(refetch)}
                loading_text="กำลังโหลดข้อมูล..."
            />
        </>
    }
}
