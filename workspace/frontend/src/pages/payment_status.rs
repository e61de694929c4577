use std::collections::HashMap;

use chrono::Local;
use common::pending::{filter_by_name, filter_by_status, STATUS_OVERDUE, STATUS_PAID, STATUS_PENDING};
use common::{PaymentDetailSession, StudentPending};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::api_client::payments::{get_payment_details, get_pending_students, update_payment_status};
use crate::common::error::EmptyState;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::form::{bind_input, bind_select};
use crate::format::{baht, hours, price, status_label, thai_date};
use crate::session::SessionContext;

fn status_badge(status: &str) -> Html {
    let (label, class) = status_label(status);
    html! { <span class={classes!("badge", class)}>{label}</span> }
}

#[derive(Properties, PartialEq)]
struct StudentCardProps {
    student: StudentPending,
    selected_course: Option<String>,
    on_select: Callback<(i32, Option<String>)>,
}

#[function_component(StudentCard)]
fn student_card(props: &StudentCardProps) -> Html {
    let view = props.student.view(props.selected_course.as_deref());
    let student_id = view.student_id;

    let on_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            on_select.emit((student_id, (!value.is_empty()).then_some(value)));
        })
    };

    let name = match &view.nickname {
        Some(nickname) => format!("{} ({})", view.student_name, nickname),
        None => view.student_name.clone(),
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body flex-row items-center gap-4">
                <div class="avatar">
                    <div class="w-14 rounded-full">
                        if let Some(url) = &view.picture_url {
                            <img src={url.clone()} alt={view.student_name.clone()} />
                        } else {
                            <i class="fas fa-user text-4xl opacity-40"></i>
                        }
                    </div>
                </div>
                <div class="flex-1">
                    <p class="font-semibold">{name}</p>
                    <select class="select select-bordered select-xs mt-1" onchange={on_change}>
                        <option value="" selected={view.selected_course.is_none()}>{"ทุกคอร์ส"}</option>
                        { for view.course_options.iter().map(|course| {
                            let selected = view.selected_course.as_deref() == Some(course.as_str());
                            html! { <option {selected} value={course.clone()}>{course.clone()}</option> }
                        }) }
                    </select>
                </div>
                <span class="w-28 text-right">{hours(view.total_pending_hours)}</span>
                <span class="w-28 text-right">{price(&view.price)}</span>
                <span class="w-32 text-right font-semibold">{baht(view.total_outstanding)}</span>
                <span class="w-24 text-right">{status_badge(&view.payment_status)}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HistoryProps {
    lines: Vec<PaymentDetailSession>,
    on_status: Callback<(i32, String)>,
}

#[function_component(PaymentHistory)]
fn payment_history(props: &HistoryProps) -> Html {
    if props.lines.is_empty() {
        return html! { <EmptyState message="ยังไม่มีรายการเรียกเก็บเงิน" /> };
    }

    let row = |line: &PaymentDetailSession| {
        let payment_id = line.payment_id;
        let on_status = props.on_status.clone();
        let onchange = Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            on_status.emit((payment_id, value));
        });
        let current = line.status.to_ascii_lowercase();

        html! {
            <tr key={payment_id}>
                <td>{line.index.to_string()}</td>
                <td>{line.month_label.clone()}</td>
                <td>{line.student_name.clone()}</td>
                <td>{line.course_name.clone()}</td>
                <td class="text-right">{hours(line.session_hours)}</td>
                <td class="text-right">{baht(line.amount)}</td>
                <td>{line.paid_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())}</td>
                <td>
                    <select class="select select-bordered select-xs" {onchange}>
                        { for [STATUS_PAID, STATUS_PENDING, STATUS_OVERDUE].into_iter().map(|status| html! {
                            <option value={status} selected={current == status}>{status_label(status).0}</option>
                        }) }
                    </select>
                </td>
            </tr>
        }
    };

    html! {
        <div class="overflow-x-auto bg-base-100 rounded-box shadow">
            <table class="table table-sm">
                <thead>
                    <tr>
                        <th>{"#"}</th><th>{"เดือน"}</th><th>{"นักเรียน"}</th><th>{"คอร์ส"}</th>
                        <th class="text-right">{"ชั่วโมง"}</th><th class="text-right">{"ยอด"}</th>
                        <th>{"วันที่ชำระ"}</th><th>{"สถานะ"}</th>
                    </tr>
                </thead>
                <tbody>{ for props.lines.iter().map(row) }</tbody>
            </table>
        </div>
    }
}

#[function_component(PaymentStatus)]
pub fn payment_status() -> Html {
    let tutor_id = use_context::<SessionContext>().and_then(|ctx| ctx.tutor_id());
    let toast_ctx = use_context::<ToastContext>();
    let search = use_state(String::new);
    let status_filter = use_state(String::new);
    let selected_courses = use_state(HashMap::<i32, String>::new);

    let (pending_state, refetch_pending) = use_fetch_with_refetch(tutor_id, |tutor_id| async move {
        match tutor_id {
            Some(id) => get_pending_students(id).await,
            None => Err("ไม่พบข้อมูลติวเตอร์".to_string()),
        }
    });
    let (history_state, refetch_history) = use_fetch_with_refetch(tutor_id, |tutor_id| async move {
        match tutor_id {
            Some(id) => get_payment_details(id).await,
            None => Ok(Vec::new()),
        }
    });

    let on_select = {
        let selected_courses = selected_courses.clone();
        Callback::from(move |(student_id, course): (i32, Option<String>)| {
            let mut next = (*selected_courses).clone();
            match course {
                Some(course) => next.insert(student_id, course),
                None => next.remove(&student_id),
            };
            selected_courses.set(next);
        })
    };

    let on_status = {
        let refetch_pending = refetch_pending.clone();
        let refetch_history = refetch_history.clone();
        Callback::from(move |(payment_id, status): (i32, String)| {
            let refetch_pending = refetch_pending.clone();
            let refetch_history = refetch_history.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = update_payment_status(payment_id, &status).await;
                if let Some(toast_ctx) = &toast_ctx {
                    match &result {
                        Ok(()) => toast_ctx.show_success("อัปเดตสถานะเรียบร้อย".to_string()),
                        Err(e) => toast_ctx.show_error(e.clone()),
                    }
                }
                if result.is_ok() {
                    refetch_pending.emit(());
                    refetch_history.emit(());
                }
            });
        })
    };

    let render_students = {
        let search = (*search).clone();
        let status_filter = (*status_filter).clone();
        let selected_courses = (*selected_courses).clone();
        let on_select = on_select.clone();
        Callback::from(move |students: Vec<StudentPending>| {
            let by_name = filter_by_name(&students, &search);
            let visible = filter_by_status(by_name, Some(status_filter.as_str()));
            if visible.is_empty() {
                return html! { <EmptyState message="ไม่พบนักเรียนที่ค้างชำระ" /> };
            }
            html! {
                <div class="grid grid-cols-1 gap-3">
                    { for visible.into_iter().map(|student| html! {
                        <StudentCard
                            key={student.student_id}
                            student={student.clone()}
                            selected_course={selected_courses.get(&student.student_id).cloned()}
                            on_select={on_select.clone()}
                        />
                    }) }
                </div>
            }
        })
    };

    let render_history = Callback::from(move |lines: Vec<PaymentDetailSession>| {
        html! { <PaymentHistory {lines} on_status={on_status.clone()} /> }
    });

    html! {
        <>
            <div class="flex flex-wrap items-center gap-3 mb-2">
                <input class="input input-bordered input-sm w-72" placeholder="ค้นหาด้วยชื่อนักเรียน"
                    value={(*search).clone()} oninput={bind_input(&search)} />
                <select class="select select-bordered select-sm" onchange={bind_select(&status_filter)}>
                    <option value="">{"ทั้งหมด"}</option>
                    <option value={STATUS_PAID}>{status_label(STATUS_PAID).0}</option>
                    <option value={STATUS_PENDING}>{status_label(STATUS_PENDING).0}</option>
                    <option value={STATUS_OVERDUE}>{status_label(STATUS_OVERDUE).0}</option>
                </select>
            </div>
            <h3 class="text-sm opacity-70 mb-4">{thai_date(Local::now().date_naive())}</h3>

            <div class="hidden md:flex justify-end gap-4 px-8 text-sm font-semibold opacity-70">
                <span class="w-28 text-right">{"ชั่วโมงที่ยังไม่ชำระ"}</span>
                <span class="w-28 text-right">{"ราคาต่อชั่วโมง"}</span>
                <span class="w-32 text-right">{"ยอดชำระทั้งหมด"}</span>
                <span class="w-24 text-right">{"สถานะ"}</span>
            </div>
            <FetchRender<Vec<StudentPending>>
                state={(*pending_state).clone()}
                render={render_students}
                on_retry={Some(refetch_pending)}
            />

            <h2 class="text-xl font-bold mt-10 mb-4">{"ประวัติการเรียกเก็บเงิน"}</h2>
            <FetchRender<Vec<PaymentDetailSession>>
                state={(*history_state).clone()}
                render={render_history}
                on_retry={Some(refetch_history)}
            />
        </>
    }
}
