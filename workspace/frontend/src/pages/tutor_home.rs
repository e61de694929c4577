use chrono::{Local, NaiveDate};
use common::schedule::{sessions_on, upcoming_days};
use common::ScheduleEntry;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::schedule::{get_tutor_schedule, update_note};
use crate::common::error::EmptyState;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::form::bind_input;
use crate::format::thai_date;
use crate::session::SessionContext;

const DAY_HEADINGS: [&str; 3] = ["วันนี้", "พรุ่งนี้", "มะรืน"];

#[derive(Properties, PartialEq)]
struct NoteInputProps {
    session_id: i32,
    note: Option<String>,
}

/// Saves when the field loses focus, and only if the text changed.
#[function_component(NoteInput)]
fn note_input(props: &NoteInputProps) -> Html {
    let toast_ctx = use_context::<ToastContext>();
    let saved = use_state(|| props.note.clone().unwrap_or_default());

    let onblur = {
        let saved = saved.clone();
        let session_id = props.session_id;
        Callback::from(move |e: FocusEvent| {
            let note = e.target_unchecked_into::<HtmlInputElement>().value();
            if note == *saved {
                return;
            }
            let saved = saved.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match update_note(session_id, note.clone()).await {
                    Ok(()) => saved.set(note),
                    Err(e) => {
                        log::error!("Saving note for session {} failed: {}", session_id, e);
                        if let Some(toast_ctx) = toast_ctx {
                            toast_ctx.show_error(e);
                        }
                    }
                }
            });
        })
    };

    html! {
        <input
            class="input input-bordered input-sm w-full"
            placeholder="บันทึกเพิ่มเติม"
            value={(*saved).clone()}
            {onblur}
        />
    }
}

fn session_row(entry: &ScheduleEntry) -> Html {
    html! {
        <tr key={entry.id}>
            <td class="whitespace-nowrap">
                {format!("{} - {}", entry.start_time.format("%H:%M"), entry.end_time.format("%H:%M"))}
            </td>
            <td>{entry.student_name.clone()}</td>
            <td>{entry.grade.clone().unwrap_or_else(|| "-".to_string())}</td>
            <td>{entry.lesson.clone().unwrap_or_else(|| "-".to_string())}</td>
            <td class="w-1/3"><NoteInput session_id={entry.id} note={entry.note.clone()} /></td>
        </tr>
    }
}

fn day_section(heading: &str, date: NaiveDate, entries: &[ScheduleEntry], search: &str) -> Html {
    let sessions = sessions_on(entries, date, search);

    html! {
        <section key={date.to_string()} class="mb-8">
            <h2 class="text-lg font-bold">{heading.to_string()}</h2>
            <p class="text-sm opacity-70 mb-2">{thai_date(date)}</p>
            if sessions.is_empty() {
                <EmptyState message="ไม่มีคาบเรียน" />
            } else {
                <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                    <table class="table table-sm">
                        <thead>
                            <tr><th>{"เวลา"}</th><th>{"นักเรียน"}</th><th>{"ชั้น"}</th><th>{"บทเรียน"}</th><th>{"บันทึก"}</th></tr>
                        </thead>
                        <tbody>{ for sessions.into_iter().map(session_row) }</tbody>
                    </table>
                </div>
            }
        </section>
    }
}

#[function_component(TutorHome)]
pub fn tutor_home() -> Html {
    let tutor_id = use_context::<SessionContext>().and_then(|ctx| ctx.tutor_id());
    let search = use_state(String::new);

    let (state, refetch) = use_fetch_with_refetch(tutor_id, |tutor_id| async move {
        match tutor_id {
            Some(id) => get_tutor_schedule(id).await,
            None => Err("ไม่พบข้อมูลติวเตอร์".to_string()),
        }
    });

    let render = {
        let search = (*search).clone();
        Callback::from(move |entries: Vec<ScheduleEntry>| {
            let today = Local::now().date_naive();
            html! {
                <>
                    { for upcoming_days(today).into_iter().zip(DAY_HEADINGS).map(|(date, heading)| {
                        day_section(heading, date, &entries, &search)
                    }) }
                </>
            }
        })
    };

    html! {
        <>
            <input class="input input-bordered input-sm w-72 mb-6" placeholder="ค้นหาด้วยชื่อนักเรียน"
                value={(*search).clone()} oninput={bind_input(&search)} />
            <FetchRender<Vec<ScheduleEntry>> state={(*state).clone()} {render} on_retry={Some(refetch)} />
        </>
    }
}
