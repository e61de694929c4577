use common::{ScheduleEntry, SuccessResponse, TutorScheduleRequest, UpdateNoteRequest};

use crate::api_client;

pub async fn get_tutor_schedule(tutor_id: i32) -> Result<Vec<ScheduleEntry>, String> {
    let result: Result<Vec<ScheduleEntry>, String> =
        api_client::post("/TutorHome", &TutorScheduleRequest { tutor_id }).await;
    if let Ok(entries) = &result {
        log::debug!("Fetched {} sessions for tutor {}", entries.len(), tutor_id);
    }
    result
}

pub async fn update_note(session_id: i32, note: String) -> Result<(), String> {
    let _: SuccessResponse = api_client::put("/updateNote", &UpdateNoteRequest { session_id, note }).await?;
    Ok(())
}
