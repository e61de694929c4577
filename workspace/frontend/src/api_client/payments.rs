use common::{
    PaymentDetailSession, PendingRecord, StudentPending, SuccessResponse, UpdatePaymentStatusRequest,
    group_pending,
};

use crate::api_client;

fn hours_pending_endpoint(tutor_id: i32) -> String {
    format!("/getHoursPending?current_tutor_id={}", tutor_id)
}

/// Every pending row of the tutor; the page narrows by course itself.
pub async fn get_hours_pending(tutor_id: i32) -> Result<Vec<PendingRecord>, String> {
    api_client::get(&hours_pending_endpoint(tutor_id)).await
}

/// Pending rows of a tutor grouped into student cards.
pub async fn get_pending_students(tutor_id: i32) -> Result<Vec<StudentPending>, String> {
    let records = get_hours_pending(tutor_id).await?;
    let students = group_pending(&records);
    log::debug!("Grouped {} pending rows into {} students", records.len(), students.len());
    Ok(students)
}

pub async fn get_payment_details(tutor_id: i32) -> Result<Vec<PaymentDetailSession>, String> {
    api_client::get(&format!("/getDetailPayment?current_tutor_id={}", tutor_id)).await
}

pub async fn update_payment_status(payment_id: i32, status: &str) -> Result<(), String> {
    let request = UpdatePaymentStatusRequest {
        payment_id,
        status: status.to_string(),
    };
    let _: SuccessResponse = api_client::put("/updatePaymentStatus", &request).await?;
    log::info!("Payment {} marked {}", payment_id, status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_pending_asks_for_every_course() {
        assert_eq!(hours_pending_endpoint(4), "/getHoursPending?current_tutor_id=4");
        assert!(!hours_pending_endpoint(4).contains("course_name"));
    }
}
