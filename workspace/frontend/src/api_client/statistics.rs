use common::{CourseSummary, DashboardStatistics, IncomeStatistic, IncomeSummary};

use crate::api_client;

/// Dashboard cards plus the per-course table of one month.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorStatistics {
    pub dashboard: DashboardStatistics,
    pub courses: Vec<CourseSummary>,
}

pub async fn get_dashboard(tutor_id: i32, month: &str, year: &str) -> Result<DashboardStatistics, String> {
    api_client::get(&format!("/dashboard?month={}&year={}&tutor_id={}", month, year, tutor_id)).await
}

pub async fn get_course_summary(tutor_id: i32, month: &str, year: &str) -> Result<Vec<CourseSummary>, String> {
    api_client::get(&format!("/getCourseSummary?month={}&year={}&tutor_id={}", month, year, tutor_id)).await
}

/// Account, then tutor, then statistics. Each step fails with its own error text.
pub async fn load_tutor_statistics(account_id: i32, month: &str, year: &str) -> Result<TutorStatistics, String> {
    log::trace!("Loading statistics for account {} ({}/{})", account_id, month, year);
    let tutor_id = api_client::auth::get_tutor_id(account_id).await?;
    let dashboard = get_dashboard(tutor_id, month, year).await?;
    let courses = get_course_summary(tutor_id, month, year).await?;

    log::info!("Loaded {} course rows for tutor {}", courses.len(), tutor_id);
    Ok(TutorStatistics { dashboard, courses })
}

pub async fn get_income_summary(tutor_id: i32) -> Result<IncomeSummary, String> {
    let rows: Vec<IncomeStatistic> = api_client::get(&format!("/income/statistics/{}", tutor_id)).await?;
    Ok(IncomeSummary::from_statistics(&rows))
}
