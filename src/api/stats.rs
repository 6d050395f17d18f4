use super::NewsApi;
use crate::errors::AppResult;
use crate::models::DashboardStats;

impl NewsApi {
    /// GET /api/stats. All counters zero without a backend.
    pub async fn get_stats(&self) -> AppResult<DashboardStats> {
        if !self.is_configured() {
            return Ok(DashboardStats::default());
        }
        self.get_json(&["api", "stats"], "Failed to fetch stats").await
    }
}
