//! Daily task log entity definition.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the daily_task_logs table.
///
/// One row per (task_name, run_date); the unique constraint on that pair is
/// the cross-process run-once gate. `outcome` stays NULL while the run is
/// in flight, then records 'completed' or 'failed'.
#[derive(Debug, Clone, FromRow)]
pub struct DailyTaskLogEntity {
    pub id: Uuid,
    pub task_name: String,
    pub run_date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub outcome: Option<String>,
    pub detail: Option<String>,
}

impl DailyTaskLogEntity {
    /// A run that claimed the day but never recorded an outcome (crashed
    /// mid-run, or still in flight).
    pub fn is_unresolved(&self) -> bool {
        self.outcome.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unresolved() {
        let mut entity = DailyTaskLogEntity {
            id: Uuid::new_v4(),
            task_name: "send_rent_reminders".to_string(),
            run_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            started_at: Utc::now(),
            completed_at: None,
            outcome: None,
            detail: None,
        };
        assert!(entity.is_unresolved());

        entity.outcome = Some("completed".to_string());
        assert!(!entity.is_unresolved());
    }
}
