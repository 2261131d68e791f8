use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{HouseholdError, Result};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Lifecycle of a single chore assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Pending,
    Planned,
    Completed,
    Overdue,
}

impl AssignmentStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, AssignmentStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoreType {
    OneTime,
    Recurring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Weekly,
}

// ---------------------------------------------------------------------------
// Chore: The chore definition shared by all of its assignments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub type_field: Option<ChoreType>,
    pub household_id: Option<String>,
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// AccountChore: One dated assignment of a chore to an account
// ---------------------------------------------------------------------------

/// A chore assignment as returned by both chore listing endpoints.
///
/// `due_date` marks the end of the due day, so it is one calendar day past
/// the day the chore is actually due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChore {
    pub id: String,
    pub chore_id: String,
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    pub due_date: Option<String>,
    pub status: AssignmentStatus,
    pub completed_at: Option<String>,
    #[serde(default)]
    pub points: i64,
    pub chore: Chore,
}

// ---------------------------------------------------------------------------
// CreateChoreParams: Request body for chore creation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreParams {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_field: ChoreType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Days of week for recurring chores, Monday = 1 through Sunday = 7.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<u8>,
    pub assignee_ids: Vec<String>,
    pub points: i64,
}

impl CreateChoreParams {
    /// A chore done once by a single assignee.
    pub fn one_time(title: &str, assignee_id: &str, due_date: &str, points: i64) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            type_field: ChoreType::OneTime,
            end_date: Some(due_date.to_string()),
            frequency: None,
            schedule: Vec::new(),
            assignee_ids: vec![assignee_id.to_string()],
            points,
        }
    }

    /// A weekly chore rotating through `rotation` on the given weekdays
    /// until `end_date`.
    pub fn recurring(
        title: &str,
        rotation: &[&str],
        days: &[Weekday],
        end_date: &str,
        points: i64,
    ) -> Self {
        let mut schedule: Vec<u8> = days.iter().map(|d| schedule_day(*d)).collect();
        schedule.sort_unstable();
        schedule.dedup();
        Self {
            title: title.to_string(),
            description: String::new(),
            type_field: ChoreType::Recurring,
            end_date: Some(end_date.to_string()),
            frequency: Some(Frequency::Weekly),
            schedule,
            assignee_ids: rotation.iter().map(|s| s.to_string()).collect(),
            points,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Check the request before it is sent.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(HouseholdError::InvalidArgument(
                "chore title must not be empty".into(),
            ));
        }
        match self.type_field {
            ChoreType::OneTime => {
                if self.assignee_ids.len() != 1 {
                    return Err(HouseholdError::InvalidArgument(
                        "a one-time chore needs exactly one assignee".into(),
                    ));
                }
            }
            ChoreType::Recurring => {
                if self.schedule.is_empty() {
                    return Err(HouseholdError::InvalidArgument(
                        "a recurring chore needs at least one scheduled day".into(),
                    ));
                }
                if let Some(day) = self.schedule.iter().find(|d| !(1..=7).contains(*d)) {
                    return Err(HouseholdError::InvalidArgument(format!(
                        "schedule day {} is outside 1-7",
                        day
                    )));
                }
                if self.assignee_ids.is_empty() {
                    return Err(HouseholdError::InvalidArgument(
                        "a recurring chore needs at least one person in the rotation".into(),
                    ));
                }
            }
        }
        if self.points < 0 {
            return Err(HouseholdError::InvalidArgument(
                "chore points must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Schedule number for a weekday: Monday = 1 through Sunday = 7.
pub fn schedule_day(day: Weekday) -> u8 {
    day.number_from_monday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_wire_names() {
        let s: AssignmentStatus = serde_json::from_str("\"OVERDUE\"").unwrap();
        assert_eq!(s, AssignmentStatus::Overdue);
        assert_eq!(
            serde_json::to_string(&AssignmentStatus::Planned).unwrap(),
            "\"PLANNED\""
        );
        assert!(serde_json::from_str::<AssignmentStatus>("\"DONE\"").is_err());
    }

    #[test]
    fn recurring_schedule_is_monday_based() {
        let params = CreateChoreParams::recurring(
            "Dishes",
            &["a", "b"],
            &[Weekday::Sun, Weekday::Mon, Weekday::Mon],
            "2024-07-01T00:00:00Z",
            5,
        );
        assert_eq!(params.schedule, vec![1, 7]);
        assert_eq!(params.frequency, Some(Frequency::Weekly));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validation_rules() {
        let ok = CreateChoreParams::one_time("Trash", "a", "2024-06-11T00:00:00Z", 3);
        assert!(ok.validate().is_ok());

        let mut blank = ok.clone();
        blank.title = "  ".into();
        assert!(blank.validate().is_err());

        let mut two = ok.clone();
        two.assignee_ids.push("b".into());
        assert!(two.validate().is_err());

        let no_days = CreateChoreParams::recurring("Mop", &["a"], &[], "2024-07-01", 1);
        assert!(no_days.validate().is_err());

        let nobody = CreateChoreParams::recurring("Mop", &[], &[Weekday::Tue], "2024-07-01", 1);
        assert!(nobody.validate().is_err());

        let mut bad_day = CreateChoreParams::recurring("Mop", &["a"], &[Weekday::Tue], "2024-07-01", 1);
        bad_day.schedule.push(9);
        assert!(bad_day.validate().is_err());
    }

    #[test]
    fn create_params_serialize_camel_case() {
        let params = CreateChoreParams::one_time("Trash", "a", "2024-06-11T00:00:00Z", 3);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "ONE_TIME");
        assert_eq!(json["assigneeIds"][0], "a");
        assert_eq!(json["endDate"], "2024-06-11T00:00:00Z");
        assert!(json.get("schedule").is_none());
        assert!(json.get("frequency").is_none());
    }
}
