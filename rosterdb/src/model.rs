//! Typed models for the two collections of the signup service.

use serde::{Deserialize, Serialize};

use rosterdb_core::record::Entity;

/// When an activity meets. Times are zero-padded 24-hour `"HH:MM"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDetails {
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
}

/// An extracurricular activity, keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    /// Human readable schedule, e.g. `"Mondays and Fridays, 3:15 PM - 4:45 PM"`.
    pub schedule: String,
    pub schedule_details: ScheduleDetails,
    pub max_participants: i32,
    /// Student emails, in signup order.
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
}

impl Activity {
    /// Returns how many more students can sign up.
    pub fn spots_left(&self) -> i32 {
        (self.max_participants - self.participants.len() as i32).max(0)
    }
}

impl Entity for Activity {
    fn collection_name() -> &'static str {
        "activities"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Admin,
}

/// A staff account, keyed by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub username: String,
    pub display_name: String,
    /// Stored credential hash. Never the plaintext.
    pub password: String,
    pub role: Role,
}

impl Entity for Teacher {
    fn collection_name() -> &'static str {
        "teachers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use rosterdb_core::record::EntityExt;

    fn robotics() -> Activity {
        Activity {
            description: "Build and program robots".to_string(),
            schedule: "Saturdays, 10:00 AM - 2:00 PM".to_string(),
            schedule_details: ScheduleDetails {
                days: vec!["Saturday".to_string()],
                start_time: "10:00".to_string(),
                end_time: "14:00".to_string(),
            },
            max_participants: 2,
            participants: vec!["ethan@mergington.edu".to_string()],
            difficulty_level: None,
        }
    }

    #[test]
    fn activity_record_omits_missing_difficulty() {
        let record = robotics().to_record("Weekend Robotics Workshop").unwrap();

        assert_eq!(record.get_str("_id").unwrap(), "Weekend Robotics Workshop");
        assert!(!record.contains_key("difficulty_level"));
        assert_eq!(
            record.get_document("schedule_details").unwrap(),
            &doc! { "days": ["Saturday"], "start_time": "10:00", "end_time": "14:00" }
        );
        assert_eq!(Activity::from_record(record).unwrap(), robotics());
    }

    #[test]
    fn teacher_role_is_lowercase_in_records() {
        let teacher = Teacher {
            username: "principal".to_string(),
            display_name: "Principal Martinez".to_string(),
            password: "$argon2id$stub".to_string(),
            role: Role::Admin,
        };

        let record = teacher.to_record(&teacher.username).unwrap();
        assert_eq!(record.get_str("role").unwrap(), "admin");
        assert_eq!(record.get_str("_id").unwrap(), "principal");
    }

    #[test]
    fn spots_left_never_goes_negative() {
        let mut activity = robotics();
        assert_eq!(activity.spots_left(), 1);

        activity.participants.push("oliver@mergington.edu".to_string());
        activity.participants.push("late@mergington.edu".to_string());
        assert_eq!(activity.spots_left(), 0);
    }
}
