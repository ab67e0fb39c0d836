//! Typed resource payloads.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// User profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Misfit user id.
    pub user_id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Birthday (requires the `birthday` scope).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,

    /// Gender, `"male"` or `"female"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Email address (requires the `email` scope).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Paired tracking device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Device id.
    pub id: String,

    /// Device model, e.g. `"shine"`.
    pub device_type: String,

    /// Serial number, as reported by the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Firmware version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,

    /// Battery level in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,

    /// Last sync time, as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<i64>,
}

/// Daily activity goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Goal id.
    pub id: String,

    /// Day the goal applies to.
    pub date: NaiveDate,

    /// Points earned.
    pub points: f64,

    /// Points needed to reach the goal.
    pub target_points: f64,

    /// UTC offset of the day, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone_offset: Option<i32>,
}

impl Goal {
    /// Returns true if the goal was reached.
    pub fn is_met(&self) -> bool {
        self.points >= self.target_points
    }
}

/// Goals response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalList {
    /// Goals in the requested range.
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl GoalList {
    /// Returns the number of goals.
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Gets the goal for a day.
    pub fn for_date(&self, date: NaiveDate) -> Option<&Goal> {
        self.goals.iter().find(|g| g.date == date)
    }
}

/// Activity summary, either aggregated or for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Day covered; only present in detailed summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Activity points.
    pub points: f64,

    /// Step count.
    pub steps: u64,

    /// Total calories burned.
    pub calories: f64,

    /// Calories burned through activity.
    pub activity_calories: f64,

    /// Distance in miles.
    pub distance: f64,
}

/// Detailed (per-day) summary response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryList {
    /// One summary per day.
    #[serde(default)]
    pub summary: Vec<Summary>,
}

impl SummaryList {
    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.summary.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    /// Total steps across all days.
    pub fn total_steps(&self) -> u64 {
        self.summary.iter().map(|s| s.steps).sum()
    }
}

/// Recorded activity session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id.
    pub id: String,

    /// Activity, e.g. `"Cycling"`.
    pub activity_type: String,

    /// Session start.
    pub start_time: DateTime<FixedOffset>,

    /// Duration in seconds.
    pub duration: u64,

    /// Activity points.
    pub points: f64,

    /// Step count.
    pub steps: u64,

    /// Calories burned.
    pub calories: f64,

    /// Distance in miles.
    pub distance: f64,
}

/// Sessions response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionList {
    /// Sessions in the requested range.
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl SessionList {
    /// Returns the number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Filters sessions by activity type.
    pub fn by_activity(&self, activity_type: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.activity_type == activity_type)
            .collect()
    }
}

/// Sleep state recorded in a [`SleepDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepState {
    /// Awake.
    Awake,
    /// Light sleep.
    Sleep,
    /// Deep sleep.
    DeepSleep,
}

/// Point where the sleep state changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepDetail {
    /// Time of the change.
    pub datetime: DateTime<FixedOffset>,

    /// Raw state value: 1 awake, 2 sleep, 3 deep sleep.
    pub value: u8,
}

impl SleepDetail {
    /// Decodes the state value.
    pub fn state(&self) -> Option<SleepState> {
        match self.value {
            1 => Some(SleepState::Awake),
            2 => Some(SleepState::Sleep),
            3 => Some(SleepState::DeepSleep),
            _ => None,
        }
    }
}

/// Sleep record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sleep {
    /// Sleep id.
    pub id: String,

    /// Whether the device detected the sleep on its own.
    #[serde(default)]
    pub auto_detected: bool,

    /// Sleep start.
    pub start_time: DateTime<FixedOffset>,

    /// Duration in seconds.
    pub duration: u64,

    /// State changes during the sleep.
    #[serde(default)]
    pub sleep_details: Vec<SleepDetail>,
}

/// Sleeps response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepList {
    /// Sleeps in the requested range.
    #[serde(default)]
    pub sleeps: Vec<Sleep>,
}

impl SleepList {
    /// Returns the number of sleeps.
    pub fn len(&self) -> usize {
        self.sleeps.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.sleeps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_deserialize() {
        let profile: Profile = serde_json::from_value(json!({
            "userId": "51a4189acf12e53f79000001",
            "name": "Misfit",
            "birthday": "1955-07-06",
            "gender": "female",
            "email": "help@misfit.com"
        }))
        .unwrap();

        assert_eq!(profile.user_id, "51a4189acf12e53f79000001");
        assert_eq!(profile.birthday, NaiveDate::from_ymd_opt(1955, 7, 6));
        assert_eq!(profile.email.as_deref(), Some("help@misfit.com"));
    }

    #[test]
    fn test_profile_without_optional_scopes() {
        let profile: Profile = serde_json::from_value(json!({"userId": "u1"})).unwrap();
        assert_eq!(profile.birthday, None);
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_device_deserialize() {
        let device: Device = serde_json::from_value(json!({
            "id": "51a4189acf12e53f80000001",
            "deviceType": "shine",
            "serialNumber": " XXXXXV0011",
            "firmwareVersion": "0.0.50r",
            "batteryLevel": 40
        }))
        .unwrap();

        assert_eq!(device.device_type, "shine");
        assert_eq!(device.battery_level, Some(40));
        assert_eq!(device.last_sync_time, None);
    }

    #[test]
    fn test_goal_list() {
        let goals: GoalList = serde_json::from_value(json!({
            "goals": [
                {"id": "g1", "date": "2013-10-05", "points": 500, "targetPoints": 1000},
                {"id": "g2", "date": "2013-10-06", "points": 1200, "targetPoints": 1000}
            ]
        }))
        .unwrap();

        assert_eq!(goals.len(), 2);
        let day = NaiveDate::from_ymd_opt(2013, 10, 6).unwrap();
        assert!(goals.for_date(day).unwrap().is_met());
        assert!(!goals.goals[0].is_met());
    }

    #[test]
    fn test_summary_plain_and_detail() {
        let summary: Summary = serde_json::from_value(json!({
            "points": 96.4,
            "steps": 888,
            "calories": 3132.3888,
            "activityCalories": 547.1241,
            "distance": 0.2821
        }))
        .unwrap();
        assert_eq!(summary.date, None);
        assert_eq!(summary.steps, 888);

        let detail: SummaryList = serde_json::from_value(json!({
            "summary": [
                {"date": "2013-11-05", "points": 394.4, "steps": 3650, "calories": 1687.4735,
                 "activityCalories": 412.3124, "distance": 1.18},
                {"date": "2013-11-06", "points": 459.6, "steps": 4330, "calories": 1707.8484,
                 "activityCalories": 412.3124, "distance": 1.3982}
            ]
        }))
        .unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail.total_steps(), 7980);
    }

    #[test]
    fn test_session_list() {
        let sessions: SessionList = serde_json::from_value(json!({
            "sessions": [{
                "id": "51a4189acf12e53f82000001",
                "activityType": "Cycling",
                "startTime": "2013-11-05T10:26:54-04:00",
                "duration": 900,
                "points": 210.8,
                "steps": 1406,
                "calories": 25.7325,
                "distance": 0.5125
            }]
        }))
        .unwrap();

        assert_eq!(sessions.by_activity("Cycling").len(), 1);
        assert!(sessions.by_activity("Swimming").is_empty());
        assert_eq!(
            sessions.sessions[0].start_time.offset().local_minus_utc(),
            -4 * 3600
        );
    }

    #[test]
    fn test_sleep_details_states() {
        let sleeps: SleepList = serde_json::from_value(json!({
            "sleeps": [{
                "id": "54bbb383c00ae7002434af92",
                "autoDetected": true,
                "startTime": "2015-01-18T00:04:49-06:00",
                "duration": 25260,
                "sleepDetails": [
                    {"datetime": "2015-01-18T00:04:49-06:00", "value": 2},
                    {"datetime": "2015-01-18T00:11:49-06:00", "value": 3},
                    {"datetime": "2015-01-18T06:02:49-06:00", "value": 1}
                ]
            }]
        }))
        .unwrap();

        let sleep = &sleeps.sleeps[0];
        assert!(sleep.auto_detected);
        let states: Vec<_> = sleep.sleep_details.iter().map(SleepDetail::state).collect();
        assert_eq!(
            states,
            vec![
                Some(SleepState::Sleep),
                Some(SleepState::DeepSleep),
                Some(SleepState::Awake)
            ]
        );
    }
}
