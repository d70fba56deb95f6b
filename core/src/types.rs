//! Domain records for the Oura v2 usercollection endpoints.
//!
//! # Design
//! Records are immutable values. Each implements `Record` with a static list
//! of required keys and a field-by-field decode; serde derives exist for
//! callers that want to store or compare records, not for decoding API
//! responses. Temporal fields use `CalendarDate` and `OffsetTimestamp`.

use serde::{Deserialize, Serialize};

use crate::decode::{Fields, Presence, Record};
use crate::error::Result;
use crate::temporal::{CalendarDate, OffsetTimestamp};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Opaque continuation token; `None` on the last page.
    pub next_token: Option<String>,
}

/// Query for a list endpoint. Unset bounds are left to the API's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<CalendarDate>,
    pub end_date: Option<CalendarDate>,
    pub next_token: Option<String>,
}

impl DateRange {
    pub fn new(start_date: CalendarDate, end_date: CalendarDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            next_token: None,
        }
    }

    /// The same range, continued from `next_token` of a previous page.
    pub fn continued(&self, next_token: impl Into<String>) -> Self {
        Self {
            next_token: Some(next_token.into()),
            ..self.clone()
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date".to_string(), start.format()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date".to_string(), end.format()));
        }
        if let Some(token) = &self.next_token {
            pairs.push(("next_token".to_string(), token.clone()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Daily activity
// ---------------------------------------------------------------------------

/// Sub-scores (0-100) behind the daily activity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityContributors {
    pub meet_daily_targets: i32,
    pub move_every_hour: i32,
    pub recovery_time: i32,
    pub stay_active: i32,
    pub training_frequency: i32,
    pub training_volume: i32,
}

/// MET samples taken every `interval` seconds starting at `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetSeries {
    pub interval: f64,
    pub items: Vec<f64>,
    pub timestamp: OffsetTimestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivityRecord {
    pub id: String,
    /// One activity class digit per five-minute bucket of the day.
    pub class_5_min: String,
    pub score: i32,
    pub active_calories: i32,
    pub average_met_minutes: f64,
    pub contributors: ActivityContributors,
    pub equivalent_walking_distance: i32,
    pub high_activity_met_minutes: i32,
    pub high_activity_time: i32,
    pub inactivity_alerts: i32,
    pub low_activity_met_minutes: i32,
    pub low_activity_time: i32,
    pub medium_activity_met_minutes: i32,
    pub medium_activity_time: i32,
    pub met: MetSeries,
    pub meters_to_target: i32,
    pub non_wear_time: i32,
    pub resting_time: i32,
    pub sedentary_met_minutes: i32,
    pub sedentary_time: i32,
    pub steps: i32,
    pub target_calories: i32,
    pub target_meters: i32,
    pub total_calories: i32,
    pub day: CalendarDate,
    pub timestamp: OffsetTimestamp,
}

impl Record for DailyActivityRecord {
    const KIND: &'static str = "daily_activity";
    const REQUIRED_KEYS: &'static [&'static str] = &[
        "id",
        "class_5_min",
        "score",
        "active_calories",
        "average_met_minutes",
        "contributors",
        "equivalent_walking_distance",
        "high_activity_met_minutes",
        "high_activity_time",
        "inactivity_alerts",
        "low_activity_met_minutes",
        "low_activity_time",
        "medium_activity_met_minutes",
        "medium_activity_time",
        "met",
        "meters_to_target",
        "non_wear_time",
        "resting_time",
        "sedentary_met_minutes",
        "sedentary_time",
        "steps",
        "target_calories",
        "target_meters",
        "total_calories",
        "day",
        "timestamp",
    ];

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.required("id")?,
            class_5_min: fields.required("class_5_min")?,
            score: fields.required("score")?,
            active_calories: fields.required("active_calories")?,
            average_met_minutes: fields.required("average_met_minutes")?,
            contributors: fields.required("contributors")?,
            equivalent_walking_distance: fields.required("equivalent_walking_distance")?,
            high_activity_met_minutes: fields.required("high_activity_met_minutes")?,
            high_activity_time: fields.required("high_activity_time")?,
            inactivity_alerts: fields.required("inactivity_alerts")?,
            low_activity_met_minutes: fields.required("low_activity_met_minutes")?,
            low_activity_time: fields.required("low_activity_time")?,
            medium_activity_met_minutes: fields.required("medium_activity_met_minutes")?,
            medium_activity_time: fields.required("medium_activity_time")?,
            met: fields.required("met")?,
            meters_to_target: fields.required("meters_to_target")?,
            non_wear_time: fields.required("non_wear_time")?,
            resting_time: fields.required("resting_time")?,
            sedentary_met_minutes: fields.required("sedentary_met_minutes")?,
            sedentary_time: fields.required("sedentary_time")?,
            steps: fields.required("steps")?,
            target_calories: fields.required("target_calories")?,
            target_meters: fields.required("target_meters")?,
            total_calories: fields.required("total_calories")?,
            day: fields.required("day")?,
            timestamp: fields.required("timestamp")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Personal info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfoRecord {
    pub id: String,
    pub age: i32,
    pub height: f32,
    pub weight: f32,
    pub biological_sex: String,
    pub email: String,
}

impl Record for PersonalInfoRecord {
    const KIND: &'static str = "personal_info";
    const REQUIRED_KEYS: &'static [&'static str] =
        &["id", "age", "height", "weight", "biological_sex", "email"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.required("id")?,
            age: fields.required("age")?,
            height: fields.required("height")?,
            weight: fields.required("weight")?,
            biological_sex: fields.required("biological_sex")?,
            email: fields.required("email")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Sleep time
// ---------------------------------------------------------------------------

/// Recommended bedtime window, as offsets in seconds from midnight of the
/// day in timezone `day_tz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalBedtime {
    pub day_tz: i32,
    pub end_offset: i32,
    pub start_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepTimeRecord {
    pub id: String,
    pub day: CalendarDate,
    /// `Null` when the API could not compute a recommendation.
    #[serde(default, skip_serializing_if = "Presence::is_missing")]
    pub optimal_bedtime: Presence<OptimalBedtime>,
    pub recommendation: String,
    pub status: String,
}

impl SleepTimeRecord {
    pub fn optimal_bedtime(&self) -> Option<&OptimalBedtime> {
        self.optimal_bedtime.as_option()
    }
}

impl Record for SleepTimeRecord {
    const KIND: &'static str = "sleep_time";
    const REQUIRED_KEYS: &'static [&'static str] = &["id", "day", "recommendation", "status"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.required("id")?,
            day: fields.required("day")?,
            optimal_bedtime: fields.optional("optimal_bedtime")?,
            recommendation: fields.required("recommendation")?,
            status: fields.required("status")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Sleep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepContributors {
    pub deep_sleep: i32,
    pub efficiency: i32,
    pub latency: i32,
    pub rem_sleep: i32,
    pub restfulness: i32,
    pub timing: i32,
    pub total_sleep: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSessionRecord {
    pub id: String,
    pub contributors: SleepContributors,
    pub day: CalendarDate,
    pub score: i32,
    pub timestamp: OffsetTimestamp,
}

impl Record for SleepSessionRecord {
    const KIND: &'static str = "sleep";
    const REQUIRED_KEYS: &'static [&'static str] = &["id", "contributors", "day", "score", "timestamp"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: fields.required("id")?,
            contributors: fields.required("contributors")?,
            day: fields.required("day")?,
            score: fields.required("score")?,
            timestamp: fields.required("timestamp")?,
        })
    }
}
