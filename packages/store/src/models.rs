//! # Domain models for users and meals
//!
//! Defines the data structures exchanged with the Daily Diet backend and held
//! in client memory. These types are `Serialize + Deserialize` so they can go
//! straight onto the wire. Server responses use underscore_case field names
//! (`on_diet`, `photo_url`, `first_name`), which is also idiomatic Rust, so
//! those need no renaming; the sign-up request body is the exception and
//! [`NewAccount`] renames to camelCase.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The signed-in account: identity, profile fields, and optional physical attributes (`weight`, `height`, `goal`). The server is authoritative; the client keeps a read-mostly cached copy. |
//! | [`Meal`] | One meal record: name, description, calendar date, time of day (`HH:MM` on the wire), diet-compliance flag, optional calorie count. |
//! | [`MealDraft`] | A [`Meal`] without an `id`, submitted on create/update. [`MealDraft::validate`] enforces the no-future-dates rule before anything touches the network. |
//! | [`NewAccount`] | The sign-up payload. Serializes with camelCase keys; `photoUrl` is omitted from the wire when unset. |

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The signed-in user's account record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Body weight in kilograms, if the user filled it in.
    #[serde(default)]
    pub weight: Option<f32>,
    /// Height in centimeters.
    #[serde(default)]
    pub height: Option<f32>,
    /// Free-form diet goal, e.g. "lose weight".
    #[serde(default)]
    pub goal: Option<String>,
}

impl User {
    /// Full name, falling back to the email address when both name parts are empty.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// One meal record as stored by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub on_diet: bool,
    #[serde(default)]
    pub calories: Option<u32>,
}

impl Meal {
    /// Total ordering key: date first, then time, then id as a stable tie-break.
    pub(crate) fn sort_key(&self) -> (NaiveDate, NaiveTime, u64) {
        (self.date, self.time, self.id)
    }
}

/// A meal as entered by the user, before the server has assigned an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub on_diet: bool,
    #[serde(default)]
    pub calories: Option<u32>,
}

impl MealDraft {
    /// Reject drafts dated strictly after `today`. Runs before any network call.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.date > today {
            return Err(ValidationError::FutureDate { date: self.date });
        }
        Ok(())
    }
}

/// Sign-up payload for `POST /users`.
///
/// The one asymmetry in the wire contract: the backend expects camelCase
/// keys in this request (`firstName`, `photoUrl`) even though its responses
/// use underscore_case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Serde helper for the server's fixed-width `HH:MM` time format.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            // Some servers echo seconds back; accept both.
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_time_uses_hhmm_on_the_wire() {
        let meal = Meal {
            id: 1,
            name: "Lunch".into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            on_diet: true,
            calories: Some(600),
        };

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["time"], "12:30");
        assert_eq!(json["date"], "2025-03-10");
        assert_eq!(json["on_diet"], true);

        let back: Meal = serde_json::from_value(json).unwrap();
        assert_eq!(back, meal);
    }

    #[test]
    fn meal_time_accepts_seconds() {
        let meal: Meal = serde_json::from_str(
            r#"{"id":2,"name":"Tea","date":"2025-03-10","time":"16:05:00","on_diet":false}"#,
        )
        .unwrap();
        assert_eq!(meal.time, NaiveTime::from_hms_opt(16, 5, 0).unwrap());
        assert_eq!(meal.calories, None);
        assert!(meal.description.is_empty());
    }

    #[test]
    fn new_account_uses_camel_case_on_the_wire() {
        let account = NewAccount {
            email: "a@b.com".into(),
            password: "secret".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            photo_url: Some("http://x/p.png".into()),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["photoUrl"], "http://x/p.png");
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn new_account_omits_unset_photo_url() {
        let account = NewAccount {
            email: "a@b.com".into(),
            password: "secret".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            photo_url: None,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("photoUrl"));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut user = User {
            id: "u1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            photo_url: None,
            weight: None,
            height: None,
            goal: None,
        };
        assert_eq!(user.display_name(), "Ada Lovelace");

        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "ada@example.com");
    }
}
