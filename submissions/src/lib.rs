pub mod catalog;
pub mod clock;
#[cfg(feature = "http")]
pub mod http;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use catalog::{normalize_text, CompletionType, Platform};
pub use clock::{Clock, IdGenerator, SystemClock, UuidGenerator};

pub const SUBMISSION_ID: &str = "submissionId";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";
pub const GAME_TITLE: &str = "gameTitle";
pub const USER_ID: &str = "userId";

/// Secondary index keyed by `userId`.
pub const USER_INDEX: &str = "UserIndex";
/// Secondary index keyed by normalized `gameTitle`.
pub const GAME_INDEX: &str = "GameIndex";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub user_id: String,
    pub game_title: String,
    pub platform: Platform,
    pub completion_type: CompletionType,
    pub hours_played: f64,
    pub difficulty: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Submission {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[test]
fn test_submission_serializes_camel_case() {
    let submission = Submission {
        submission_id: String::from("abc"),
        user_id: String::from("u1"),
        game_title: String::from("Hollow Knight"),
        platform: Platform::Switch,
        completion_type: CompletionType::MainStory,
        hours_played: 27.5,
        difficulty: String::from("N/A"),
        notes: None,
        created_at: String::from("2024-05-01T10:00:00.000Z"),
        updated_at: String::from("2024-05-01T10:00:00.000Z"),
    };
    let json = submission.to_json().unwrap();
    assert_eq!(json["submissionId"], "abc");
    assert_eq!(json["platform"], "Switch");
    assert_eq!(json["completionType"], "Main Story");
    assert_eq!(json["hoursPlayed"], 27.5);
    assert!(json["notes"].is_null());
}
