use lambda_http::Error;
use serde::Deserialize;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;
use submissions::catalog::CatalogError;
use submissions::clock::iso_timestamp;
use submissions::{store, Clock, CompletionType, IdGenerator, Platform, Submission};
use thiserror::Error;

pub const DEFAULT_DIFFICULTY: &str = "N/A";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub user_id: Option<String>,
    pub game_title: Option<String>,
    pub hours_played: Option<f64>,
    pub platform: Option<String>,
    pub completion_type: Option<String>,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required fields, please check: userId, gameTitle, hoursPlayed, platform, completionType")]
    MissingFields,
    #[error("You must have played at least one hour to make a submission")]
    NoHoursPlayed,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Validates the request and stamps a new submission with a fresh id and timestamps.
pub fn build_submission(
    request: CreateSubmissionRequest,
    clock: &impl Clock,
    ids: &impl IdGenerator,
) -> Result<Submission, ValidationError> {
    let (Some(user_id), Some(game_title), Some(hours_played), Some(platform), Some(completion_type)) = (
        present(request.user_id),
        present(request.game_title),
        request.hours_played.filter(|h| *h != 0.0),
        present(request.platform),
        present(request.completion_type),
    ) else {
        return Err(ValidationError::MissingFields);
    };
    if hours_played < 0.0 {
        return Err(ValidationError::NoHoursPlayed);
    }
    let platform: Platform = platform.parse()?;
    let completion_type: CompletionType = completion_type.parse()?;

    let now = iso_timestamp(clock.now());
    Ok(Submission {
        submission_id: ids.next_id(),
        user_id,
        game_title: submissions::normalize_text(&game_title),
        platform,
        completion_type,
        hours_played,
        difficulty: present(request.difficulty).unwrap_or_else(|| String::from(DEFAULT_DIFFICULTY)),
        notes: present(request.notes),
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn create_submission(submission: &Submission) -> Result<(), Error> {
    let table_name = store::table_name_from_env()?;
    let ddb_client = store::client(store::DEFAULT_REGION).await;

    ddb_client.put_item()
        .table_name(table_name)
        .set_item(Some(to_item(submission)?))
        .send()
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 11, 2, 18, 30, 0).unwrap()
        }
    }

    struct FixedId;

    impl IdGenerator for FixedId {
        fn next_id(&self) -> String {
            String::from("4e2967ee-a207-4a00-9a31-4a60443d5e96")
        }
    }

    fn valid_request() -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            user_id: Some(String::from("user-7")),
            game_title: Some(String::from("hollow knight")),
            hours_played: Some(41.5),
            platform: Some(String::from("switch")),
            completion_type: Some(String::from("Completionist")),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_submission_fills_defaults() {
        let submission = build_submission(valid_request(), &FixedClock, &FixedId).unwrap();
        assert_eq!(submission.submission_id, "4e2967ee-a207-4a00-9a31-4a60443d5e96");
        assert_eq!(submission.game_title, "Hollow Knight");
        assert_eq!(submission.platform, Platform::Switch);
        assert_eq!(submission.completion_type, CompletionType::Completionist);
        assert_eq!(submission.difficulty, "N/A");
        assert_eq!(submission.notes, None);
        assert_eq!(submission.created_at, "2024-11-02T18:30:00.000Z");
        assert_eq!(submission.created_at, submission.updated_at);
    }

    #[test]
    fn test_missing_fields() {
        let request = CreateSubmissionRequest { user_id: None, ..valid_request() };
        assert_eq!(build_submission(request, &FixedClock, &FixedId), Err(ValidationError::MissingFields));
        let request = CreateSubmissionRequest { hours_played: Some(0.0), ..valid_request() };
        assert_eq!(build_submission(request, &FixedClock, &FixedId), Err(ValidationError::MissingFields));
        let request = CreateSubmissionRequest { game_title: Some(String::from("  ")), ..valid_request() };
        assert_eq!(build_submission(request, &FixedClock, &FixedId), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_negative_hours() {
        let request = CreateSubmissionRequest { hours_played: Some(-3.0), ..valid_request() };
        assert_eq!(build_submission(request, &FixedClock, &FixedId), Err(ValidationError::NoHoursPlayed));
    }

    #[test]
    fn test_unknown_platform() {
        let request = CreateSubmissionRequest { platform: Some(String::from("Dreamcast")), ..valid_request() };
        let err = build_submission(request, &FixedClock, &FixedId).unwrap_err();
        assert!(err.to_string().starts_with("Invalid platform Dreamcast"));
    }

    #[test]
    fn test_submission_item_attributes() {
        let submission = build_submission(valid_request(), &FixedClock, &FixedId).unwrap();
        let item: HashMap<String, AttributeValue> = to_item(&submission).unwrap();
        assert_eq!(item["submissionId"], AttributeValue::S(String::from("4e2967ee-a207-4a00-9a31-4a60443d5e96")));
        assert_eq!(item["hoursPlayed"], AttributeValue::N(String::from("41.5")));
        assert_eq!(item["platform"], AttributeValue::S(String::from("Switch")));
        assert_eq!(item["notes"], AttributeValue::Null(true));
        assert_eq!(item["createdAt"], item["updatedAt"]);
    }

    #[test]
    fn test_request_from_body() {
        let request: CreateSubmissionRequest = serde_json::from_str(
            r#"{"userId":"u1","gameTitle":"celeste","hoursPlayed":9,"platform":"PC","completionType":"main story","notes":"B-sides"}"#,
        ).unwrap();
        let submission = build_submission(request, &FixedClock, &FixedId).unwrap();
        assert_eq!(submission.completion_type, CompletionType::MainStory);
        assert_eq!(submission.notes.as_deref(), Some("B-sides"));
        assert_eq!(submission.hours_played, 9.0);
    }
}
