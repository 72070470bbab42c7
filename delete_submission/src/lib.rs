use aws_sdk_dynamodb::types::AttributeValue;
use lambda_http::Error;
use serde_json::{json, Value};
use submissions::{store, SUBMISSION_ID};

#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub fn deleted_body(id: &str) -> Value {
    json!({
        "message": "Submission deleted successfully",
        "submissionId": id
    })
}

/// Deletes only an existing item, so a missing id surfaces as `NotFound`.
pub async fn delete_submission(id: &str) -> Result<DeleteOutcome, Error> {
    let table_name = store::table_name_from_env()?;
    let ddb_client = store::client(store::DEFAULT_REGION).await;

    let result = ddb_client.delete_item()
        .table_name(table_name)
        .key(SUBMISSION_ID, AttributeValue::S(id.to_string()))
        .condition_expression("attribute_exists(submissionId)")
        .send()
        .await;
    match result {
        Ok(_) => Ok(DeleteOutcome::Deleted),
        Err(err) => {
            let missing = err.as_service_error()
                .map(|e| e.is_conditional_check_failed_exception())
                .unwrap_or(false);
            if missing {
                Ok(DeleteOutcome::NotFound)
            } else {
                Err(err.into())
            }
        }
    }
}

#[test]
fn test_deleted_body() {
    assert_eq!(
        deleted_body("abc-123"),
        json!({"message": "Submission deleted successfully", "submissionId": "abc-123"})
    );
}
