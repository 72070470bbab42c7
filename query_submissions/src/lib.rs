use lambda_http::Error;
use serde_json::{json, Map, Value};
use submissions::{normalize_text, store, GAME_INDEX, GAME_TITLE, USER_ID, USER_INDEX};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryTarget {
    SubmissionId(String),
    User(String),
    /// Already normalized.
    Game(String),
}

fn given(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A path id wins over `userId`, which wins over `gameTitle`.
pub fn resolve_target(id: Option<&str>, user_id: Option<&str>, game_title: Option<&str>) -> Option<QueryTarget> {
    if let Some(id) = given(id) {
        Some(QueryTarget::SubmissionId(id.to_string()))
    } else if let Some(user_id) = given(user_id) {
        Some(QueryTarget::User(user_id.to_string()))
    } else {
        given(game_title).map(|title| QueryTarget::Game(normalize_text(title)))
    }
}

pub fn listing_body(items: Vec<Map<String, Value>>) -> Value {
    json!({
        "count": items.len(),
        "submissions": items
    })
}

pub enum QueryResult {
    One(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
    NotFound,
}

pub async fn query_submissions(target: &QueryTarget) -> Result<QueryResult, Error> {
    let table_name = store::table_name_from_env()?;
    let ddb_client = store::client(store::DEFAULT_REGION).await;

    Ok(match target {
        QueryTarget::SubmissionId(id) => match store::get_submission(&ddb_client, &table_name, id).await? {
            Some(item) => QueryResult::One(item),
            None => QueryResult::NotFound,
        },
        QueryTarget::User(user_id) => QueryResult::Many(
            store::query_index(&ddb_client, &table_name, USER_INDEX, USER_ID, user_id, true).await?
        ),
        QueryTarget::Game(title) => QueryResult::Many(
            store::query_index(&ddb_client, &table_name, GAME_INDEX, GAME_TITLE, title, true).await?
        ),
    })
}
