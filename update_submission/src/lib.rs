use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use lambda_http::Error;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;
use serde_json::{Map, Value};
use std::collections::HashMap;
use submissions::catalog::CatalogError;
use submissions::{store, CompletionType, Platform, SUBMISSION_ID, UPDATED_AT};
use thiserror::Error;

const HOURS_PLAYED: &str = "hoursPlayed";
const PLATFORM: &str = "platform";
const COMPLETION_TYPE: &str = "completionType";
const NOTES: &str = "notes";

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("hoursPlayed must be greater than 0")]
    HoursPlayed,
    #[error("Nothing to update")]
    NothingToUpdate,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A DynamoDB `SET` expression plus its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: Map<String, Value>,
}

impl UpdatePlan {
    fn new(updated_at: &str) -> Self {
        let mut plan = UpdatePlan {
            expression: String::from("SET"),
            names: HashMap::new(),
            values: Map::new(),
        };
        plan.set(UPDATED_AT, Value::String(updated_at.to_string()));
        plan
    }

    fn set(&mut self, field: &str, value: Value) {
        if !self.names.is_empty() {
            self.expression.push(',');
        }
        self.expression.push_str(&format!(" #{field} = :{field}"));
        self.names.insert(format!("#{field}"), field.to_string());
        self.values.insert(format!(":{field}"), value);
    }
}

fn catalog_name(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

/// Builds the update for the fields present in `body`. `gameTitle` is never updated.
pub fn plan_update(body: &Map<String, Value>, updated_at: &str) -> Result<UpdatePlan, ValidationError> {
    let hours_played = body.get(HOURS_PLAYED);
    let platform = body.get(PLATFORM).filter(|v| !v.is_null());
    let completion_type = body.get(COMPLETION_TYPE).filter(|v| !v.is_null());
    let notes = body.get(NOTES);

    if let Some(hours) = hours_played {
        if !hours.as_f64().is_some_and(|h| h > 0.0) {
            return Err(ValidationError::HoursPlayed);
        }
    }
    let platform = match platform {
        Some(p) => Some(catalog_name(p).parse::<Platform>().map_err(|_| CatalogError::UnknownPlatform {
            given: p.as_str().map(str::to_string).unwrap_or_else(|| p.to_string()),
        })?),
        None => None,
    };
    let completion_type = match completion_type {
        Some(c) => Some(catalog_name(c).parse::<CompletionType>().map_err(|_| CatalogError::UnknownCompletionType {
            given: c.as_str().map(str::to_string).unwrap_or_else(|| c.to_string()),
        })?),
        None => None,
    };
    if hours_played.is_none() && platform.is_none() && completion_type.is_none() && notes.is_none() {
        return Err(ValidationError::NothingToUpdate);
    }

    let mut plan = UpdatePlan::new(updated_at);
    if let Some(hours) = hours_played {
        plan.set(HOURS_PLAYED, hours.clone());
    }
    if let Some(platform) = platform {
        plan.set(PLATFORM, Value::String(platform.to_string()));
    }
    if let Some(completion_type) = completion_type {
        plan.set(COMPLETION_TYPE, Value::String(completion_type.to_string()));
    }
    if let Some(notes) = notes {
        let notes = match notes {
            Value::String(s) if s.is_empty() => Value::Null,
            other => other.clone(),
        };
        plan.set(NOTES, notes);
    }
    Ok(plan)
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Map<String, Value>),
    NotFound,
}

pub async fn update_submission(id: &str, plan: UpdatePlan) -> Result<UpdateOutcome, Error> {
    let table_name = store::table_name_from_env()?;
    let ddb_client = store::client(store::DEFAULT_REGION).await;

    let result = ddb_client.update_item()
        .table_name(table_name)
        .key(SUBMISSION_ID, AttributeValue::S(id.to_string()))
        .update_expression(plan.expression)
        .set_expression_attribute_names(Some(plan.names))
        .set_expression_attribute_values(Some(to_item(&plan.values)?))
        .condition_expression("attribute_exists(submissionId)")
        .return_values(ReturnValue::AllNew)
        .send()
        .await;
    match result {
        Ok(output) => Ok(UpdateOutcome::Updated(
            output.attributes().cloned().map(store::decode_item).transpose()?.unwrap_or_default()
        )),
        Err(err) => {
            let missing = err.as_service_error()
                .map(|e| e.is_conditional_check_failed_exception())
                .unwrap_or(false);
            if missing {
                Ok(UpdateOutcome::NotFound)
            } else {
                Err(err.into())
            }
        }
    }
}
