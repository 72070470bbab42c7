use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb as ddb;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::from_item;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

use crate::SUBMISSION_ID;

pub const SUBMISSIONS_TABLE_NAME: &str = "VIDEO_GAME_SUBMISSIONS_TABLE";
pub const DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Dynamo(#[from] ddb::Error),
    #[error("could not decode item: {0}")]
    Decode(#[from] serde_dynamo::Error),
}

/// Reads a stored item back as plain JSON fields.
pub fn decode_item(item: HashMap<String, AttributeValue>) -> Result<Map<String, Value>, serde_dynamo::Error> {
    from_item(item)
}

pub fn table_name_from_env() -> Result<String, env::VarError> {
    env::var(SUBMISSIONS_TABLE_NAME)
}

/// Builds a DynamoDB client, falling back to `region` when the environment names none.
/// `DYNAMODB_ENDPOINT` redirects the client to a local DynamoDB.
pub async fn client(region: &'static str) -> ddb::Client {
    let region_provider = RegionProviderChain::default_provider().or_else(region);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;
    client_from_conf(&config, env::var(DYNAMODB_ENDPOINT).ok())
}

pub fn client_from_conf(config: &aws_config::SdkConfig, endpoint: Option<String>) -> ddb::Client {
    let ddb_config = match endpoint {
        Some(endpoint) => ddb::config::Builder::from(config).endpoint_url(endpoint).build(),
        None => ddb::config::Builder::from(config).build(),
    };
    ddb::Client::from_conf(ddb_config)
}

pub async fn get_submission(client: &ddb::Client, table: &str, id: &str) -> Result<Option<Map<String, Value>>, StoreError> {
    let output = client.get_item()
        .table_name(table)
        .key(SUBMISSION_ID, AttributeValue::S(id.to_string()))
        .send()
        .await
        .map_err(ddb::Error::from)?;
    Ok(output.item().cloned().map(decode_item).transpose()?)
}

/// Reads every page of an index query on `key = value`.
pub async fn query_index(
    client: &ddb::Client,
    table: &str,
    index: &str,
    key: &str,
    value: &str,
    newest_first: bool,
) -> Result<Vec<Map<String, Value>>, StoreError> {
    let mut pages = client.query()
        .table_name(table)
        .index_name(index)
        .key_condition_expression("#key = :value")
        .expression_attribute_names("#key", key)
        .expression_attribute_values(":value", AttributeValue::S(value.to_string()))
        .scan_index_forward(!newest_first)
        .into_paginator()
        .send();
    let mut items = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.map_err(ddb::Error::from)?;
        for item in page.items() {
            items.push(decode_item(item.clone())?);
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_item() {
        let item = HashMap::from([
            (String::from("gameTitle"), AttributeValue::S(String::from("Celeste"))),
            (String::from("hoursPlayed"), AttributeValue::N(String::from("40.5"))),
            (String::from("notes"), AttributeValue::Null(true)),
            (String::from("tags"), AttributeValue::L(vec![AttributeValue::S(String::from("platformer"))])),
        ]);
        let decoded = decode_item(item).unwrap();
        assert_eq!(decoded["gameTitle"], "Celeste");
        assert_eq!(decoded["hoursPlayed"].as_f64(), Some(40.5));
        assert!(decoded["notes"].is_null());
        assert_eq!(decoded["tags"][0], "platformer");
    }
}
