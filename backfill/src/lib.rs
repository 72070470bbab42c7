use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb as ddb;
use aws_sdk_dynamodb::config::Region;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use submissions::clock::iso_timestamp;
use submissions::{store, Clock, IdGenerator, SystemClock, UuidGenerator};
use submissions::{CREATED_AT, GAME_TITLE, SUBMISSION_ID, UPDATED_AT, USER_ID};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const TABLE_PREFIX: &str = "gametime-api-videogame-submissions";
pub const INPUT_FILE: &str = "data.json";

pub type Record = Map<String, Value>;
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct BackfillConfig {
    pub table_prefix: String,
    pub region: String,
    pub input_path: PathBuf,
    /// Local DynamoDB endpoint, if any.
    pub endpoint_url: Option<String>,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        BackfillConfig {
            table_prefix: String::from(TABLE_PREFIX),
            region: String::from(store::DEFAULT_REGION),
            input_path: PathBuf::from(INPUT_FILE),
            endpoint_url: None,
        }
    }
}

impl BackfillConfig {
    pub fn table_name(&self, environment: &str) -> String {
        format!("{}-{}", self.table_prefix, environment)
    }
}

#[derive(Debug, Error)]
pub enum BackfillError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("{} is not a JSON array of objects: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("environment name must not be empty")]
    EmptyEnvironment,
    #[error("record {index} has no {field} field")]
    MissingField { index: usize, field: &'static str },
    #[error("writing record {index} to {table} failed: {source}")]
    Write { index: usize, table: String, source: SinkError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackfillSummary {
    pub table_name: String,
    pub written: usize,
}

/// Destination for enriched records, one call per item.
#[async_trait]
pub trait ItemSink {
    async fn put_item(&self, table: &str, item: Record) -> Result<(), SinkError>;
}

pub struct DynamoSink {
    client: ddb::Client,
}

impl DynamoSink {
    pub fn new(client: ddb::Client) -> Self {
        DynamoSink { client }
    }
}

#[async_trait]
impl ItemSink for DynamoSink {
    async fn put_item(&self, table: &str, item: Record) -> Result<(), SinkError> {
        self.client.put_item()
            .table_name(table)
            .set_item(Some(to_item(&item)?))
            .send()
            .await?;
        Ok(())
    }
}

/// Client pinned to the configured region rather than the ambient one.
pub async fn dynamo_client(config: &BackfillConfig) -> ddb::Client {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;
    store::client_from_conf(&sdk_config, config.endpoint_url.clone())
}

pub fn load_records(path: &Path) -> Result<Vec<Record>, BackfillError> {
    let text = fs::read_to_string(path).map_err(|source| BackfillError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| BackfillError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Copies `record` and stamps the generated fields over it.
pub fn enrich(record: &Record, submission_id: String, timestamp: &str) -> Record {
    let mut item = record.clone();
    for reserved in [SUBMISSION_ID, CREATED_AT, UPDATED_AT] {
        if item.contains_key(reserved) {
            warn!("input field {} is overwritten by the generated value", reserved);
        }
    }
    item.insert(String::from(SUBMISSION_ID), Value::String(submission_id));
    item.insert(String::from(CREATED_AT), Value::String(timestamp.to_string()));
    item.insert(String::from(UPDATED_AT), Value::String(timestamp.to_string()));
    item
}

fn field_text(record: &Record, index: usize, field: &'static str) -> Result<String, BackfillError> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s.to_owned()),
        Some(other) => Ok(other.to_string()),
        None => Err(BackfillError::MissingField { index, field }),
    }
}

pub fn progress_line(record: &Record, index: usize) -> Result<String, BackfillError> {
    let title = field_text(record, index, GAME_TITLE)?;
    let user = field_text(record, index, USER_ID)?;
    Ok(format!("Writing: {} ({})", title, user))
}

pub struct Backfill<S, C = SystemClock, I = UuidGenerator> {
    config: BackfillConfig,
    sink: S,
    clock: C,
    ids: I,
}

impl<S: ItemSink> Backfill<S> {
    pub fn new(config: BackfillConfig, sink: S) -> Self {
        Backfill { config, sink, clock: SystemClock, ids: UuidGenerator }
    }
}

impl<S: ItemSink, C: Clock, I: IdGenerator> Backfill<S, C, I> {
    pub fn with_generators(config: BackfillConfig, sink: S, clock: C, ids: I) -> Self {
        Backfill { config, sink, clock, ids }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Writes every record, in order, stopping at the first failure.
    /// Items written before a failure are left in place.
    pub async fn run(&self, environment: &str, records: &[Record]) -> Result<BackfillSummary, BackfillError> {
        if environment.is_empty() {
            return Err(BackfillError::EmptyEnvironment);
        }
        let table_name = self.config.table_name(environment);
        info!("Using environment: {}", environment);
        info!("Target DynamoDB table: {}", table_name);

        for (index, record) in records.iter().enumerate() {
            let timestamp = iso_timestamp(self.clock.now());
            let item = enrich(record, self.ids.next_id(), &timestamp);
            let line = progress_line(&item, index)?;
            info!("{}", line);
            debug!("item {}: {:?}", index, item);
            self.sink.put_item(&table_name, item)
                .await
                .map_err(|source| BackfillError::Write {
                    index,
                    table: table_name.clone(),
                    source,
                })?;
        }

        info!("All items inserted successfully.");
        Ok(BackfillSummary { table_name, written: records.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_table_name_uses_prefix() {
        let config = BackfillConfig::default();
        assert_eq!(config.table_name("dev"), "gametime-api-videogame-submissions-dev");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.input_path, PathBuf::from("data.json"));
    }

    #[test]
    fn test_enrich_keeps_input_fields() {
        let input = record(json!({"gameTitle": "A", "userId": "u1", "hoursPlayed": 3}));
        let item = enrich(&input, String::from("id-1"), "2024-05-01T10:00:00.000Z");
        assert_eq!(item["gameTitle"], "A");
        assert_eq!(item["userId"], "u1");
        assert_eq!(item["hoursPlayed"], 3);
        assert_eq!(item["submissionId"], "id-1");
        assert_eq!(item["createdAt"], item["updatedAt"]);
        assert_eq!(item.len(), 6);
    }

    #[test]
    fn test_enrich_overwrites_reserved_names() {
        let input = record(json!({"gameTitle": "A", "userId": "u1", "submissionId": "old", "createdAt": "yesterday"}));
        let item = enrich(&input, String::from("new"), "2024-05-01T10:00:00.000Z");
        assert_eq!(item["submissionId"], "new");
        assert_eq!(item["createdAt"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_progress_line() {
        let line = progress_line(&record(json!({"gameTitle": "Hades", "userId": 42})), 0).unwrap();
        assert_eq!(line, "Writing: Hades (42)");
        let err = progress_line(&record(json!({"userId": "u1"})), 3).unwrap_err();
        assert!(matches!(err, BackfillError::MissingField { index: 3, field: "gameTitle" }));
    }

    #[test]
    fn test_load_records_rejects_non_array() {
        let path = std::env::temp_dir().join(format!("backfill-not-array-{}.json", std::process::id()));
        fs::write(&path, "{\"gameTitle\": \"A\"}").unwrap();
        let err = load_records(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, BackfillError::Parse { .. }));
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/nonexistent/backfill/data.json")).unwrap_err();
        assert!(matches!(err, BackfillError::Read { .. }));
    }
}
