use lambda_http::Error;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use submissions::{store, CompletionType, Platform, GAME_INDEX, GAME_TITLE};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourStats {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub game_title: String,
    pub total_submissions: usize,
    pub overall: OverallStats,
    pub by_completion_type: BTreeMap<&'static str, HourStats>,
    pub by_platform: BTreeMap<&'static str, HourStats>,
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn hour_stats(hours: &[f64]) -> Option<HourStats> {
    if hours.is_empty() {
        return None;
    }
    let sum: f64 = hours.iter().sum();
    Some(HourStats {
        count: hours.len(),
        average: round_tenth(sum / hours.len() as f64),
        min: hours.iter().copied().fold(f64::INFINITY, f64::min),
        max: hours.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

fn field<'a>(submission: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    submission.get(name).and_then(Value::as_str)
}

/// Aggregates hours played overall, per completion type and per platform.
/// Submissions without a numeric `hoursPlayed` only count toward the total.
pub fn calculate_stats(submissions: &[Map<String, Value>], game_title: &str) -> GameStats {
    let mut all_hours = Vec::new();
    let mut by_completion: BTreeMap<CompletionType, Vec<f64>> = BTreeMap::new();
    let mut by_platform: BTreeMap<Platform, Vec<f64>> = BTreeMap::new();

    for submission in submissions {
        let Some(hours) = submission.get("hoursPlayed").and_then(Value::as_f64) else {
            continue;
        };
        all_hours.push(hours);
        if let Some(Ok(completion)) = field(submission, "completionType").map(str::parse::<CompletionType>) {
            by_completion.entry(completion).or_default().push(hours);
        }
        if let Some(Ok(platform)) = field(submission, "platform").map(str::parse::<Platform>) {
            by_platform.entry(platform).or_default().push(hours);
        }
    }

    let overall = hour_stats(&all_hours);
    GameStats {
        game_title: game_title.to_string(),
        total_submissions: submissions.len(),
        overall: OverallStats {
            average: overall.as_ref().map(|s| s.average),
            min: overall.as_ref().map(|s| s.min),
            max: overall.as_ref().map(|s| s.max),
        },
        by_completion_type: by_completion
            .iter()
            .filter_map(|(c, hours)| hour_stats(hours).map(|s| (c.as_str(), s)))
            .collect(),
        by_platform: by_platform
            .iter()
            .filter_map(|(p, hours)| hour_stats(hours).map(|s| (p.as_str(), s)))
            .collect(),
    }
}

pub async fn game_submissions(game_title: &str) -> Result<Vec<Map<String, Value>>, Error> {
    let table_name = store::table_name_from_env()?;
    let ddb_client = store::client(store::DEFAULT_REGION).await;
    Ok(store::query_index(&ddb_client, &table_name, GAME_INDEX, GAME_TITLE, game_title, false).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submissions(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_stats_grouped() {
        let stats = calculate_stats(&submissions(json!([
            {"hoursPlayed": 30, "completionType": "Main Story", "platform": "PC"},
            {"hoursPlayed": 45, "completionType": "Main Story", "platform": "Switch"},
            {"hoursPlayed": 62, "completionType": "Completionist", "platform": "PC"}
        ])), "Hollow Knight");

        assert_eq!(stats.total_submissions, 3);
        assert_eq!(stats.overall, OverallStats { average: Some(45.7), min: Some(30.0), max: Some(62.0) });
        assert_eq!(
            stats.by_completion_type["Main Story"],
            HourStats { count: 2, average: 37.5, min: 30.0, max: 45.0 }
        );
        assert_eq!(stats.by_completion_type["Completionist"].count, 1);
        assert!(!stats.by_completion_type.contains_key("Main + Extras"));
        assert_eq!(stats.by_platform["PC"], HourStats { count: 2, average: 46.0, min: 30.0, max: 62.0 });
        assert_eq!(stats.by_platform.len(), 2);
    }

    #[test]
    fn test_lowercase_completion_type_grouped() {
        let stats = calculate_stats(&submissions(json!([
            {"hoursPlayed": 10, "completionType": "main + extras", "platform": "Dreamcast"}
        ])), "Tunic");
        assert_eq!(stats.by_completion_type["Main + Extras"].count, 1);
        assert!(stats.by_platform.is_empty());
    }

    #[test]
    fn test_non_numeric_hours_only_counted_in_total() {
        let stats = calculate_stats(&submissions(json!([
            {"hoursPlayed": "lots", "completionType": "Main Story"}
        ])), "Hades");
        assert_eq!(stats.total_submissions, 1);
        assert_eq!(stats.overall, OverallStats { average: None, min: None, max: None });
        assert!(stats.by_completion_type.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let stats = calculate_stats(&submissions(json!([
            {"hoursPlayed": 12, "completionType": "Main Story", "platform": "PC"}
        ])), "Celeste");
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["gameTitle"], "Celeste");
        assert_eq!(json["totalSubmissions"], 1);
        assert_eq!(json["byPlatform"]["PC"]["average"], 12.0);
        assert_eq!(json["byCompletionType"]["Main Story"]["max"], 12.0);
    }
}
