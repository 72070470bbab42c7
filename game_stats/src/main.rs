use game_stats::{calculate_stats, game_submissions};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde_json::json;
use submissions::http::{error_response, internal_error, json_response};
use submissions::normalize_text;
use tracing::{error, info};

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let params = event.path_parameters();
    let raw_title = match params.first("gameTitle") {
        Some(title) if !title.is_empty() => title,
        _ => return error_response(400, "gameTitle is required"),
    };
    // Hollow%20Knight -> Hollow Knight
    let decoded = urlencoding::decode(raw_title).map(|t| t.into_owned()).unwrap_or_else(|_| raw_title.to_string());
    let game_title = normalize_text(&decoded);

    let submissions = match game_submissions(&game_title).await {
        Ok(submissions) => submissions,
        Err(e) => {
            error!("error querying {}: {}", game_title, e);
            return internal_error();
        }
    };
    if submissions.is_empty() {
        info!("no submissions for {}", game_title);
        return json_response(404, &json!({
            "error": "No submissions found for this game",
            "gameTitle": game_title
        }));
    }

    let stats = calculate_stats(&submissions, &game_title);
    json_response(200, &serde_json::to_value(&stats)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    run(service_fn(function_handler)).await
}
