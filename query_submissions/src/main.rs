use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use query_submissions::{listing_body, query_submissions, resolve_target, QueryResult};
use serde_json::Value;
use submissions::http::{error_response, internal_error, json_response};
use tracing::{debug, error};

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let path = event.path_parameters();
    let query = event.query_string_parameters();
    let target = match resolve_target(path.first("id"), query.first("userId"), query.first("gameTitle")) {
        Some(target) => target,
        None => return error_response(
            400,
            "Please provide either an id in the path or userId/gameTitle as query parameters",
        ),
    };
    debug!("query_submissions {:?}", target);

    match query_submissions(&target).await {
        Ok(QueryResult::One(item)) => json_response(200, &Value::Object(item)),
        Ok(QueryResult::Many(items)) => json_response(200, &listing_body(items)),
        Ok(QueryResult::NotFound) => error_response(404, "Submission not found"),
        Err(e) => {
            error!("error querying submissions: {}", e);
            internal_error()
        }
    }
}

const TRACE_DEBUG: &str = "TRACE_DEBUG";

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(match std::env::var(TRACE_DEBUG) {
            Ok(_) => tracing::Level::DEBUG,
            Err(_) => tracing::Level::INFO
        })
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    run(service_fn(function_handler)).await
}
