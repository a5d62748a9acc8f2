//! API Lambda handler: validates the request and hands slash commands to
//! `slash_handler`.

use super::{helpers, parsing, signature, slash_handler};
use crate::core::config::AppConfig;
use crate::errors::SlackError;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an error only when configuration is missing; malformed or unsigned
/// requests get an error response payload instead.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        let err = SlackError::ConfigError(e);
        error!("{}", err);
        Error::from(err)
    })?;

    let Some(headers) = event.payload.get("headers") else {
        error!("Request missing headers");
        return Ok(helpers::err_response(400, "Missing headers"));
    };

    let body = match parsing::extract_body(&event.payload) {
        Ok(b) => b,
        Err(e) => {
            error!("Invalid request body: {}", e);
            return Ok(helpers::err_response(400, &e.to_string()));
        }
    };

    if let Err(response) = verify_signature(&body, headers, &config) {
        return Ok(response);
    }

    info!("Slack signature verified successfully");

    match slash_handler::handle_slash_command(&config, &body).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Failed to parse Slack event: {}", e);
            Ok(helpers::err_response(400, &format!("Parse Error: {e}")))
        }
    }
}

fn verify_signature(body: &str, headers: &Value, config: &AppConfig) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(401, "Missing X-Slack-Signature header"));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, &config.slack_signing_secret) {
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}
