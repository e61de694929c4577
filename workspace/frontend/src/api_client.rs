pub mod auth;
pub mod payments;
pub mod schedule;
pub mod statistics;

use common::ErrorResponse;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Turns a non-2xx response into the server's `error` text.
async fn error_text(method: &str, endpoint: &str, response: Response) -> String {
    log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
    match response.json::<ErrorResponse>().await {
        Ok(err) => {
            log::error!("{} {} - API error: {}", method, endpoint, err.error);
            err.error
        }
        Err(_) => {
            let error_msg = format!("HTTP error: {}", response.status());
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        }
    }
}

async fn parse<T: DeserializeOwned>(method: &str, endpoint: &str, response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(error_text(method, endpoint, response).await);
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data = response.json::<T>().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}

async fn send_json<T, B>(method: &str, endpoint: &str, builder: RequestBuilder, body: &B) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let response = builder
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        })?;

    parse(method, endpoint, response).await
}

/// Common GET request handler
pub async fn get<T: DeserializeOwned>(endpoint: &str) -> Result<T, String> {
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    parse("GET", endpoint, response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("POST request to: {}", url);
    send_json("POST", endpoint, Request::post(&url), body).await
}

/// Common PUT request handler
pub async fn put<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("PUT request to: {}", url);
    send_json("PUT", endpoint, Request::put(&url), body).await
}
