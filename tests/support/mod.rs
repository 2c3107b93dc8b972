#![allow(dead_code)]

use deepgram_rest::DeepgramClient;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

pub fn client_for(server: &MockServer) -> DeepgramClient {
    DeepgramClient::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .build()
        .expect("client builds")
}

/// Number of requests the mock server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

/// Values of `key` across the query strings of all received requests.
pub async fn query_values(server: &MockServer, key: &str) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .flat_map(|request| {
            request
                .url
                .query_pairs()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}
