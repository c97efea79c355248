//! Shared helpers for integration tests

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a reply API page body
///
/// `replies` is a list of `(ctime, message)` pairs; `next`/`is_end` form
/// the continuation cursor.
pub fn reply_page(replies: &[(i64, &str)], next: u64, is_end: bool) -> Value {
    json!({
        "code": 0,
        "message": "0",
        "data": {
            "replies": replies
                .iter()
                .map(|(ctime, message)| json!({
                    "ctime": ctime,
                    "content": { "message": message }
                }))
                .collect::<Vec<_>>(),
            "cursor": { "next": next, "is_end": is_end }
        }
    })
}

/// Mount a mock serving `body` for the given cursor value
///
/// `expected_hits` pins the exact number of requests the test allows for
/// this cursor; wiremock verifies it when the server shuts down.
pub async fn mount_page(server: &MockServer, cursor: u64, body: Value, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/x/v2/reply/main"))
        .and(query_param("next", cursor.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}
