#![allow(dead_code)]

use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use serde_json::Value;
use toolbox_api::rocket;

pub fn client() -> Client {
    Client::tracked(rocket()).expect("valid rocket instance")
}

/// Post a json body to the provided uri.
pub fn post_json<'c>(client: &'c Client, uri: &str, body: &str) -> LocalResponse<'c> {
    client
        .post(uri.to_string())
        .header(ContentType::JSON)
        .body(body)
        .dispatch()
}

/// Assert the status of a response and parse its body as json.
pub fn expect_json(response: LocalResponse<'_>, expected: Status) -> Value {
    let status = response.status();
    let body = response.into_string().expect("a response body");
    if status != expected {
        panic!("Failed with status {} \nBody: \n{}\n", status, body);
    }
    serde_json::from_str(&body).expect("a json body")
}

/// Assert the status of a response and return its body as text.
pub fn expect_text(response: LocalResponse<'_>, expected: Status) -> String {
    let status = response.status();
    let body = response.into_string().expect("a response body");
    if status != expected {
        panic!("Failed with status {} \nBody: \n{}\n", status, body);
    }
    body
}
