mod common;
use common::*;
use rocket::http::Status;
use rocket::uri;

const SUNSET: &str = "{
    \"type\": \"linear\",
    \"angle\": 90,
    \"stops\": [
        {\"color\": \"#FF512F\", \"position\": 0},
        {\"color\": \"#F09819\", \"position\": 100}
    ]
}";

#[test]
fn password_defaults() {
    let client = client();
    let body = expect_json(post_json(&client, "/api/v1/password", "{}"), Status::Ok);

    let password = body["password"].as_str().expect("a password");
    assert_eq!(password.chars().count(), 16);
    assert_eq!(body["length"], 16);
    assert_eq!(body["strength"], "Strong");
}

#[test]
fn password_options() {
    let client = client();
    let body = expect_json(
        post_json(
            &client,
            "/api/v1/password",
            "{\"length\": 30, \"uppercase\": false, \"symbols\": false}",
        ),
        Status::Ok,
    );

    let password = body["password"].as_str().unwrap();
    assert_eq!(password.len(), 30);
    assert!(password
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    assert_eq!(body["strength"], "Very Strong");
}

#[test]
fn password_rejections() {
    let client = client();

    let response = post_json(&client, "/api/v1/password", "{\"length\": 3}");
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "Password length must be between 4 and 100 characters"
    );

    let response = post_json(
        &client,
        "/api/v1/password",
        "{\"uppercase\": false, \"lowercase\": false, \"numbers\": false, \"symbols\": false}",
    );
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "Please select at least one character type"
    );

    let response = post_json(&client, "/api/v1/password", "{\"length\": \"long\"}");
    assert_eq!(response.status(), Status::UnprocessableEntity);

    let response = post_json(&client, "/api/v1/password", "");
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "No json body found!"
    );
}

#[test]
fn palette_generation() {
    let client = client();
    let body = expect_json(
        post_json(
            &client,
            "/api/v1/palette",
            "{\"color\": \"#FF0000\", \"harmony\": \"triadic\"}",
        ),
        Status::Ok,
    );

    assert_eq!(body["base"], "#ff0000");
    assert_eq!(body["harmony"], "Triadic");
    assert_eq!(
        body["colors"],
        serde_json::json!(["#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff"])
    );
    assert_eq!(body["joined"], "#ff0000, #00ff00, #0000ff, #ffff00, #ff00ff");

    // Analogous is used when no harmony is given.
    let body = expect_json(
        post_json(&client, "/api/v1/palette", "{\"color\": \"6366f1\"}"),
        Status::Ok,
    );
    assert_eq!(body["harmony"], "Analogous");
    assert_eq!(body["colors"][1], "#6366f1");
}

#[test]
fn palette_rejections() {
    let client = client();

    let response = post_json(&client, "/api/v1/palette", "{\"color\": \"blue\"}");
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "Invalid hex color (blue)"
    );

    let response = post_json(
        &client,
        "/api/v1/palette",
        "{\"color\": \"#000\", \"harmony\": \"pastel\"}",
    );
    assert_eq!(response.status(), Status::UnprocessableEntity);
}

#[test]
fn palette_harmonies() {
    let client = client();
    let body = expect_json(
        client.get(uri!("/api/v1/palette/harmonies")).dispatch(),
        Status::Ok,
    );
    let harmonies = body.as_array().unwrap();
    assert_eq!(harmonies.len(), 6);
    assert_eq!(harmonies[4]["name"], "Split Complementary");
    assert!(harmonies.iter().all(|h| h["description"].is_string()));
}

#[test]
fn gradient_css() {
    let client = client();
    let body = expect_json(post_json(&client, "/api/v1/gradient", SUNSET), Status::Ok);

    assert_eq!(
        body["css"],
        "linear-gradient(90deg, #FF512F 0%, #F09819 100%)"
    );
    assert_eq!(
        body["code"],
        "background: linear-gradient(90deg, #FF512F 0%, #F09819 100%);\n\
         background: -webkit-linear-gradient(90deg, #FF512F 0%, #F09819 100%);\n\
         background: -moz-linear-gradient(90deg, #FF512F 0%, #F09819 100%);"
    );
    assert_eq!(body["gradient"]["type"], "linear");

    let radial = "{
        \"type\": \"radial\",
        \"shape\": \"ellipse\",
        \"stops\": [
            {\"color\": \"#fff\", \"position\": 150},
            {\"color\": \"#000\", \"position\": 20}
        ]
    }";
    let body = expect_json(post_json(&client, "/api/v1/gradient", radial), Status::Ok);
    assert_eq!(body["css"], "radial-gradient(ellipse, #000 20%, #fff 100%)");
}

#[test]
fn gradient_rejections() {
    let client = client();

    let single = "{\"type\": \"linear\", \"stops\": [{\"color\": \"#fff\", \"position\": 0}]}";
    let response = post_json(&client, "/api/v1/gradient", single);
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "A gradient needs at least 2 color stops"
    );

    let steep = SUNSET.replace("\"angle\": 90", "\"angle\": 400");
    let response = post_json(&client, "/api/v1/gradient", &steep);
    assert_eq!(response.status(), Status::BadRequest);

    let bad_color = SUNSET.replace("#F09819", "orange");
    let response = post_json(&client, "/api/v1/gradient", &bad_color);
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "Invalid hex color (orange)"
    );
}

#[test]
fn gradient_stops() {
    let client = client();

    let added = expect_json(
        post_json(&client, "/api/v1/gradient/stops", SUNSET),
        Status::Ok,
    );
    let stops = added["gradient"]["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[2]["color"], "#f77424");
    assert_eq!(stops[2]["position"], 100.0);

    let three = serde_json::to_string(&added["gradient"]).unwrap();
    let removed = expect_json(
        post_json(&client, "/api/v1/gradient/stops/remove?index=2", &three),
        Status::Ok,
    );
    assert_eq!(
        removed["css"],
        "linear-gradient(90deg, #FF512F 0%, #F09819 100%)"
    );

    let response = post_json(&client, "/api/v1/gradient/stops/remove?index=0", SUNSET);
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn gradient_templates() {
    let client = client();
    let body = expect_json(
        client.get(uri!("/api/v1/gradient/templates")).dispatch(),
        Status::Ok,
    );
    let templates = body.as_array().unwrap();
    assert_eq!(templates.len(), 7);
    assert_eq!(templates[0]["name"], "Sunset");
    assert_eq!(
        templates[5]["css"],
        "radial-gradient(circle, #1A2980 0%, #26D0CE 100%)"
    );
}

#[test]
fn shorten_url() {
    let client = client();
    let body = expect_json(
        post_json(
            &client,
            "/api/v1/shorten",
            "{\"url\": \"https://example.com/a/very/long/path\"}",
        ),
        Status::Created,
    );

    assert_eq!(body["original"], "https://example.com/a/very/long/path");
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(
        body["short_url"],
        format!("http://localhost:8000/s/{}", code)
    );
    assert!(body["created"].is_string());

    // The fabricated link only leads to the notice page.
    let response = client.get(format!("/s/{}", code)).dispatch();
    assert_eq!(response.status(), Status::Ok);
}

#[test]
fn shorten_rejections() {
    let client = client();

    let response = post_json(&client, "/api/v1/shorten", "{\"url\": \"\"}");
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "Please enter a URL"
    );

    let response = post_json(&client, "/api/v1/shorten", "{\"url\": \"example.com\"}");
    assert_eq!(
        expect_text(response, Status::BadRequest),
        "Please enter a valid URL including http:// or https://"
    );
}
