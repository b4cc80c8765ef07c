use std::path::PathBuf;
mod common;
use common::*;
use config::{Config, PathType};
use rocket::error::ErrorKind;
use rocket::http::Status;
use rocket::local::blocking::Client;
use toolbox_api::rocket;
use utils::test_utils::AlteredToml;

/// Settings are read from the configuration file each time the api is started. Both cases share one test,
/// as they rewrite the same file.
#[test]
fn configuration_changes_apply() {
    {
        let _t = AlteredToml::new(
            "SHORT_CODE_LENGTH",
            "10",
            PathType::General,
            PathBuf::from("./config"),
        );

        let client = client();
        let cfg: &Config = client.rocket().state::<Config>().unwrap();
        assert_eq!(cfg.SHORT_CODE_LENGTH(), 10);

        let body = expect_json(
            post_json(&client, "/api/v1/shorten", "{\"url\": \"https://example.com\"}"),
            Status::Created,
        );
        assert_eq!(body["code"].as_str().unwrap().len(), 10);
    }

    {
        let _t = AlteredToml::new(
            "GRADIENT_MAX_STOPS",
            "1",
            PathType::General,
            PathBuf::from("./config"),
        );

        // A gradient cannot have fewer than two stops, so the api refuses to launch.
        let err = Client::tracked(rocket())
            .err()
            .expect("launch should fail");
        assert!(matches!(err.kind(), ErrorKind::FailedFairings(_)));
    }

    // The original file is restored once the alteration is dropped.
    let client = client();
    let cfg: &Config = client.rocket().state::<Config>().unwrap();
    assert_eq!(cfg.SHORT_CODE_LENGTH(), 6);
    assert_eq!(cfg.GRADIENT_MAX_STOPS(), 10);
}
