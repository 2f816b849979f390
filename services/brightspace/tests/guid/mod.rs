use crate::mock::{self, MockHttpSend};
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use test_case::test_case;
use valence_brightspace::{Client, Guid, GuidStatus};
use valence_core::{Context, ErrorKind};

fn envelope(v: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<string xmlns="http://www.desire2learn.com/">{v}</string>"#
    )
}

#[tokio::test]
async fn test_generate_guid() {
    let mock = MockHttpSend::new().reply(StatusCode::OK, envelope("9f4c1e0b27a34d5e"));
    let client = mock::client(&mock);

    let guid = client.generate_guid("A-1815").await.unwrap();
    assert_eq!(guid.as_str(), "9f4c1e0b27a34d5e");

    let req = &mock.requests()[0];
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri.path(), "/d2l/guids/D2L.Guid.2.asmx/GenerateExpiringGuid");
    assert_eq!(
        req.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );

    let form: Vec<(String, String)> = req.form();
    let expected: Vec<(String, String)> = [
        ("guidType", "SSO"),
        ("orgId", "6606"),
        ("installCode", "ACME-INSTALL"),
        ("TTL", "90"),
        ("data", "A-1815"),
        ("key", "guid-shared-secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(form, expected);
}

#[tokio::test]
async fn test_validate_guid_sends_guid() {
    let mock = MockHttpSend::new().reply(StatusCode::OK, envelope("OK"));
    let client = mock::client(&mock);

    let ok = client
        .validate_guid(&Guid::new("9f4c1e0b27a34d5e"), "A-1815")
        .await
        .unwrap();
    assert!(ok);

    let req = &mock.requests()[0];
    assert_eq!(req.uri.path(), "/d2l/guids/D2L.Guid.2.asmx/ValidateGuid");
    let form = req.form();
    assert!(form.contains(&("guid".to_string(), "9f4c1e0b27a34d5e".to_string())));
    assert!(form.contains(&("data".to_string(), "A-1815".to_string())));
}

#[test_case("EXPIRED", GuidStatus::Expired; "expired")]
#[test_case("INVALID_GUID", GuidStatus::InvalidGuid; "invalid guid")]
#[test_case("INVALID_DATA", GuidStatus::InvalidData; "invalid data")]
#[test_case("ERROR", GuidStatus::Error; "error")]
#[test_case("UNKNOWN_VERSION", GuidStatus::UnknownVersion; "unknown version")]
#[test_case("NO_DB_CONNECTION", GuidStatus::NoDbConnection; "no db connection")]
#[tokio::test]
async fn test_validate_guid_rejections(answer: &str, status: GuidStatus) {
    let mock = MockHttpSend::new()
        .reply(StatusCode::OK, envelope(answer))
        .reply(StatusCode::OK, envelope(answer));
    let client = mock::client(&mock);
    let guid = Guid::new("9f4c1e0b27a34d5e");

    assert!(!client.validate_guid(&guid, "A-1815").await.unwrap());
    assert_eq!(
        client.validate_guid_status(&guid, "A-1815").await.unwrap(),
        status
    );
}

#[tokio::test]
async fn test_validate_guid_non_xml_is_error() {
    let mock = MockHttpSend::new().reply(StatusCode::OK, "OK");
    let client = mock::client(&mock);

    let err = client
        .validate_guid(&Guid::new("9f4c1e0b27a34d5e"), "A-1815")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    assert!(err.message().contains("OK"));
}

#[tokio::test]
async fn test_generate_guid_malformed_xml_is_error() {
    let body = "<string>9f4c1e0b27a34d5e</strin>";
    let mock = MockHttpSend::new().reply(StatusCode::OK, body);
    let client = mock::client(&mock);

    let err = client.generate_guid("A-1815").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    assert!(err.message().contains(body));
}

#[test_case("<string/>"; "empty root")]
#[test_case("<r><a><b>x</b></a></r>"; "nested first child")]
#[tokio::test]
async fn test_generate_guid_without_scalar_is_error(body: &str) {
    let mock = MockHttpSend::new().reply(StatusCode::OK, body);
    let client = mock::client(&mock);

    let err = client.generate_guid("A-1815").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    assert!(err.message().contains(body));
}

#[tokio::test]
async fn test_generate_guid_rejected_status() {
    let mock = MockHttpSend::new().reply(StatusCode::INTERNAL_SERVER_ERROR, "Server Error");
    let client = mock::client(&mock);

    let err = client.generate_guid("A-1815").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.code(), 500);
}

#[tokio::test]
async fn test_guid_requires_install_settings() {
    let mock = MockHttpSend::new();
    let mut cfg = mock::config();
    cfg.install_code = None;
    let client = Client::new(Context::new().with_http_send(mock.clone()), cfg).unwrap();

    let err = client.generate_guid("A-1815").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(err.message().contains("install_code"));
    assert!(mock.requests().is_empty());
}
