use crate::mock::{self, MockHttpSend};
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use valence_brightspace::ApiRequest;
use valence_core::ErrorKind;

fn data_set(id: &str) -> String {
    format!(r#"{{ "PluginId": "{id}", "Name": "Set {id}", "PreviousDataSets": null }}"#)
}

fn object_list_page(ids: &[&str], next: Option<&str>) -> String {
    let objects: Vec<String> = ids.iter().map(|id| data_set(id)).collect();
    let next = match next {
        Some(next) => format!(r#""{next}""#),
        None => "null".to_string(),
    };
    format!(r#"{{ "Next": {next}, "Objects": [{}] }}"#, objects.join(","))
}

fn user(id: i64) -> String {
    format!(
        r#"{{ "OrgId": 6606, "UserId": {id}, "FirstName": "U", "LastName": "{id}", "UserName": "user{id}" }}"#
    )
}

fn paged_result_set(ids: &[i64], bookmark: Option<&str>, has_more: bool) -> String {
    let items: Vec<String> = ids.iter().map(|id| user(*id)).collect();
    let bookmark = match bookmark {
        Some(b) => format!(r#""{b}""#),
        None => "null".to_string(),
    };
    format!(
        r#"{{ "PagingInfo": {{ "Bookmark": {bookmark}, "HasMoreItems": {has_more} }}, "Items": [{}] }}"#,
        items.join(",")
    )
}

#[tokio::test]
async fn test_next_url_pages_are_concatenated() {
    let mock = MockHttpSend::new()
        .reply(
            StatusCode::OK,
            object_list_page(
                &["a", "b"],
                Some("https://lms.example.edu/d2l/api/lp/1.30/dataExport/bds?bookmark=page-2"),
            ),
        )
        .reply(StatusCode::OK, object_list_page(&["c"], None));
    let client = mock::client(&mock);

    let sets = client.get_data_sets().await.unwrap();
    let ids: Vec<&str> = sets.iter().map(|s| s.plugin_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].query_value("bookmark"), None);
    assert_eq!(reqs[1].query_value("bookmark").as_deref(), Some("page-2"));
    assert_eq!(reqs[1].uri.path(), "/d2l/api/lp/1.30/dataExport/bds");
}

#[tokio::test]
async fn test_paging_info_pages_are_concatenated() {
    let mock = MockHttpSend::new()
        .reply(StatusCode::OK, paged_result_set(&[1, 2], Some("2"), true))
        .reply(StatusCode::OK, paged_result_set(&[3], Some("3"), false));
    let client = mock::client(&mock);

    let users = client.get_all_users().await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.user_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[1].query_value("bookmark").as_deref(), Some("2"));
}

#[tokio::test]
async fn test_single_page_sends_one_request() {
    let mock = MockHttpSend::new().reply(StatusCode::OK, paged_result_set(&[7], None, false));
    let client = mock::client(&mock);

    let users = client.get_all_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_get_users_forwards_bookmark() {
    let mock = MockHttpSend::new().reply(StatusCode::OK, paged_result_set(&[], None, false));
    let client = mock::client(&mock);

    let page = client.get_users(Some("169")).await.unwrap();
    assert!(page.items.is_empty());
    assert!(!page.paging_info.has_more_items);
    assert_eq!(mock.requests()[0].query_value("bookmark").as_deref(), Some("169"));
}

#[tokio::test]
async fn test_failed_page_is_returned() {
    let mock = MockHttpSend::new()
        .reply(
            StatusCode::OK,
            object_list_page(&["a"], Some("/d2l/api/lp/1.30/dataExport/bds?bookmark=2")),
        )
        .reply(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let client = mock::client(&mock);

    let err = client.get_data_sets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.code(), 500);
}

#[tokio::test]
async fn test_best_effort_keeps_pages_before_failure() {
    let mock = MockHttpSend::new()
        .reply(
            StatusCode::OK,
            object_list_page(&["a", "b"], Some("/d2l/api/lp/1.30/dataExport/bds?bookmark=2")),
        )
        .reply(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let client = mock::client(&mock);

    let sets = client.get_data_sets_best_effort().await;
    let ids: Vec<&str> = sets.iter().map(|s| s.plugin_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn test_best_effort_hides_authorization_failure() {
    let mock = MockHttpSend::new().reply(StatusCode::FORBIDDEN, "Not Authorized");
    let client = mock::client(&mock);

    assert!(client.get_all_users_best_effort().await.is_empty());
}

#[tokio::test]
async fn test_best_effort_hides_transport_failure() {
    let mock = MockHttpSend::new()
        .reply(StatusCode::OK, paged_result_set(&[1], Some("1"), true))
        .fail("connection reset by peer");
    let client = mock::client(&mock);

    let users = client.get_all_users_best_effort().await;
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_stops_when_bookmark_does_not_advance() {
    let mock = MockHttpSend::new()
        .reply(StatusCode::OK, paged_result_set(&[1], Some("same"), true))
        .reply(StatusCode::OK, paged_result_set(&[2], Some("same"), true))
        .reply(StatusCode::OK, paged_result_set(&[3], None, false));
    let client = mock::client(&mock);

    let users = client.get_all_users().await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.user_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn test_stops_when_more_items_lack_bookmark() {
    let mock = MockHttpSend::new()
        .reply(StatusCode::OK, paged_result_set(&[1], None, true))
        .reply(StatusCode::OK, paged_result_set(&[2], None, false));
    let client = mock::client(&mock);

    let users = client.get_all_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_stops_when_next_url_has_no_bookmark() {
    let mock = MockHttpSend::new()
        .reply(
            StatusCode::OK,
            object_list_page(&["a"], Some("/d2l/api/lp/1.30/dataExport/bds")),
        )
        .reply(StatusCode::OK, object_list_page(&["b"], None));
    let client = mock::client(&mock);

    let sets = client.get_data_sets().await.unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(mock.requests().len(), 1);
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Grade {
    points: u32,
}

#[tokio::test]
async fn test_generic_walk_keeps_request_query() {
    let mock = MockHttpSend::new()
        .reply(
            StatusCode::OK,
            r#"{ "PagingInfo": { "Bookmark": "b1", "HasMoreItems": true }, "Items": [{ "Points": 3 }] }"#,
        )
        .reply(
            StatusCode::OK,
            r#"{ "PagingInfo": { "Bookmark": null, "HasMoreItems": false }, "Items": [{ "Points": 4 }] }"#,
        );
    let client = mock::client(&mock);

    let req = ApiRequest::get(client.le_path("6609/grades/values/myGradeValues/"))
        .with_query("bookmark", "stale")
        .with_query("sort", "asc");
    let grades: Vec<Grade> = client.fetch_all_paged(&req).await.unwrap();
    assert_eq!(grades.iter().map(|g| g.points).sum::<u32>(), 7);

    let reqs = mock.requests();
    assert_eq!(reqs[0].query_value("sort").as_deref(), Some("asc"));
    assert_eq!(reqs[1].query_value("sort").as_deref(), Some("asc"));
    let bookmarks: Vec<String> = reqs[1]
        .query()
        .into_iter()
        .filter(|(k, _)| k == "bookmark")
        .map(|(_, v)| v)
        .collect();
    assert_eq!(bookmarks, vec!["b1"]);
}
