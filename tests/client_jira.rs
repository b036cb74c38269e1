//
//  planning-tool
//  tests/client_jira.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira operations against a mock server.

mod common;

use mockito::{Matcher, Server};
use serde_json::json;

use planning_tool::api::ErrorKind;

use common::*;

#[tokio::test]
async fn test_post_comment_uses_basic_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/api/2/issue/OBS-42/comment")
        .match_header("authorization", BASIC)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "body": "Dome closed at 02:10 due to wind." })))
        .with_status(201)
        .with_body(
            json!({
                "id": "10500",
                "body": "Dome closed at 02:10 due to wind.",
                "author": { "accountId": "5d8a3b2c", "displayName": "Observer" },
                "created": "2024-03-13T02:11:00.000+0000",
                "self": "https://rubinobs.atlassian.net/rest/api/2/issue/OBS-42/comment/10500"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let comment = client(&server)
        .post_comment("OBS-42", "Dome closed at 02:10 due to wind.")
        .await
        .unwrap();

    assert_eq!(comment.id, "10500");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_comment_on_missing_issue() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/rest/api/2/issue/OBS-9999/comment")
        .with_status(404)
        .with_body(r#"{"errorMessages": ["Issue does not exist or you do not have permission to see it."], "errors": {}}"#)
        .create_async()
        .await;

    let err = client(&server)
        .post_comment("OBS-9999", "hello")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.vendor_message().contains("Issue does not exist"));
}

#[tokio::test]
async fn test_post_comment_validates_locally() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client(&server);
    for (key, text) in [("obs-42", "hello"), ("OBS", "hello"), ("OBS-42", "   ")] {
        let err = client.post_comment(key, text).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{} / {:?}", key, text);
    }
    any.assert_async().await;
}

#[tokio::test]
async fn test_get_user_by_account_id() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", path_with_query("/rest/api/2/user"))
        .match_query(Matcher::UrlEncoded("accountId".into(), "5d8a3b2c".into()))
        .match_header("authorization", BASIC)
        .with_status(200)
        .with_body(
            r#"{"accountId": "5d8a3b2c", "displayName": "Bruno Quint", "active": true, "timeZone": "America/Santiago"}"#,
        )
        .create_async()
        .await;

    let user = client(&server).get_user("5d8a3b2c").await.unwrap();

    assert_eq!(user.display_name.as_deref(), Some("Bruno Quint"));
    assert!(user.active);
}

#[tokio::test]
async fn test_myself_with_rejected_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/rest/api/2/myself")
        .with_status(403)
        .create_async()
        .await;

    let err = client(&server).myself().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.http_status(), Some(403));
}
