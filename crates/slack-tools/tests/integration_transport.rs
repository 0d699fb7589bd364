mod common;

use common::{MockReply, MockSlack, TOKEN, client_for};
use serde_json::{Map, Value, json};
use slack_mcp_tools::GatewayError;
use slack_mcp_tools::client::{Attachment, MultipartBody, Params};

fn params(v: Value) -> Params {
    match v {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

#[tokio::test]
async fn get_sends_bearer_and_omits_absent_values() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.method("files.list", json!({ "ok": true, "files": [] }));
    let client = client_for(&mock)?;

    let data = client
        .get(
            "files.list",
            &params(json!({
                "channel": "C1",
                "user": null,
                "ts_from": "",
                "types": ["images", "pdfs"],
                "count": 5
            })),
        )
        .await?;
    assert_eq!(data, json!({ "ok": true, "files": [] }));

    let calls = mock.calls("files.list");
    assert_eq!(calls.len(), 1);
    let req = &calls[0];
    assert_eq!(req.method, "GET");
    assert_eq!(req.header("authorization"), Some(format!("Bearer {TOKEN}").as_str()));
    assert_eq!(req.query_param("channel").as_deref(), Some("C1"));
    assert_eq!(req.query_param("types").as_deref(), Some("images,pdfs"));
    assert_eq!(req.query_param("count").as_deref(), Some("5"));
    assert_eq!(req.query_param("user"), None);
    assert_eq!(req.query_param("ts_from"), None);
    Ok(())
}

#[tokio::test]
async fn post_json_sends_utf8_json_document() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.method("chat.postMessage", json!({ "ok": true, "ts": "1.2" }));
    let client = client_for(&mock)?;

    client
        .post_json(
            "chat.postMessage",
            &params(json!({ "channel": "C1", "text": "héllo" })),
        )
        .await?;

    let req = &mock.calls("chat.postMessage")[0];
    assert_eq!(req.method, "POST");
    assert_eq!(
        req.header("content-type"),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(req.body_json(), json!({ "channel": "C1", "text": "héllo" }));
    Ok(())
}

#[tokio::test]
async fn multipart_carries_fields_and_file_part() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.method("files.upload", json!({ "ok": true, "file": { "id": "F1" } }));
    let client = client_for(&mock)?;

    let mut body = MultipartBody::default();
    body.text("filename", Some("a.bin"))
        .text("channels", Some("C1"))
        .text("title", None);
    body.attachment = Some(Attachment {
        field: "file".to_string(),
        filename: "a.bin".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4".to_vec(),
    });
    client.post_multipart("files.upload", body).await?;

    let req = &mock.calls("files.upload")[0];
    let ct = req.header("content-type").unwrap_or_default();
    assert!(ct.starts_with("multipart/form-data"), "content-type: {ct}");
    let text = req.body_text().to_ascii_lowercase();
    assert!(text.contains(r#"name="channels""#));
    assert!(!text.contains(r#"name="title""#));
    assert!(text.contains(r#"name="file"; filename="a.bin""#));
    assert!(text.contains("content-type: application/pdf"));
    assert!(text.contains("%pdf-1.4"));
    Ok(())
}

#[tokio::test]
async fn http_status_failure_is_reported_before_parsing() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.route(
        "/api/users.list",
        MockReply::raw(429, Some("text/plain"), "slow down"),
    );
    let client = client_for(&mock)?;

    let err = client.get("users.list", &Params::new()).await.unwrap_err();
    match err {
        GatewayError::Http { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn ok_false_surfaces_the_slack_code() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.method(
        "conversations.history",
        json!({ "ok": false, "error": "channel_not_found" }),
    );
    let client = client_for(&mock)?;

    let err = client
        .get("conversations.history", &params(json!({ "channel": "C404" })))
        .await
        .unwrap_err();
    assert_eq!(err.api_code(), Some("channel_not_found"));
    assert_eq!(
        err.to_string(),
        "Slack conversations.history error: channel_not_found"
    );
    Ok(())
}

#[tokio::test]
async fn non_json_body_is_malformed_and_kept_verbatim() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.route(
        "/api/auth.test",
        MockReply::raw(200, Some("text/html"), "<html>maintenance</html>"),
    );
    let client = client_for(&mock)?;

    let err = client.get("auth.test", &Params::new()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Malformed(ref raw) if raw == "<html>maintenance</html>"));
    Ok(())
}

#[tokio::test]
async fn api_calls_do_not_follow_redirects() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.route(
        "/api/auth.test",
        MockReply::redirect(mock.url("/api/elsewhere")),
    );
    mock.method("elsewhere", json!({ "ok": true }));
    let client = client_for(&mock)?;

    let err = client.get("auth.test", &Params::new()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Malformed(_)), "got {err:?}");
    assert!(mock.calls("elsewhere").is_empty());
    Ok(())
}

#[tokio::test]
async fn fetch_binary_follows_redirects_and_keeps_mime() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.route("/files/F1", MockReply::redirect(mock.url("/cdn/F1")));
    mock.route(
        "/cdn/F1",
        MockReply::raw(200, Some("image/png"), vec![0x89, b'P', b'N', b'G']),
    );
    let client = client_for(&mock)?;

    let res = client.fetch_binary(&mock.url("/files/F1")).await?;
    assert_eq!(res.mime_type, "image/png");
    assert_eq!(res.bytes, vec![0x89, b'P', b'N', b'G']);
    assert!(!res.is_textual());

    let first = &mock.requests_to("/files/F1")[0];
    assert_eq!(first.header("authorization"), Some(format!("Bearer {TOKEN}").as_str()));
    Ok(())
}

#[tokio::test]
async fn fetch_binary_defaults_mime_and_rejects_error_status() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    mock.route("/files/raw", MockReply::raw(200, None, "abc"));
    mock.route("/files/gone", MockReply::raw(404, Some("text/plain"), "nope"));
    let client = client_for(&mock)?;

    let res = client.fetch_binary(&mock.url("/files/raw")).await?;
    assert_eq!(res.mime_type, "application/octet-stream");

    let err = client
        .fetch_binary(&mock.url("/files/gone"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Http { status: 404, .. }));
    Ok(())
}

/// Chain `/hops/<name>/0` -> ... -> `/hops/<name>/<hops>`, the last one serving bytes.
fn redirect_chain(mock: &MockSlack, name: &str, hops: usize) -> String {
    for i in 0..hops {
        mock.route(
            &format!("/hops/{name}/{i}"),
            MockReply::redirect(mock.url(&format!("/hops/{name}/{}", i + 1))),
        );
    }
    mock.route(
        &format!("/hops/{name}/{hops}"),
        MockReply::raw(200, Some("text/plain"), "done"),
    );
    mock.url(&format!("/hops/{name}/0"))
}

#[tokio::test]
async fn fetch_binary_follows_at_most_five_redirects() -> anyhow::Result<()> {
    let mock = MockSlack::start().await?;
    let five = redirect_chain(&mock, "five", 5);
    let six = redirect_chain(&mock, "six", 6);
    let client = client_for(&mock)?;

    let res = client.fetch_binary(&five).await?;
    assert_eq!(res.bytes, b"done".to_vec());

    let err = client.fetch_binary(&six).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)), "got {err:?}");
    assert!(mock.requests_to("/hops/six/6").is_empty());
    Ok(())
}
