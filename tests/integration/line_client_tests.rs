//! Contract tests for reply delivery against a mock reply API.

use std::time::Duration;

use reply_bot::config::LineConfig;
use reply_bot::line::client::{LineClient, ReplySender};
use reply_bot::models::forecast::DayBucket;
use reply_bot::models::reply::{DaySummary, ReplyContent};
use reply_bot::AppError;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LineClient {
    let config = LineConfig {
        api_base_url: server.uri(),
        channel_secret: "secret".into(),
        channel_access_token: "access-token".into(),
    };
    LineClient::new(&config, Duration::from_secs(2)).expect("client")
}

#[tokio::test]
async fn text_reply_posts_token_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(header("authorization", "Bearer access-token"))
        .and(body_json(json!({
            "replyToken": "rt-1",
            "messages": [{"type": "text", "text": "大吉"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .reply("rt-1", &ReplyContent::text("大吉"))
        .await
        .expect("delivered");
}

#[tokio::test]
async fn carousel_reply_posts_flex_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(body_partial_json(json!({
            "replyToken": "rt-2",
            "messages": [{"type": "flex", "altText": "Weather Information"}]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let day = |label: &str| DaySummary {
        label: label.into(),
        bucket: DayBucket {
            max_temp: 20,
            min_temp: 10,
            avg_humidity: 50.0,
            icon: "01d".into(),
        },
    };
    let content = ReplyContent::Carousel {
        alt_text: "Weather Information".into(),
        days: vec![day("今日の天気"), day("明日の天気"), day("明後日の天気")],
    };

    client(&server)
        .reply("rt-2", &content)
        .await
        .expect("delivered");

    let requests = server.received_requests().await.expect("recorded");
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json");
    let bubbles = sent["messages"][0]["contents"]["contents"]
        .as_array()
        .expect("bubbles");
    assert_eq!(bubbles.len(), 3);
    assert_eq!(
        bubbles[2]["header"]["contents"][0]["text"],
        "明後日の天気"
    );
    assert_eq!(
        bubbles[0]["hero"]["url"],
        "https://openweathermap.org/img/w/01d.png"
    );
}

#[tokio::test]
async fn rejected_reply_is_line_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid reply token"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .reply("expired", &ReplyContent::text("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Line(ref msg) if msg.contains("Invalid reply token")));
}
