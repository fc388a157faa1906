//! `BotApi` against a mocked Bot API server (wiremock)

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use freelancetm::telegram::{BotApi, Reply, TelegramApi};
use freelancetm::telegram::keyboards::respond_keyboard;
use freelancetm::i18n::Lang;

struct MockTelegram {
    server: MockServer,
    api: BotApi,
}

impl MockTelegram {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let bot = teloxide::Bot::new("test_token_12345:ABCDEF").set_api_url(server.uri().parse().unwrap());
        Self {
            server,
            api: BotApi::new(bot),
        }
    }

    /// Mounts a successful response for one Bot API method.
    async fn ok(&self, api_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path_regex(format!("(?i)/bot[^/]+/{}$", api_method)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": result})))
            .mount(&self.server)
            .await;
    }
}

fn bot_user() -> Value {
    json!({"id": 987654321, "is_bot": true, "first_name": "FreelanceTM"})
}

fn sent_message(chat_id: i64, text: &str) -> Value {
    json!({
        "message_id": 42,
        "from": bot_user(),
        "chat": {"id": chat_id, "type": "private"},
        "date": 1735992000,
        "text": text
    })
}

fn member(status: &str) -> Value {
    json!({
        "user": {"id": 77, "is_bot": false, "first_name": "Maya"},
        "status": status
    })
}

#[tokio::test]
async fn channel_member_is_subscribed() {
    let telegram = MockTelegram::start().await;
    telegram.ok("getChatMember", member("member")).await;

    assert!(telegram.api.is_channel_member("@FreelanceTM_channel", 77).await.unwrap());
}

#[tokio::test]
async fn user_who_left_is_not_subscribed() {
    let telegram = MockTelegram::start().await;
    telegram.ok("getChatMember", member("left")).await;

    assert!(!telegram.api.is_channel_member("@FreelanceTM_channel", 77).await.unwrap());
}

#[tokio::test]
async fn membership_lookup_surfaces_api_errors() {
    let telegram = MockTelegram::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)/bot[^/]+/getChatMember$"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&telegram.server)
        .await;

    assert!(telegram.api.is_channel_member("@missing_channel", 77).await.is_err());
}

#[tokio::test]
async fn deliver_sends_html_message_with_keyboard() {
    let telegram = MockTelegram::start().await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)/bot[^/]+/sendMessage$"))
        .and(body_partial_json(json!({
            "chat_id": 42,
            "text": "<b>Order</b>",
            "parse_mode": "HTML",
            "reply_markup": {"inline_keyboard": [[{"callback_data": "respond_3"}]]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": sent_message(42, "Order")
        })))
        .expect(1)
        .mount(&telegram.server)
        .await;

    let reply = Reply::message(42, "<b>Order</b>").with_markup(respond_keyboard(3, Lang::Ru));
    telegram.api.deliver(&reply).await.unwrap();
}

#[tokio::test]
async fn deliver_edits_and_answers_callbacks() {
    let telegram = MockTelegram::start().await;
    telegram.ok("editMessageText", sent_message(42, "Edited")).await;
    Mock::given(method("POST"))
        .and(path_regex("(?i)/bot[^/]+/answerCallbackQuery$"))
        .and(body_partial_json(json!({"callback_query_id": "cb-1", "text": "Done"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": true})))
        .expect(1)
        .mount(&telegram.server)
        .await;

    telegram.api.deliver(&Reply::edit(42, 42, "Edited")).await.unwrap();
    telegram
        .api
        .deliver(&Reply::answer("cb-1", Some("Done".to_string())))
        .await
        .unwrap();
}

#[tokio::test]
async fn bot_info_combines_identity_and_webhook() {
    let telegram = MockTelegram::start().await;
    telegram
        .ok(
            "getMe",
            json!({
                "id": 123456,
                "is_bot": true,
                "first_name": "FreelanceTM",
                "username": "FreelanceTMBot",
                "can_join_groups": true,
                "can_read_all_group_messages": false,
                "supports_inline_queries": false,
                "can_connect_to_business": false,
                "has_main_web_app": false
            }),
        )
        .await;
    telegram
        .ok(
            "getWebhookInfo",
            json!({
                "url": "https://freelancetm.example.com/123456:TOKEN",
                "has_custom_certificate": false,
                "pending_update_count": 3
            }),
        )
        .await;

    let info = telegram.api.bot_info().await.unwrap();
    assert_eq!(info.bot_id, 123456);
    assert_eq!(info.bot_username.as_deref(), Some("FreelanceTMBot"));
    assert_eq!(info.bot_name, "FreelanceTM");
    assert!(info.has_webhook);
    assert_eq!(info.pending_update_count, 3);
}

#[tokio::test]
async fn bot_info_without_webhook() {
    let telegram = MockTelegram::start().await;
    telegram
        .ok(
            "getMe",
            json!({
                "id": 123456,
                "is_bot": true,
                "first_name": "FreelanceTM",
                "username": "FreelanceTMBot",
                "can_join_groups": true,
                "can_read_all_group_messages": false,
                "supports_inline_queries": false,
                "can_connect_to_business": false,
                "has_main_web_app": false
            }),
        )
        .await;
    telegram
        .ok(
            "getWebhookInfo",
            json!({"url": "", "has_custom_certificate": false, "pending_update_count": 0}),
        )
        .await;

    let info = telegram.api.bot_info().await.unwrap();
    assert!(!info.has_webhook);
    assert_eq!(info.webhook_url, None);
}
