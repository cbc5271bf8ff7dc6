//! Full chain tests: WorkBot over an in-memory SQLite database and a recording transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dbot_core::{Bot, Chat, Keyboard, MessageId, Update, User};
use storage::{JobFilter, PersistenceGateway, SqliteGateway};
use work_bot::{
    build_bot_components, build_handler_chain, BaseConfig, BotConfig, DialogConfig, WorkBot,
};

/// Records sent texts; message ids count up from 500.
#[derive(Default)]
struct RecordingBot {
    sent: Mutex<Vec<(i64, String)>>,
    deleted: Mutex<Vec<MessageId>>,
    next_id: Mutex<MessageId>,
}

impl RecordingBot {
    fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }

    fn last_id(&self) -> MessageId {
        *self.next_id.lock().unwrap() + 499
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        _keyboard: Option<&Keyboard>,
    ) -> dbot_core::Result<MessageId> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        Ok(*next + 499)
    }

    async fn delete_message(&self, _chat_id: i64, message_id: MessageId) -> dbot_core::Result<()> {
        self.deleted.lock().unwrap().push(message_id);
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str) -> dbot_core::Result<()> {
        Ok(())
    }
}

fn config() -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "test_token".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
            database_url: "sqlite::memory:".to_string(),
        },
        dialog: DialogConfig {
            bot_username: "work_kg_bot".to_string(),
            subscription_price: "500 сом/месяц".to_string(),
            catalog_file: None,
        },
    }
}

fn user() -> User {
    User {
        id: 42,
        username: Some("aibek".to_string()),
        first_name: Some("Aibek".to_string()),
        last_name: None,
    }
}

fn chat() -> Chat {
    Chat {
        id: 42,
        chat_type: "private".to_string(),
    }
}

fn text(message_id: MessageId, body: &str) -> Update {
    Update::from_text(user(), chat(), message_id, body)
}

fn press(origin: MessageId, data: &str) -> Update {
    Update::callback(user(), chat(), format!("cb-{}", origin), data, Some(origin))
}

async fn work_bot() -> (WorkBot, Arc<RecordingBot>) {
    let bot = Arc::new(RecordingBot::default());
    let work_bot = WorkBot::new(config(), bot.clone()).await.unwrap();
    (work_bot, bot)
}

/// **Test: /start records the sender and shows the welcome screen.**
///
/// **Setup:** Fresh in-memory database.
/// **Action:** Send `/start`.
/// **Expected:** users row exists with the Telegram username; one message sent.
#[tokio::test]
async fn test_start_syncs_user() {
    let (bot, transport) = work_bot().await;

    bot.handle_update(&text(1, "/start")).await.unwrap();

    let stored = bot
        .components
        .gateway
        .find_user(42)
        .await
        .unwrap()
        .expect("user synced");
    assert_eq!(stored.username.as_deref(), Some("aibek"));
    assert_eq!(transport.texts().len(), 1);
}

/// **Test: The profile form writes the users row and the resume through SQLite.**
///
/// **Setup:** Components over a concrete SqliteGateway; user presses fill_form from a menu message.
/// **Action:** Answer name, phone, city button, specialty, experience.
/// **Expected:** users row carries phone/city/specialty/experience; resume stored; session Idle.
#[tokio::test]
async fn test_profile_form_persists_to_sqlite() {
    let transport = Arc::new(RecordingBot::default());
    let gateway = Arc::new(SqliteGateway::new("sqlite::memory:").await.unwrap());
    let components = build_bot_components(&config(), transport.clone(), gateway.clone()).unwrap();
    let chain = build_handler_chain(&components);

    chain.handle(&press(1, "fill_form")).await.unwrap();
    chain.handle(&text(2, "Aibek")).await.unwrap();
    chain.handle(&text(3, "+996 555 000 111")).await.unwrap();
    let city_question = transport.last_id();
    chain
        .handle(&press(city_question, "form_city:Ош"))
        .await
        .unwrap();
    chain.handle(&text(5, "Повар")).await.unwrap();
    chain.handle(&text(6, "3 года")).await.unwrap();

    let stored = gateway.find_user(42).await.unwrap().expect("user stored");
    assert_eq!(stored.phone.as_deref(), Some("+996 555 000 111"));
    assert_eq!(stored.city.as_deref(), Some("Ош"));
    assert_eq!(stored.specialty.as_deref(), Some("Повар"));
    assert_eq!(stored.experience.as_deref(), Some("3 года"));

    let resume = gateway.find_resume(42).await.unwrap().expect("resume stored");
    assert_eq!(resume.name, "Aibek");
    assert_eq!(resume.username.as_deref(), Some("aibek"));

    assert!(components.service.store().get(42).await.is_idle());
    assert!(transport
        .texts()
        .last()
        .unwrap()
        .starts_with("✅ Ваша анкета сохранена!"));
    assert!(transport.deleted.lock().unwrap().contains(&city_question));
}

/// **Test: A vacancy added through the wizard is found by a job search.**
///
/// **Setup:** Employee search IT → Программист → Бишкек, then the vacancy wizard.
/// **Action:** Job search over the same filters.
/// **Expected:** One stored job; the search reports one result and shows its card.
#[tokio::test]
async fn test_vacancy_then_job_search() {
    let (bot, transport) = work_bot().await;

    bot.handle_update(&press(1, "search_employee")).await.unwrap();
    bot.handle_update(&press(transport.last_id(), "category:IT:employee"))
        .await
        .unwrap();
    bot.handle_update(&press(transport.last_id(), "subcategory:Программист:employee"))
        .await
        .unwrap();
    bot.handle_update(&press(transport.last_id(), "city:Бишкек:employee"))
        .await
        .unwrap();
    bot.handle_update(&press(transport.last_id(), "add_vacancy"))
        .await
        .unwrap();
    for (id, answer) in [
        (10, "Backend разработчик"),
        (11, "Rust, SQL"),
        (12, "80000-120000 сом"),
        (13, "+996 700 000 000"),
        (14, "-"),
    ] {
        bot.handle_update(&text(id, answer)).await.unwrap();
    }

    let jobs = bot
        .components
        .gateway
        .query_jobs(&JobFilter::new("IT", "Программист", "Бишкек"))
        .await
        .unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Backend разработчик");
    assert_eq!(jobs[0].created_by, Some(42));

    bot.handle_update(&press(transport.last_id(), "search_job")).await.unwrap();
    bot.handle_update(&press(transport.last_id(), "category:IT:job"))
        .await
        .unwrap();
    bot.handle_update(&press(transport.last_id(), "subcategory:Программист:job"))
        .await
        .unwrap();
    bot.handle_update(&press(transport.last_id(), "city:Бишкек:job"))
        .await
        .unwrap();

    let texts = transport.texts();
    assert!(texts.iter().any(|t| t.contains("Найдено 1 вакансий")));
    assert!(texts.iter().any(|t| t.contains("Backend разработчик")));
}
