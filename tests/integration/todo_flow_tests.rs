//! Integration tests for the task-list flow against real `SQLite`.

use reply_bot::models::event::InboundEvent;

use super::test_helpers::{test_config, test_dispatcher};

async fn say(dispatcher: &reply_bot::reply::dispatcher::ReplyDispatcher, text: &str) -> String {
    dispatcher
        .dispatch(&InboundEvent::text("rt-todo", text))
        .await
        .expect("reply")
        .as_text()
        .expect("text")
        .to_owned()
}

fn added_id(reply: &str) -> u64 {
    reply
        .lines()
        .find_map(|line| line.strip_prefix("ID:"))
        .expect("ID line")
        .parse()
        .expect("numeric id")
}

#[tokio::test]
async fn add_then_list_shows_store_assigned_id() {
    let dispatcher = test_dispatcher(&test_config()).await;

    let reply = say(&dispatcher, "todo add Report 2/24").await;
    assert!(reply.starts_with("todo added\n"), "{reply}");
    let id = added_id(&reply);

    let list = say(&dispatcher, "todo list").await;
    assert_eq!(list, format!("ID/Task/DueDate\n{id}/Report/2/24"));
}

#[tokio::test]
async fn done_then_list_omits_task() {
    let dispatcher = test_dispatcher(&test_config()).await;

    let first = added_id(&say(&dispatcher, "todo add Report 2/24").await);
    let second = added_id(&say(&dispatcher, "todo add Laundry 3/1").await);

    let reply = say(&dispatcher, &format!("todo done {first}")).await;
    assert_eq!(reply, format!("todo deleted\nID:{first}"));

    let list = say(&dispatcher, "todo list").await;
    assert_eq!(list, format!("ID/Task/DueDate\n{second}/Laundry/3/1"));
}

#[tokio::test]
async fn done_on_missing_id_still_confirms() {
    let dispatcher = test_dispatcher(&test_config()).await;
    assert_eq!(say(&dispatcher, "todo done 77").await, "todo deleted\nID:77");
    assert_eq!(say(&dispatcher, "todo list").await, "ID/Task/DueDate");
}

#[tokio::test]
async fn done_beyond_integer_range_still_confirms() {
    let dispatcher = test_dispatcher(&test_config()).await;
    let id = added_id(&say(&dispatcher, "todo add Report 2/24").await);

    for huge in ["18446744073709551615", "9223372036854775808"] {
        assert_eq!(
            say(&dispatcher, &format!("todo done {huge}")).await,
            format!("todo deleted\nID:{huge}")
        );
    }

    let list = say(&dispatcher, "todo list").await;
    assert_eq!(list, format!("ID/Task/DueDate\n{id}/Report/2/24"));
}
