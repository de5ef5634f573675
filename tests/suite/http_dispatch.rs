//! Composer submissions delivered over HTTP

use std::time::Duration;

use serde_json::Value;
use wiremock::MockServer;

use postreminder_core::{Composer, ComposerOptions, FixedClock, SpawnDispatcher};
use postreminder_types::{ComposerVariant, PostId};

use crate::common::{NOW, endpoint, mount_add, wait_for_requests};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn classic_submit_posts_to_plugin() {
    let server = MockServer::start().await;
    mount_add(&server, 200).await;

    let mut composer = Composer::new(
        ComposerOptions::default(),
        FixedClock::at(NOW),
        SpawnDispatcher::on_current_runtime(endpoint(&server, Some("tok"))),
    );
    composer.open(PostId::new("post1").unwrap());
    composer.set_message("Remember this").unwrap();
    composer.set_magnitude(2).unwrap();
    composer.set_unit_selector("days").unwrap();
    composer.submit();
    assert!(!composer.is_open());

    let received = wait_for_requests(&server, 1).await;
    assert_eq!(received.len(), 1);
    let request = &received[0];
    assert_eq!(
        request.headers.get("authorization").unwrap(),
        "Bearer tok"
    );
    assert_eq!(
        request.headers.get("x-requested-with").unwrap(),
        "XMLHttpRequest"
    );
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["message"], "Remember this");
    assert_eq!(body["post_id"], "post1");
    assert_eq!(
        body["remember_at"],
        (NOW.value() + 172_800_000).to_string()
    );
    assert!(body.get("send_to").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn targeted_submit_carries_delivery_fields() {
    let server = MockServer::start().await;
    mount_add(&server, 200).await;

    let mut composer = Composer::new(
        ComposerOptions {
            variant: ComposerVariant::Targeted,
            initial_message: String::new(),
        },
        FixedClock::at(NOW),
        SpawnDispatcher::on_current_runtime(endpoint(&server, None)),
    );
    composer.open(PostId::new("post2").unwrap());
    composer.set_message("Check in").unwrap();
    composer.set_magnitude_input("90").unwrap();
    composer.submit();

    let received = wait_for_requests(&server, 1).await;
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["remember_at"], (NOW.value() + 5_400_000).to_string());
    assert_eq!(body["reminder_type"], "dm");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_failure_is_not_surfaced() {
    let server = MockServer::start().await;
    mount_add(&server, 500).await;

    let mut composer = Composer::new(
        ComposerOptions::default(),
        FixedClock::at(NOW),
        SpawnDispatcher::on_current_runtime(endpoint(&server, None)),
    );
    composer.open(PostId::new("post3").unwrap());
    composer.set_message("will fail").unwrap();
    composer.submit();

    let received = wait_for_requests(&server, 1).await;
    assert_eq!(received.len(), 1);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!composer.is_open());
    assert_eq!(composer.form().message(), None);
}
