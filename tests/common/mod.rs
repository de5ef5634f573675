//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::cell::RefCell;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use postreminder_client::{EndpointConfig, HttpEndpoint};
use postreminder_core::{Composer, ComposerOptions, Dispatch, FixedClock};
use postreminder_tui::{HostApp, Palette, PostEntry};
use postreminder_types::{ComposerVariant, EpochMillis, HostTheme, ReminderRequest};

pub const NOW: EpochMillis = EpochMillis::new(1_700_000_000_000);
pub const PLUGIN_ID: &str = "post-reminder";

/// Dispatcher that keeps every request instead of sending it.
#[derive(Default)]
pub struct Recorder(RefCell<Vec<ReminderRequest>>);

impl Recorder {
    pub fn requests(&self) -> Vec<ReminderRequest> {
        self.0.borrow().clone()
    }
}

impl Dispatch for Recorder {
    fn dispatch(&self, request: ReminderRequest) {
        self.0.borrow_mut().push(request);
    }
}

pub fn host_app(variant: ComposerVariant, recorder: &Recorder) -> HostApp<FixedClock, &Recorder> {
    let composer = Composer::new(
        ComposerOptions {
            variant,
            initial_message: String::new(),
        },
        FixedClock::at(NOW),
        recorder,
    );
    HostApp::new(
        vec![PostEntry::parse("post1=Launch checklist").unwrap()],
        composer,
        Palette::from_theme(&HostTheme::default()),
    )
}

/// Mount the plugin's `/add` route answering with `status`.
pub async fn mount_add(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/plugins/{PLUGIN_ID}/add")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn endpoint(server: &MockServer, token: Option<&str>) -> HttpEndpoint {
    HttpEndpoint::new(&EndpointConfig {
        server_url: server.uri(),
        plugin_id: PLUGIN_ID.to_string(),
        token: token.map(str::to_string),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

/// Poll until the mock has seen `count` requests or a second has passed.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<Request> {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    server.received_requests().await.unwrap_or_default()
}
