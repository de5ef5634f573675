//! Config file to endpoint wiring

use std::io::Write;

use postreminder_client::{EndpointConfig, HttpEndpoint};
use postreminder_config::PostReminderConfig;
use postreminder_types::ComposerVariant;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn configured_server_builds_add_route() {
    let file = write_config(
        r#"
[server]
url = "https://chat.example.com/"
plugin_id = "reminders"
timeout_secs = 7

[composer]
variant = "targeted"
"#,
    );
    let config = PostReminderConfig::load_from(file.path()).unwrap();
    assert_eq!(config.variant(), ComposerVariant::Targeted);

    let endpoint = HttpEndpoint::new(&EndpointConfig {
        server_url: config.server_url(),
        plugin_id: config.plugin_id(),
        token: None,
        timeout: config.timeout(),
    })
    .unwrap();
    assert_eq!(
        endpoint.add_url().as_str(),
        "https://chat.example.com/plugins/reminders/add"
    );
}

#[test]
fn empty_config_uses_local_defaults() {
    let file = write_config("");
    let config = PostReminderConfig::load_from(file.path()).unwrap();
    let endpoint = HttpEndpoint::new(&EndpointConfig {
        server_url: config.server_url(),
        plugin_id: config.plugin_id(),
        token: None,
        timeout: config.timeout(),
    })
    .unwrap();
    assert_eq!(
        endpoint.add_url().as_str(),
        "http://localhost:8065/plugins/post-reminder/add"
    );
    assert_eq!(config.variant(), ComposerVariant::Classic);
}

#[test]
fn malformed_config_reports_path() {
    let file = write_config("[server\nurl = ");
    let err = PostReminderConfig::load_from(file.path()).unwrap_err();
    assert_eq!(err.path(), file.path());
}
