// SPDX-License-Identifier: GPL-3.0-only

use storage_contracts::{ConnectConfig, Connection, ErrorNumber, TransportError, Value};
use storage_testing::{ScriptedTransport, fixtures, logging};
use storage_types::{Capability, Flags};

#[tokio::test]
async fn startup_sends_uri_password_and_timeout() {
    logging::init();
    let plugin = ScriptedTransport::new();
    plugin.reply("startup", Value::Null);

    let config = ConnectConfig::new("sim://array?opt=1")
        .with_password("secret")
        .with_timeout_ms(5_000);
    let conn = Connection::connect(plugin.boxed(), &config, Flags::NONE)
        .await
        .expect("connect");

    assert_eq!(conn.plugin(), "sim");
    assert_eq!(conn.uri(), "sim://array?opt=1");
    assert!(conn.last_error().is_none());

    let call = plugin.last_call().expect("startup call");
    assert_eq!(call.method, "startup");
    assert_eq!(call.param("uri"), Some(&Value::from("sim://array?opt=1")));
    assert_eq!(call.param("password"), Some(&Value::from("secret")));
    assert_eq!(call.param("timeout"), Some(&Value::from(5_000u32)));
    assert_eq!(call.param("flags"), Some(&Value::from(0u64)));
}

#[tokio::test]
async fn failed_handshake_closes_transport() {
    logging::init();
    let plugin = ScriptedTransport::new();
    plugin.fail_with_code("startup", 132, "bad uri");

    let err = Connection::connect(plugin.boxed(), &ConnectConfig::new("sim://"), Flags::NONE)
        .await
        .expect_err("handshake fails");

    assert_eq!(err.number, ErrorNumber::InvalidUri);
    assert_eq!(err.message, "bad uri");
    assert!(plugin.is_closed());
}

#[tokio::test]
async fn unparseable_uri_never_reaches_the_plugin() {
    logging::init();
    let plugin = ScriptedTransport::new();

    let err = Connection::connect(plugin.boxed(), &ConnectConfig::new("no scheme"), Flags::NONE)
        .await
        .expect_err("invalid uri");

    assert_eq!(err.number, ErrorNumber::InvalidUri);
    assert_eq!(plugin.call_count(), 0);
    assert!(plugin.is_closed());
}

#[tokio::test]
async fn non_zero_flags_are_rejected_before_startup() {
    logging::init();
    let plugin = ScriptedTransport::new();

    let err = Connection::connect(
        plugin.boxed(),
        &ConnectConfig::new("sim://"),
        Flags::from_bits(0x4),
    )
    .await
    .expect_err("flags must be zero");

    assert_eq!(err.number, ErrorNumber::InvalidArgument);
    assert_eq!(plugin.call_count(), 0);
}

#[tokio::test]
async fn close_sends_shutdown_and_releases_transport() {
    let plugin = ScriptedTransport::new();
    let conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("shutdown", Value::Null);

    conn.close(Flags::NONE).await.expect("close");

    assert_eq!(plugin.methods(), vec!["startup", "shutdown"]);
    assert!(plugin.is_closed());
    plugin.verify().expect("script consumed");
}

#[tokio::test]
async fn close_releases_transport_even_when_shutdown_fails() {
    let plugin = ScriptedTransport::new();
    let conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.fail(
        "shutdown",
        TransportError::CommunicationLost("broken pipe".to_string()),
    );

    let err = conn.close(Flags::NONE).await.expect_err("shutdown fails");

    assert_eq!(err.number, ErrorNumber::TransportCommunication);
    assert!(plugin.is_closed());
}

#[tokio::test]
async fn plugin_info_reads_description_and_version() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply(
        "plugin_info",
        Value::Array(vec![
            Value::from("Acme Array Plugin"),
            Value::from("1.0.3"),
        ]),
    );

    let info = conn.plugin_info(Flags::NONE).await.expect("plugin info");

    assert_eq!(info.description, "Acme Array Plugin");
    assert_eq!(info.version, "1.0.3");
}

#[tokio::test]
async fn timeout_round_trips_through_the_plugin() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin
        .reply("time_out_set", Value::Null)
        .reply("time_out_get", 45_000u32);

    conn.timeout_set(45_000, Flags::NONE).await.expect("set");
    let ms = conn.timeout_get(Flags::NONE).await.expect("get");

    assert_eq!(ms, 45_000);
    assert_eq!(
        plugin.calls()[1].param("ms"),
        Some(&Value::from(45_000u32))
    );
}

#[tokio::test]
async fn non_numeric_timeout_is_an_internal_error() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("time_out_get", "soon");

    let err = conn.timeout_get(Flags::NONE).await.expect_err("string reply");

    assert_eq!(err.number, ErrorNumber::InternalError);
    assert_eq!(err.message, "Unexpected type");
}

#[tokio::test]
async fn systems_and_capabilities_decode() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");

    let mut caps = storage_types::Capabilities::new();
    caps.set(
        Capability::VolumeCreate,
        storage_types::CapabilityValue::Supported,
    );
    plugin
        .reply(
            "systems",
            storage_contracts::protocol::entity_list_to_value(&[fixtures::system()]),
        )
        .reply(
            "capabilities",
            storage_contracts::WireEntity::to_value(&caps),
        );

    let systems = conn.system_list(Flags::NONE).await.expect("systems");
    assert_eq!(systems, vec![fixtures::system()]);

    let decoded = conn
        .capabilities(&systems[0], Flags::NONE)
        .await
        .expect("capabilities");
    assert!(decoded.is_supported(Capability::VolumeCreate));
    assert!(!decoded.is_supported(Capability::VolumeDelete));
}

#[tokio::test]
async fn scalar_in_place_of_a_list_is_an_internal_error() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.reply("systems", 42u32);

    let err = conn.system_list(Flags::NONE).await.expect_err("not a list");

    assert_eq!(err.number, ErrorNumber::InternalError);
    assert_eq!(conn.last_error(), Some(&err));
}

#[tokio::test]
async fn plugin_errors_pass_through_with_their_code() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin.fail_with_code("pools", 153, "Not supported by this array");

    let err = conn.pool_list(Flags::NONE).await.expect_err("plugin error");

    assert_eq!(err.number, ErrorNumber::NoSupport);
    assert_eq!(err.message, "Not supported by this array");
}

#[tokio::test]
async fn last_error_is_cleared_by_the_next_success() {
    let plugin = ScriptedTransport::new();
    let mut conn = fixtures::connect(&plugin).await.expect("connect");
    plugin
        .fail_with_code("volumes", 1, "boom")
        .reply("volumes", Value::Array(vec![]));

    conn.volume_list(Flags::NONE).await.expect_err("first call fails");
    assert_eq!(
        conn.last_error().map(|e| e.number),
        Some(ErrorNumber::InternalError)
    );

    let volumes = conn.volume_list(Flags::NONE).await.expect("second call");
    assert!(volumes.is_empty());
    assert!(conn.last_error().is_none());
    plugin.verify().expect("script consumed");
}
