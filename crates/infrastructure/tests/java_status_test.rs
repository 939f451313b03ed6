mod helpers;

use helpers::minecraft_server_mock::{spawn_query_server, JavaServerMock, ModernBehavior};
use mcgate_application::ports::StatusProber;
use mcgate_domain::{Address, Edition, StatusOptions, StatusResult};
use mcgate_infrastructure::JavaStatusClient;
use std::net::SocketAddr;
use std::time::Duration;

const STATUS_JSON: &str = r#"{
    "version": {"name": "§aPaper 1.20.4", "protocol": 765},
    "players": {"max": 100, "online": 3, "sample": [{"name": "Notch", "id": "069a79f4-44e9-4726-a5be-fca90e38aaf5"}]},
    "description": {"text": "§6Welcome ", "extra": [{"text": "home"}]},
    "favicon": "data:image/png;base64,iVBORw0KGgo="
}"#;

fn address(addr: SocketAddr) -> Address {
    Address::parse(&addr.to_string(), Edition::Java).unwrap()
}

async fn probe(
    client: &JavaStatusClient,
    addr: SocketAddr,
    options: StatusOptions,
    timeout: Duration,
) -> StatusResult {
    client.probe(&address(addr), &options, timeout).await
}

#[tokio::test]
async fn test_modern_status() {
    let addr = JavaServerMock::modern(STATUS_JSON).spawn().await;
    let client = JavaStatusClient::default();

    let result = probe(&client, addr, StatusOptions::default(), Duration::from_secs(2)).await;
    let status = result.as_java().unwrap();

    assert!(status.is_online());
    assert_eq!(status.port(), addr.port());

    let info = status.info().unwrap();
    let version = info.version.as_ref().unwrap();
    assert_eq!(version.name_clean, "Paper 1.20.4");
    assert_eq!(version.protocol, 765);
    assert_eq!(info.players.online, 3);
    assert_eq!(info.players.max, 100);
    assert_eq!(info.players.sample[0].name, "Notch");
    assert_eq!(info.motd.clean, "Welcome home");
    assert!(!info.legacy);
    assert!(info.query.is_none());
    assert_eq!(status.icon(), Some("data:image/png;base64,iVBORw0KGgo="));
}

#[tokio::test]
async fn test_missing_pong_still_online() {
    let mut mock = JavaServerMock::modern(STATUS_JSON);
    mock.answer_ping = false;
    let addr = mock.spawn().await;

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::default(),
        Duration::from_secs(2),
    )
    .await;

    assert!(result.is_online());
}

#[tokio::test]
async fn test_silent_server_is_offline_within_timeout() {
    let addr = JavaServerMock::silent().spawn().await;
    let client = JavaStatusClient::default();

    let started = std::time::Instant::now();
    let result = probe(&client, addr, StatusOptions::default(), Duration::from_millis(300)).await;

    assert!(!result.is_online());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_refused_connection_is_offline() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::default(),
        Duration::from_secs(1),
    )
    .await;

    assert_eq!(result.edition(), Edition::Java);
    assert!(!result.is_online());
}

#[tokio::test]
async fn test_legacy_fallback_after_kick() {
    let addr = JavaServerMock::legacy(
        ModernBehavior::LegacyKick,
        "§1\u{0}61\u{0}1.5.2\u{0}§eOld Server\u{0}4\u{0}20",
    )
    .spawn()
    .await;

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::default(),
        Duration::from_secs(2),
    )
    .await;
    let info = result.as_java().unwrap().info().unwrap();

    assert!(info.legacy);
    assert_eq!(info.version.as_ref().unwrap().name, "1.5.2");
    assert_eq!(info.version.as_ref().unwrap().protocol, 61);
    assert_eq!(info.motd.clean, "Old Server");
    assert_eq!(info.players.online, 4);
    assert_eq!(info.players.max, 20);
}

#[tokio::test]
async fn test_status_packet_length_starting_with_0xff_is_modern() {
    for pad in [252usize, 253] {
        let json = format!(r#"{{"description": "{}"}}"#, "x".repeat(pad - 19));
        assert_eq!(json.len(), pad);
        let addr = JavaServerMock::modern(&json).spawn().await;

        let result = probe(
            &JavaStatusClient::new(false),
            addr,
            StatusOptions::default(),
            Duration::from_secs(2),
        )
        .await;
        let info = result.as_java().unwrap().info().unwrap();

        assert!(!info.legacy);
        assert_eq!(info.motd.clean.len(), pad - 19);
    }
}

#[tokio::test]
async fn test_long_legacy_kick_falls_back() {
    let addr = JavaServerMock::legacy(ModernBehavior::LongLegacyKick, "Beta server§2§10")
        .spawn()
        .await;

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::default(),
        Duration::from_secs(2),
    )
    .await;
    let info = result.as_java().unwrap().info().unwrap();

    assert!(info.legacy);
    assert_eq!(info.motd.clean, "Beta server");
}

#[tokio::test]
async fn test_legacy_fallback_after_close() {
    let addr = JavaServerMock::legacy(ModernBehavior::Close, "Beta server§2§10")
        .spawn()
        .await;

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::default(),
        Duration::from_secs(2),
    )
    .await;
    let info = result.as_java().unwrap().info().unwrap();

    assert!(info.version.is_none());
    assert_eq!(info.motd.clean, "Beta server");
    assert_eq!(info.players.online, 2);
    assert_eq!(info.players.max, 10);
}

#[tokio::test]
async fn test_legacy_fallback_disabled() {
    let addr = JavaServerMock::legacy(ModernBehavior::LegacyKick, "Beta server§2§10")
        .spawn()
        .await;

    let result = probe(
        &JavaStatusClient::new(false),
        addr,
        StatusOptions::default(),
        Duration::from_secs(2),
    )
    .await;

    assert!(!result.is_online());
}

#[tokio::test]
async fn test_query_augments_status() {
    let addr = JavaServerMock::modern(STATUS_JSON).spawn().await;
    spawn_query_server(
        addr,
        vec![
            ("hostname", "A Minecraft Server"),
            ("plugins", "Paper on 1.20.4: WorldEdit 7.2; Essentials 2.20"),
            ("map", "world"),
        ],
        vec!["Notch", "jeb_"],
    )
    .await;

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::with_query(true),
        Duration::from_secs(2),
    )
    .await;
    let query = result.as_java().unwrap().info().unwrap().query.clone().unwrap();

    assert_eq!(query.software.as_deref(), Some("Paper on 1.20.4"));
    assert_eq!(query.plugins, vec!["WorldEdit 7.2", "Essentials 2.20"]);
    assert_eq!(query.world.as_deref(), Some("world"));
    assert_eq!(query.players, vec!["Notch", "jeb_"]);
}

#[tokio::test]
async fn test_query_failure_keeps_status() {
    let addr = JavaServerMock::modern(STATUS_JSON).spawn().await;

    let result = probe(
        &JavaStatusClient::default(),
        addr,
        StatusOptions::with_query(true),
        Duration::from_millis(500),
    )
    .await;
    let status = result.as_java().unwrap();

    assert!(status.is_online());
    assert!(status.info().unwrap().query.is_none());
}
