//! Relay Integration Tests
//!
//! Each test spawns its own gateway on an ephemeral port.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use integration_tests::{fixtures, unique_room, TestServer};
use relay_gateway::protocol::OutboundEnvelope;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .client
        .get(format!("{}/health", server.base_url()))
        .send()
        .await
        .expect("Request failed");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_stats_track_connections_and_rooms() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();
    alice.join("alice", &unique_room("stats")).await.unwrap();

    let stats = server.stats().await.unwrap();
    assert_eq!((stats.connections, stats.rooms), (1, 1));

    alice.close().await.unwrap();
    server
        .wait_for_stats(|s| s.connections == 0 && s.rooms == 0)
        .await
        .unwrap();
}

// ============================================================================
// Room Tests
// ============================================================================

#[tokio::test]
async fn test_join_and_chat() {
    let server = TestServer::start().await.unwrap();
    let room = unique_room("general");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    assert_eq!(alice.join("alice", &room).await.unwrap(), vec!["alice"]);
    assert_eq!(bob.join("bob", &room).await.unwrap(), vec!["alice", "bob"]);
    carol.join("carol", &unique_room("elsewhere")).await.unwrap();

    assert_eq!(alice.recv_system().await.unwrap(), "bob joined the room");
    assert_eq!(alice.recv_user_list().await.unwrap(), vec!["alice", "bob"]);

    alice.send(&fixtures::message("hello bob")).await.unwrap();

    for client in [&mut alice, &mut bob] {
        match client.recv().await.unwrap() {
            OutboundEnvelope::Message {
                username, content, ..
            } => {
                assert_eq!(username, "alice");
                assert_eq!(content, "hello bob");
            }
            other => panic!("expected message, got {other:?}"),
        }
    }
    carol.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_leave_notifies_remaining_members() {
    let server = TestServer::start().await.unwrap();
    let room = unique_room("leave");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    alice.join("alice", &room).await.unwrap();
    bob.join("bob", &room).await.unwrap();
    alice.recv_n(2).await.unwrap();

    bob.send(&fixtures::leave()).await.unwrap();

    assert_eq!(alice.recv_system().await.unwrap(), "bob left the room");
    assert_eq!(alice.recv_user_list().await.unwrap(), vec!["alice"]);
    bob.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_switching_rooms() {
    let server = TestServer::start().await.unwrap();
    let first = unique_room("first");
    let second = unique_room("second");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    alice.join("alice", &first).await.unwrap();
    bob.join("bob", &first).await.unwrap();
    alice.recv_n(2).await.unwrap();

    assert_eq!(bob.join("bob", &second).await.unwrap(), vec!["bob"]);

    assert_eq!(alice.recv_system().await.unwrap(), "bob left the room");
    assert_eq!(alice.recv_user_list().await.unwrap(), vec!["alice"]);

    // alice no longer hears bob
    bob.send(&fixtures::message("only me")).await.unwrap();
    bob.recv().await.unwrap();
    alice.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_disconnect_runs_leave() {
    let server = TestServer::start().await.unwrap();
    let room = unique_room("disconnect");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    alice.join("alice", &room).await.unwrap();
    bob.join("bob", &room).await.unwrap();
    alice.recv_n(2).await.unwrap();

    bob.close().await.unwrap();

    assert_eq!(alice.recv_system().await.unwrap(), "bob left the room");
    assert_eq!(alice.recv_user_list().await.unwrap(), vec!["alice"]);
    server
        .wait_for_stats(|s| s.connections == 1)
        .await
        .unwrap();
}

// ============================================================================
// Private Room Tests
// ============================================================================

#[tokio::test]
async fn test_private_room_admission() {
    let server = TestServer::start().await.unwrap();
    let room = unique_room("private");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    alice
        .send(&fixtures::create_private_room("alice", &room, &["bob"]))
        .await
        .unwrap();
    assert_eq!(alice.recv_system().await.unwrap(), "alice joined the room");
    assert_eq!(alice.recv_user_list().await.unwrap(), vec!["alice"]);

    carol.send(&fixtures::join("carol", &room)).await.unwrap();
    assert!(carol
        .recv_error()
        .await
        .unwrap()
        .starts_with("Permission denied"));
    alice.expect_silence().await.unwrap();

    assert_eq!(bob.join("bob", &room).await.unwrap(), vec!["alice", "bob"]);
    assert_eq!(alice.recv_system().await.unwrap(), "bob joined the room");
}

#[tokio::test]
async fn test_denied_join_leaves_old_room() {
    let server = TestServer::start().await.unwrap();
    let private = unique_room("locked");
    let lobby = unique_room("lobby");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    alice
        .send(&fixtures::create_private_room("alice", &private, &[]))
        .await
        .unwrap();
    alice.recv_n(2).await.unwrap();
    bob.join("bob", &lobby).await.unwrap();
    carol.join("carol", &lobby).await.unwrap();
    bob.recv_n(2).await.unwrap();

    carol.send(&fixtures::join("carol", &private)).await.unwrap();

    assert!(carol
        .recv_error()
        .await
        .unwrap()
        .starts_with("Permission denied"));
    assert_eq!(bob.recv_system().await.unwrap(), "carol left the room");
    assert_eq!(bob.recv_user_list().await.unwrap(), vec!["bob"]);

    // carol is unjoined, so her messages go nowhere
    carol.send(&fixtures::message("hello?")).await.unwrap();
    carol.expect_silence().await.unwrap();
    bob.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_update_allowed_users() {
    let server = TestServer::start().await.unwrap();
    let room = unique_room("acl");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    alice
        .send(&fixtures::create_private_room("alice", &room, &[]))
        .await
        .unwrap();
    alice.recv_n(2).await.unwrap();
    carol.join("carol", &unique_room("lobby")).await.unwrap();

    // carol is not on the list
    carol
        .send(&fixtures::update_allowed_users(&room, &["carol"]))
        .await
        .unwrap();
    assert!(carol
        .recv_error()
        .await
        .unwrap()
        .starts_with("Permission denied"));

    alice
        .send(&fixtures::update_allowed_users(&room, &["bob"]))
        .await
        .unwrap();
    assert_eq!(
        alice.recv_system().await.unwrap(),
        "alice updated the allowed users"
    );

    assert_eq!(bob.join("bob", &room).await.unwrap(), vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_private_room_outlives_its_members() {
    let server = TestServer::start().await.unwrap();
    let room = unique_room("vault");

    let mut alice = server.connect().await.unwrap();
    alice
        .send(&fixtures::create_private_room("alice", &room, &["bob"]))
        .await
        .unwrap();
    alice.recv_n(2).await.unwrap();
    alice.close().await.unwrap();
    server
        .wait_for_stats(|s| s.connections == 0)
        .await
        .unwrap();

    let mut carol = server.connect().await.unwrap();
    carol.send(&fixtures::join("carol", &room)).await.unwrap();
    carol.recv_error().await.unwrap();

    let mut bob = server.connect().await.unwrap();
    assert_eq!(bob.join("bob", &room).await.unwrap(), vec!["bob"]);
}

// ============================================================================
// Protocol Error Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_type_gets_error_reply() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();

    alice
        .send(&serde_json::json!({"type": "shout", "content": "hi"}))
        .await
        .unwrap();

    assert_eq!(
        alice.recv_error().await.unwrap(),
        "Unknown message type: shout"
    );
}

#[tokio::test]
async fn test_malformed_and_binary_frames_are_ignored() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();

    alice.send_text("{definitely not json").await.unwrap();
    alice.send_text("[1, 2, 3]").await.unwrap();
    alice.send_binary(vec![0, 159, 146, 150]).await.unwrap();
    alice.expect_silence().await.unwrap();

    // the session is still usable
    assert_eq!(
        alice.join("alice", &unique_room("after")).await.unwrap(),
        vec!["alice"]
    );
}

#[tokio::test]
async fn test_message_before_join_is_ignored() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();

    alice.send(&fixtures::message("anyone?")).await.unwrap();
    alice.expect_silence().await.unwrap();
}
