use bytes::Bytes;
use hickory_proto::op::{Message, MessageType, OpCode, Query, UpdateMessage};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use matchrelay_application::ports::RelayDispatcher;
use matchrelay_domain::{RelayError, RelayQuery};
use matchrelay_infrastructure::relay::UdpRelayDispatcher;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::UdpSocket;

fn serialize(message: &Message) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

fn query_bytes(name: &str, id: u16) -> Bytes {
    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(RecordType::A);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.metadata.recursion_desired = true;
    message.add_query(query);

    Bytes::from(serialize(&message))
}

fn relay_query(name: &str, id: u16) -> RelayQuery {
    RelayQuery::new(
        format!("{name}."),
        "10.1.2.3".parse::<IpAddr>().unwrap(),
        query_bytes(name, id),
    )
}

/// Upstream stub that answers every query by echoing it back with the
/// response flag set.
async fn spawn_echo_upstream() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                break;
            };
            let mut message = Message::from_vec(&buf[..len]).unwrap();
            message.metadata.message_type = MessageType::Response;
            let _ = socket.send_to(&serialize(&message), peer).await;
        }
    });
    addr
}

/// Bound socket that never answers, to force a receive timeout.
async fn spawn_silent_upstream() -> (UdpSocket, SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    (socket, addr)
}

#[tokio::test]
async fn test_dispatch_returns_upstream_response() {
    let upstream = spawn_echo_upstream().await;
    let dispatcher = UdpRelayDispatcher::new().with_timeout(Duration::from_secs(2));

    let query = relay_query("foo.example.org", 0x4242);
    let response = dispatcher.dispatch(&query, &[upstream]).await.unwrap();

    let message = Message::from_vec(&response).unwrap();
    assert_eq!(message.id(), 0x4242);
    assert_eq!(message.message_type, MessageType::Response);
}

#[tokio::test]
async fn test_dead_target_falls_over_to_the_next_one() {
    let (_silent_socket, silent) = spawn_silent_upstream().await;
    let upstream = spawn_echo_upstream().await;
    let dispatcher = UdpRelayDispatcher::new().with_timeout(Duration::from_millis(200));

    let query = relay_query("foo.example.org", 0x0101);
    let response = dispatcher
        .dispatch(&query, &[silent, upstream])
        .await
        .unwrap();

    assert_eq!(Message::from_vec(&response).unwrap().id(), 0x0101);
}

#[tokio::test]
async fn test_all_targets_dead_reports_the_last_failure() {
    let (_silent_socket, silent) = spawn_silent_upstream().await;
    let dispatcher = UdpRelayDispatcher::new().with_timeout(Duration::from_millis(100));

    let query = relay_query("foo.example.org", 0x0202);
    let err = dispatcher.dispatch(&query, &[silent]).await.unwrap_err();

    assert!(matches!(err, RelayError::DispatchTimeout { .. }));
}

#[tokio::test]
async fn test_malformed_query_message_is_rejected() {
    let upstream = spawn_echo_upstream().await;
    let dispatcher = UdpRelayDispatcher::new();

    let query = RelayQuery::new(
        "foo.example.org.",
        "10.1.2.3".parse::<IpAddr>().unwrap(),
        Bytes::from_static(b"\x00"),
    );
    let err = dispatcher.dispatch(&query, &[upstream]).await.unwrap_err();

    assert!(matches!(err, RelayError::Dispatch(_)));
}

#[tokio::test]
async fn test_empty_target_list_is_an_error() {
    let dispatcher = UdpRelayDispatcher::new();
    let query = relay_query("foo.example.org", 0x0303);

    assert!(matches!(
        dispatcher.dispatch(&query, &[]).await.unwrap_err(),
        RelayError::NoRelayTargets
    ));
}
