//! Tests for the host message protocol and the host-backed fetcher.

#![allow(unused_results)]

use livesheet_editor::messaging::HostResponse;
use livesheet_editor::{
    FetchError, HostBridge, HostMessage, MessageError, MessageRouter, ResourceFetcher,
};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_parse_messages() {
    assert_eq!(HostMessage::parse(r#"{"toggle": true}"#).unwrap(), HostMessage::Toggle);
    assert_eq!(HostMessage::parse(r#"{"toggle": null}"#).unwrap(), HostMessage::Toggle);
    assert_eq!(
        HostMessage::parse(r#"{"get": "https://a.test/x.css"}"#).unwrap(),
        HostMessage::Get {
            url: "https://a.test/x.css".to_string()
        }
    );
    assert_eq!(HostMessage::parse(r#"{"get": 4}"#).unwrap(), HostMessage::Other);
    assert_eq!(HostMessage::parse("{}").unwrap(), HostMessage::Other);
    assert!(matches!(HostMessage::parse("[1]"), Err(MessageError::Json(_))));
}

#[test]
fn test_encode_get() {
    let message = HostMessage::Get {
        url: "a.css".to_string(),
    };
    assert_eq!(message.to_json(), r#"{"get":"a.css"}"#);
    assert_eq!(HostMessage::parse(&message.to_json()).unwrap(), message);
}

#[test]
fn test_response_into_result() {
    let ok = HostResponse::parse(r#"{"text": "a {}"}"#).unwrap();
    assert_eq!(ok.into_result().unwrap(), "a {}");

    let err = HostResponse::parse(r#"{"err": "404", "text": ""}"#).unwrap();
    assert!(matches!(err.into_result(), Err(FetchError::Host(msg)) if msg == "404"));
}

#[test]
fn test_router_runs_toggle_handlers() {
    let count = Rc::new(Cell::new(0));
    let mut router = MessageRouter::new();
    let seen = Rc::clone(&count);
    router.on_toggle_message(move || seen.set(seen.get() + 1));

    assert!(router.dispatch(r#"{"toggle": 1}"#).unwrap());
    assert!(!router.dispatch(r#"{"other": 1}"#).unwrap());
    assert!(router.dispatch("not json").is_err());
    assert_eq!(count.get(), 1);
}

#[tokio::test]
async fn test_bridge_round_trip() {
    let (bridge, mut requests) = HostBridge::new();
    let host = tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            let response = if request.url.ends_with("ok.css") {
                HostResponse::text("ok {}")
            } else {
                HostResponse::error("not found")
            };
            request.respond(response);
        }
    });

    assert_eq!(bridge.fetch("https://a.test/ok.css").await.unwrap(), "ok {}");
    assert!(matches!(
        bridge.fetch("https://a.test/missing.css").await,
        Err(FetchError::Host(msg)) if msg == "not found"
    ));

    drop(bridge);
    host.await.unwrap();
}

#[tokio::test]
async fn test_bridge_without_host() {
    let (bridge, requests) = HostBridge::new();
    drop(requests);
    assert!(matches!(
        bridge.fetch("a.css").await,
        Err(FetchError::Host(_))
    ));
}

#[tokio::test]
async fn test_pending_request_wire_format() {
    let (bridge, mut requests) = HostBridge::new();
    let fetch = bridge.fetch("x.css");
    let (result, ()) = tokio::join!(fetch, async {
        let request = requests.recv().await.unwrap();
        assert_eq!(request.to_json(), r#"{"get":"x.css"}"#);
        request.respond(HostResponse::text("x {}"));
    });
    assert_eq!(result.unwrap(), "x {}");
}
