//! Incoming realtime message handling.

use devradar_common::PresenceRecord;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::{events, DevPayload, FeedMessage};

use super::types::TransportEvent;

/// Translate one text frame into zero or one [`TransportEvent`]s.
///
/// Returns `false` once the event receiver is gone, which ends the
/// connection loop.
pub(crate) async fn handle_text_message(
    text: &str,
    event_tx: &mpsc::Sender<TransportEvent>,
) -> bool {
    let Some(event) = translate(text) else {
        return true;
    };
    event_tx.send(event).await.is_ok()
}

fn translate(text: &str) -> Option<TransportEvent> {
    let msg = match serde_json::from_str::<FeedMessage>(text) {
        Ok(msg) => msg,
        Err(_) => {
            debug!(text = %text, "Unrecognized message from presence feed");
            return None;
        }
    };

    match msg.event.as_str() {
        events::NEW_DEV => {
            let record = serde_json::from_value::<DevPayload>(msg.payload)
                .map_err(|e| e.to_string())
                .and_then(|dev| PresenceRecord::try_from(dev).map_err(|e| e.to_string()));
            match record {
                Ok(record) => {
                    debug!(id = %record.id, "Presence event received");
                    Some(TransportEvent::Presence(record))
                }
                Err(e) => {
                    warn!(error = %e, "Malformed new-dev payload");
                    Some(TransportEvent::Error(format!("malformed new-dev payload: {e}")))
                }
            }
        }
        events::HEARTBEAT => None,
        other => {
            debug!(event = %other, "Unhandled presence feed event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_dev(id: &str) -> String {
        serde_json::json!({
            "event": "new-dev",
            "payload": {
                "_id": id,
                "github_username": "octocat",
                "name": "Octo",
                "avatar_url": "https://example.com/a.png",
                "techs": ["go"],
                "location": { "type": "Point", "coordinates": [-46.6, -23.5] }
            }
        })
        .to_string()
    }

    #[test]
    fn new_dev_becomes_presence_event() {
        match translate(&new_dev("abc")) {
            Some(TransportEvent::Presence(record)) => {
                assert_eq!(record.id, "abc");
                assert_eq!(record.coordinates.latitude, -23.5);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_new_dev_becomes_error_event() {
        let text = r#"{"event":"new-dev","payload":{"_id":"x"}}"#;
        assert!(matches!(translate(text), Some(TransportEvent::Error(_))));
    }

    #[test]
    fn unknown_events_and_garbage_are_ignored() {
        assert_eq!(translate(r#"{"event":"dev-left","payload":{}}"#), None);
        assert_eq!(translate(r#"{"event":"heartbeat"}"#), None);
        assert_eq!(translate("not json"), None);
    }

    #[tokio::test]
    async fn closed_receiver_stops_the_loop() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        assert!(!handle_text_message(&new_dev("abc"), &tx).await);
    }

    #[tokio::test]
    async fn ignored_messages_keep_the_loop_running() {
        let (tx, _rx) = mpsc::channel(1);
        assert!(handle_text_message("not json", &tx).await);
    }
}
