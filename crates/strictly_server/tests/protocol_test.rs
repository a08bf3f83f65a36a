//! Tests for the JSON shape of client and server frames.

use serde_json::{Value, json};
use strictly_connect4::{Color, GameError, ParticipantId, RoomDirectory, SessionId};
use strictly_server::{ClientMessage, ServerMessage};

#[test]
fn test_client_messages_parse() {
    let enter: ClientMessage =
        serde_json::from_str(r#"{"type":"enterLobby","name":"Alice"}"#).expect("Valid frame");
    assert_eq!(
        enter,
        ClientMessage::EnterLobby {
            name: "Alice".to_string()
        }
    );

    let join: ClientMessage = serde_json::from_str(r#"{"type":"joinRoom","roomId":3,"name":"Bob"}"#)
        .expect("Valid frame");
    assert_eq!(
        join,
        ClientMessage::JoinRoom {
            room_id: SessionId(3),
            name: "Bob".to_string()
        }
    );

    let leave: ClientMessage =
        serde_json::from_str(r#"{"type":"leaveRoom","roomId":3}"#).expect("Valid frame");
    assert_eq!(
        leave,
        ClientMessage::LeaveRoom {
            room_id: SessionId(3)
        }
    );
}

#[test]
fn test_room_intents_may_omit_name() {
    let create: ClientMessage =
        serde_json::from_str(r#"{"type":"createRoom"}"#).expect("Valid frame");
    assert_eq!(
        create,
        ClientMessage::CreateRoom {
            name: String::new()
        }
    );

    let join: ClientMessage =
        serde_json::from_str(r#"{"type":"joinRoom","roomId":2}"#).expect("Valid frame");
    assert_eq!(
        join,
        ClientMessage::JoinRoom {
            room_id: SessionId(2),
            name: String::new()
        }
    );
}

#[test]
fn test_negative_column_reaches_the_engine() {
    let frame: ClientMessage =
        serde_json::from_str(r#"{"type":"makeMove","roomId":1,"column":-1}"#).expect("Valid frame");
    assert_eq!(
        frame,
        ClientMessage::MakeMove {
            room_id: SessionId(1),
            column: -1
        }
    );
}

#[test]
fn test_malformed_frames_fail_to_parse() {
    for text in [
        r#"{"type":"dance"}"#,
        r#"{"type":"makeMove","roomId":1}"#,
        r#"{"type":"makeMove","roomId":1,"column":"three"}"#,
        "not json",
    ] {
        assert!(
            serde_json::from_str::<ClientMessage>(text).is_err(),
            "{text} should not parse"
        );
    }
}

#[test]
fn test_room_created_shape() {
    let message = ServerMessage::RoomCreated {
        room_id: SessionId(7),
        color: Color::PlayerA,
    };
    let value = serde_json::to_value(&message).expect("Serializable");
    assert_eq!(
        value,
        json!({"type": "roomCreated", "roomId": 7, "color": "player1"})
    );
}

#[test]
fn test_room_joined_carries_state() {
    let mut rooms = RoomDirectory::default();
    let room_id = rooms.create(ParticipantId(1), "Alice");
    let joined = rooms
        .join(room_id, ParticipantId(2), "Bob")
        .expect("Seat free");
    let message = ServerMessage::RoomJoined {
        room_id,
        color: *joined.color(),
        state: joined.snapshot().clone(),
    };

    let value = serde_json::to_value(&message).expect("Serializable");
    assert_eq!(value["type"], "roomJoined");
    assert_eq!(value["color"], "player2");
    assert_eq!(value["state"]["status"], "playing");
    assert_eq!(value["state"]["currentTurnColor"], "player1");
    assert_eq!(value["state"]["board"].as_array().map(Vec::len), Some(6));
    assert!(value["state"].get("winner").is_none());
}

#[test]
fn test_error_replies_carry_codes() {
    let err = GameError::ColumnFull(4);
    let rejected = serde_json::to_value(ServerMessage::move_rejected(&err)).expect("Serializable");
    assert_eq!(rejected["type"], "moveRejected");
    assert_eq!(rejected["code"], "columnFull");
    assert!(rejected["reason"].as_str().is_some_and(|s| !s.is_empty()));

    let err = GameError::SessionNotFound(SessionId(9));
    let error = serde_json::to_value(ServerMessage::error(&err)).expect("Serializable");
    assert_eq!(error["type"], "error");
    assert_eq!(error["code"], "sessionNotFound");

    let bad =
        serde_json::to_value(ServerMessage::bad_request("missing field")).expect("Serializable");
    assert_eq!(
        bad,
        json!({"type": "error", "code": "badRequest", "message": "missing field"})
    );
}

#[test]
fn test_available_rooms_shape() {
    let mut rooms = RoomDirectory::default();
    rooms.create(ParticipantId(1), "Alice");
    let message = ServerMessage::AvailableRooms {
        rooms: rooms.list(),
    };

    let value: Value = serde_json::to_value(&message).expect("Serializable");
    assert_eq!(
        value,
        json!({
            "type": "availableRooms",
            "rooms": [{"id": 1, "creator": "Alice", "status": "waiting"}]
        })
    );
}
