//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::{MessageText, RoomId, RoomUpdate, Username},
    infrastructure::dto::http::{
        CreateMessageRequest, CreateRoomRequest, ErrorDto, ListMessagesQuery, MessageDto,
        RelaySnapshotDto, RoomDto, RoomSubscribersDto, UpdateRoomRequest,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{MessageUseCase, NewRoom, RoomUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint exposing the live relay state
pub async fn debug_relay_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RelaySnapshotDto>, ApiError> {
    let snapshot = state.relay.snapshot().await?;

    Ok(Json(RelaySnapshotDto {
        connections: snapshot.connections,
        rooms: snapshot
            .rooms
            .into_iter()
            .map(|(room_id, subscribers)| RoomSubscribersDto {
                room_id: room_id.into_string(),
                subscribers,
            })
            .collect(),
    }))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let rooms = RoomUseCase::new(state.repository.clone()).list().await?;
    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}

/// Create a room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomDto>), ApiError> {
    let input = NewRoom {
        is_private: body.is_private(),
        name: body.name,
        description: body.description,
        owner: Username::new(body.owner)?,
        members: parse_members(body.members)?,
    };

    let room = RoomUseCase::new(state.repository.clone())
        .create(input)
        .await?;

    Ok((StatusCode::CREATED, Json(room.into())))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDto>, ApiError> {
    let room_id = parse_path_room_id(room_id)?;
    let room = RoomUseCase::new(state.repository.clone())
        .get(&room_id)
        .await?;
    Ok(Json(room.into()))
}

/// Update room name and/or members
pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(body): Json<UpdateRoomRequest>,
) -> Result<Json<RoomDto>, ApiError> {
    let room_id = parse_path_room_id(room_id)?;
    let update = RoomUpdate {
        name: body.name,
        members: body.members.map(parse_members).transpose()?,
    };

    let room = RoomUseCase::new(state.repository.clone())
        .update(&room_id, update)
        .await?;
    Ok(Json(room.into()))
}

/// Delete a room and its history
///
/// Succeeds whether or not the room existed.
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<ErrorDto>, ApiError> {
    if let Ok(room_id) = RoomId::new(room_id) {
        RoomUseCase::new(state.repository.clone())
            .delete(&room_id)
            .await?;
    }
    Ok(Json(ErrorDto {
        message: "Room deleted successfully".to_string(),
    }))
}

/// Persist a message
///
/// Independent of the live relay: clients emit over the WebSocket and call
/// this endpoint separately to keep history.
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let room_id = RoomId::new(body.room)?;
    let sender = Username::new(body.sender)?;
    let text = MessageText::new(body.text)?;

    let message = MessageUseCase::new(state.repository.clone())
        .post(room_id, sender, text)
        .await?;

    Ok((StatusCode::CREATED, Json(message.into())))
}

/// Get a room's message history
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let room_id = RoomId::new(query.room)?;
    let messages = MessageUseCase::new(state.repository.clone())
        .list(&room_id)
        .await?;
    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}

fn parse_members(members: Vec<String>) -> Result<Vec<Username>, ApiError> {
    members
        .into_iter()
        .map(|m| Username::new(m).map_err(ApiError::from))
        .collect()
}

/// Unparseable ids in a path cannot name an existing room
fn parse_path_room_id(raw: String) -> Result<RoomId, ApiError> {
    RoomId::new(raw).map_err(|_| ApiError::NotFound("Room not found".to_string()))
}
