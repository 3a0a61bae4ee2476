//! Server runner: router assembly and the serve loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    infrastructure::{dispatcher::spawn_dispatcher, repository::InMemoryChatRepository},
    ui::{handler, signal::shutdown_signal, state::AppState},
    usecase::RoomRelay,
};

/// Build the application router
pub fn build_app(state: Arc<AppState>) -> Router {
    let chitchat = Router::new()
        .route("/rooms", get(handler::get_rooms).post(handler::create_room))
        .route(
            "/rooms/{room_id}",
            get(handler::get_room_detail)
                .put(handler::update_room)
                .delete(handler::delete_room),
        )
        .route("/room/{room_id}", get(handler::get_room_detail))
        .route(
            "/messages",
            post(handler::create_message).get(handler::get_messages),
        );

    let api = Router::new()
        .route("/health", get(handler::health_check))
        .route("/debug/relay", get(handler::debug_relay_state))
        .nest("/chitchat", chitchat);

    Router::new()
        .nest("/api", api)
        .route("/ws", get(handler::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let repository = Arc::new(InMemoryChatRepository::new());
    let (relay, dispatcher) = spawn_dispatcher(RoomRelay::new());
    let state = Arc::new(AppState::new(repository, relay.clone()));

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    relay.shutdown();
    match dispatcher.await {
        Ok(relay) => tracing::info!(
            connections = relay.registry().connection_count(),
            "Relay dispatcher finished"
        ),
        Err(e) => tracing::error!(error = %e, "Relay dispatcher panicked"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_app() -> Router {
        let (relay, _task) = spawn_dispatcher(RoomRelay::new());
        let repository = Arc::new(InMemoryChatRepository::new());
        build_app(Arc::new(AppState::new(repository, relay)))
    }

    #[tokio::test]
    async fn test_health_route() {
        // テスト項目: /api/health が 200 と status=ok を返す
        // given (前提条件):
        let app = test_app();

        // when (操作):
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_blank_room_id_in_path_is_not_found() {
        // テスト項目: 空白だけのルーム ID は 404 になる
        // given (前提条件):
        let app = test_app();

        // when (操作):
        let response = app
            .oneshot(
                Request::get("/api/chitchat/rooms/%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_unknown_room_succeeds() {
        // テスト項目: 存在しないルームの削除も 200 と完了メッセージを返す
        // given (前提条件):
        let app = test_app();

        // when (操作):
        let response = app
            .oneshot(
                Request::delete("/api/chitchat/rooms/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"message": "Room deleted successfully"})
        );
    }

    #[tokio::test]
    async fn test_history_of_unknown_room_is_empty() {
        // テスト項目: 存在しないルームの履歴取得は 200 と空の配列を返す
        // given (前提条件):
        let app = test_app();

        // when (操作):
        let response = app
            .oneshot(
                Request::get("/api/chitchat/messages?room=nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_update_with_empty_name_keeps_name() {
        // テスト項目: 空の名前での PUT は 200 を返し、名前は変わらない
        // given (前提条件):
        let app = test_app();
        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/chitchat/rooms",
                serde_json::json!({"name": "general", "description": "d", "owner": "alice"}),
            ))
            .await
            .unwrap();
        let room = json_body(created).await;
        let uri = format!("/api/chitchat/rooms/{}", room["id"].as_str().unwrap());

        // when (操作):
        let response = app
            .oneshot(json_request("PUT", &uri, serde_json::json!({"name": ""})))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "general");
    }

    #[tokio::test]
    async fn test_password_room_is_private() {
        // テスト項目: パスワード付きで作成したルームは非公開となり、パスワードは返されない
        // given (前提条件):
        let app = test_app();

        // when (操作):
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/chitchat/rooms",
                serde_json::json!({
                    "name": "secret",
                    "description": "d",
                    "owner": "alice",
                    "password": "hunter2",
                }),
            ))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(response.status(), StatusCode::CREATED);
        let room = json_body(response).await;
        assert_eq!(room["is_private"], true);
        assert!(room.get("password").is_none());
    }
}
