//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hestia_app::ports::Registry;
use hestia_domain::device::Device;
use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
use hestia_domain::room::Room;
use hestia_domain::scenario::Scenario;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts API routes under `/api` and a plain-text health probe at
/// `/health`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<DR, RR, SR>(state: AppState<DR, RR, SR>) -> Router
where
    DR: Registry<Id = DeviceId, Entry = Device> + 'static,
    RR: Registry<Id = RoomId, Entry = Room> + 'static,
    SR: Registry<Id = ScenarioId, Entry = Scenario> + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use hestia_app::registry::MemoryRegistry;
    use hestia_app::services::device_service::DeviceService;
    use hestia_app::services::room_service::RoomService;
    use hestia_app::services::scenario_service::ScenarioService;
    use hestia_domain::device::{Device, DeviceState, Tv};
    use hestia_domain::id::{DeviceId, RoomId, ScenarioId};
    use hestia_domain::room::Room;
    use hestia_domain::scenario::Scenario;

    use super::*;

    type TestState = AppState<
        MemoryRegistry<DeviceId, Device>,
        MemoryRegistry<RoomId, Room>,
        MemoryRegistry<ScenarioId, Scenario>,
    >;

    fn test_state() -> TestState {
        let device_service = Arc::new(DeviceService::new(MemoryRegistry::new()));
        let room_service = Arc::new(RoomService::new(
            MemoryRegistry::new(),
            Arc::clone(&device_service),
        ));
        let scenario_service = Arc::new(ScenarioService::new(
            MemoryRegistry::new(),
            Arc::clone(&device_service),
        ));
        AppState::new(device_service, room_service, scenario_service)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_create_device_and_return_created() {
        let app = build(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/devices",
                serde_json::json!({"kind": "lamp", "color": "blue"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn should_return_bad_request_for_unknown_device_kind() {
        let app = build(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/devices",
                serde_json::json!({"kind": "toaster"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_device() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/devices/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_update_names_no_known_field() {
        let state = test_state();
        let device = state
            .device_service
            .register_device(DeviceState::Tv(Tv::default()));
        let app = build(state);

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/api/devices/{}", device.id),
                serde_json::json!({"frequency": 2}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_bad_request_for_exclusive_tv_fields() {
        let state = test_state();
        let device = state
            .device_service
            .register_device(DeviceState::Tv(Tv::default()));
        let app = build(state);

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/api/devices/{}", device.id),
                serde_json::json!({"current_app": "netflix", "current_channel": "sports"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_no_content_on_device_deletion() {
        let state = test_state();
        let device = state
            .device_service
            .register_device(DeviceState::Tv(Tv::default()));
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/devices/{}", device.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn should_create_room_and_apply_scenario_routes() {
        let app = build(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/rooms",
                serde_json::json!({"kind": "kitchen"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn should_reject_applying_scenario_with_empty_routine() {
        let state = test_state();
        let scenario = state.scenario_service.create_scenario("evening", vec![]);
        let app = build(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/api/scenarios/{}/apply", scenario.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
