use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::identity::CallerId;
use crate::models::{CreateEvent, Event, EventCategory, UpdateEvent};
use crate::query::{ListEventsParams, PageMeta, QueryResult};
use crate::service::EventService;
use crate::store::EventStore;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event, delete_event),
    components(
        schemas(Event, CreateEvent, UpdateEvent, EventCategory, PageMeta, QueryResult),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Events owned by the authenticated user")
    )
)]
pub struct ApiDoc;

type SharedService<S> = Arc<EventService<S>>;

/// Create the events router. Expects verified [`axum_helpers::JwtClaims`] in
/// request extensions, as installed by `jwt_auth_middleware`.
pub fn router<S: EventStore + 'static>(service: EventService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .with_state(shared_service)
}

/// List the caller's events, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(ListEventsParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "One page of events", body = QueryResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_events<S: EventStore>(
    State(service): State<SharedService<S>>,
    caller: CallerId,
    Query(params): Query<ListEventsParams>,
) -> EventResult<Json<QueryResult>> {
    let result = service.list_events(caller, params).await?;
    Ok(Json(result))
}

/// Create an event owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_event<S: EventStore>(
    State(service): State<SharedService<S>>,
    caller: CallerId,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create(caller, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get one of the caller's events
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_event<S: EventStore>(
    State(service): State<SharedService<S>>,
    caller: CallerId,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Event>> {
    let event = service.get(caller, id).await?;
    Ok(Json(event))
}

/// Partially update an event
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_event<S: EventStore>(
    State(service): State<SharedService<S>>,
    caller: CallerId,
    UuidPath(id): UuidPath,
    ValidatedJson(patch): ValidatedJson<UpdateEvent>,
) -> EventResult<Json<Event>> {
    let event = service.update(caller, id, patch).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_event<S: EventStore>(
    State(service): State<SharedService<S>>,
    caller: CallerId,
    UuidPath(id): UuidPath,
) -> EventResult<StatusCode> {
    service.delete(caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventsConfig;
    use crate::store::MockEventStore;
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::JwtClaims;
    use tower::ServiceExt;

    fn claims(sub: &str) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "someone@example.com".to_string(),
            name: "Someone".to_string(),
            roles: vec![],
            exp: i64::MAX,
            iat: 0,
            jti: "test".to_string(),
        }
    }

    /// A store with no expectations panics on any call.
    fn untouchable_router() -> Router {
        router(EventService::new(MockEventStore::new(), EventsConfig::default()))
    }

    #[tokio::test]
    async fn test_invalid_subject_is_rejected_before_store() {
        for sub in ["", "user-42", "00000000-0000-0000-0000-000000000000"] {
            let mut request = Request::builder()
                .uri("/?page=1&limit=5")
                .body(Body::empty())
                .unwrap();
            request.extensions_mut().insert(claims(sub));

            let response = untouchable_router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "sub {sub:?}");
        }
    }

    #[tokio::test]
    async fn test_missing_claims_rejects_mutation() {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", uuid::Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = untouchable_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
