//! Three-phase dispatch against canned backend responses.

use std::sync::Arc;

use serde_json::json;
use trellis_api::http::{HttpResponse, Method, StaticExecutor};
use trellis_api::{
    Action, ActionTypes, ApiCall, ApiError, CallApi, EntityRef, Phase, ResultRef, Schema,
};
use url::Url;

const BASE: &str = "http://localhost:5000/api/";

fn likes_call() -> ApiCall {
    ApiCall::new(ActionTypes::prefixed("USER_LIKES"), "users/3/likes")
        .with_schema(Schema::array("userLike"))
}

fn call_api(executor: StaticExecutor) -> (CallApi, Arc<StaticExecutor>) {
    let executor = Arc::new(executor);
    let api = CallApi::new(executor.clone()).with_base_url(Url::parse(BASE).unwrap());
    (api, executor)
}

fn kinds(actions: &[Action]) -> Vec<&str> {
    actions.iter().map(|a| a.kind.as_str()).collect()
}

#[tokio::test]
async fn success_emits_request_then_normalized_success() {
    let (api, executor) = call_api(StaticExecutor::new().with_json(
        "http://localhost:5000/api/users/3/likes",
        json!({
            "data": [
                { "type": "like", "id": "1", "attributes": { "created_at": "2015-09-01" } },
                { "type": "like", "id": "2", "attributes": { "created_at": "2015-09-02" } }
            ]
        }),
    ));

    let mut actions = Vec::new();
    let phase = api.call(&likes_call(), &mut actions).await;

    assert_eq!(phase, Phase::Success);
    assert_eq!(kinds(&actions), vec!["USER_LIKES_REQUEST", "USER_LIKES_SUCCESS"]);

    let normalized = actions[1].normalized().expect("success carries payload");
    assert_eq!(normalized.key.as_deref(), Some("userLike"));
    assert_eq!(
        normalized.entity("like", "2").unwrap()["created_at"],
        "2015-09-02"
    );
    assert_eq!(
        normalized.result,
        Some(ResultRef::Many(vec![
            EntityRef::new("like", "1"),
            EntityRef::new("like", "2")
        ]))
    );

    let requests = executor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers,
        Some(vec![(
            "Accept".to_string(),
            "application/vnd.api+json".to_string()
        )])
    );
}

#[tokio::test]
async fn transport_error_emits_failure_only() {
    let (api, _) = call_api(
        StaticExecutor::new()
            .with_error("http://localhost:5000/api/users/3/likes", "connection refused"),
    );

    let mut actions = Vec::new();
    let phase = api.call(&likes_call(), &mut actions).await;

    assert_eq!(phase, Phase::Failure);
    assert_eq!(kinds(&actions), vec!["USER_LIKES_REQUEST", "USER_LIKES_FAILURE"]);
    assert!(actions.iter().all(|a| a.phase != Phase::Success));
    assert!(matches!(
        actions[1].error(),
        Some(ApiError::Transport { .. })
    ));
}

#[tokio::test]
async fn error_status_is_a_failure() {
    let (api, _) = call_api(StaticExecutor::new().with_response(
        "http://localhost:5000/api/users/3/likes",
        HttpResponse::json(403, &json!({ "errors": [{ "status": "403", "title": "Forbidden" }] })),
    ));

    let mut actions = Vec::new();
    api.call(&likes_call(), &mut actions).await;

    let error = actions[1].error().expect("failure carries error");
    assert_eq!(error.status(), Some(403));
}

#[tokio::test]
async fn errors_member_is_a_failure() {
    let (api, _) = call_api(StaticExecutor::new().with_json(
        "http://localhost:5000/api/users/3/likes",
        json!({ "errors": [{ "detail": "user is private" }] }),
    ));

    let mut actions = Vec::new();
    let phase = api.call(&likes_call(), &mut actions).await;

    assert_eq!(phase, Phase::Failure);
    match actions[1].error() {
        Some(ApiError::Server { errors }) => {
            assert_eq!(errors[0].detail.as_deref(), Some("user is private"))
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_failure() {
    let (api, _) = call_api(StaticExecutor::new().with_response(
        "http://localhost:5000/api/users/3/likes",
        HttpResponse::new(200, "<html>oops</html>"),
    ));

    let mut actions = Vec::new();
    api.call(&likes_call(), &mut actions).await;

    assert!(matches!(actions[1].error(), Some(ApiError::Decode { .. })));
}

#[tokio::test]
async fn relative_endpoint_without_base_fails_after_request() {
    let api = CallApi::new(Arc::new(StaticExecutor::new()));

    let mut actions = Vec::new();
    let phase = api.call(&likes_call(), &mut actions).await;

    assert_eq!(phase, Phase::Failure);
    assert_eq!(actions[0].phase, Phase::Request);
    assert!(matches!(
        actions[1].error(),
        Some(ApiError::InvalidEndpoint { .. })
    ));
}

#[tokio::test]
async fn absolute_endpoint_ignores_base() {
    let (api, executor) = call_api(StaticExecutor::new().with_json(
        "https://news.example.com/comments/",
        json!({ "data": [] }),
    ));

    let call = ApiCall::new(
        ActionTypes::prefixed("COMMENTS"),
        "https://news.example.com/comments/",
    );
    let mut actions = Vec::new();
    assert_eq!(api.call(&call, &mut actions).await, Phase::Success);
    assert_eq!(
        executor.requests()[0].url,
        "https://news.example.com/comments/"
    );
}

#[tokio::test]
async fn numeric_error_members_are_kept() {
    let (api, _) = call_api(StaticExecutor::new().with_json(
        "http://localhost:5000/api/users/3/likes",
        json!({ "errors": [{ "status": 403, "detail": "user is private" }, "rate limited"] }),
    ));

    let mut actions = Vec::new();
    api.call(&likes_call(), &mut actions).await;

    let error = actions[1].error().expect("failure carries error");
    assert_eq!(error.status(), Some(403));
    match error {
        ApiError::Server { errors } => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].status.as_deref(), Some("403"));
            assert_eq!(errors[0].detail.as_deref(), Some("user is private"));
            assert_eq!(errors[1].detail.as_deref(), Some("\"rate limited\""));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn leading_slash_endpoint_stays_under_base_path() {
    let (api, executor) = call_api(StaticExecutor::new().with_json(
        "http://localhost:5000/api/comments/",
        json!({ "data": [] }),
    ));

    let call = ApiCall::new(ActionTypes::prefixed("COMMENTS"), "/comments/");
    let mut actions = Vec::new();

    assert_eq!(api.call(&call, &mut actions).await, Phase::Success);
    assert_eq!(
        executor.requests()[0].url,
        "http://localhost:5000/api/comments/"
    );
}

#[tokio::test]
async fn call_method_reaches_the_executor() {
    let (api, executor) = call_api(StaticExecutor::new().with_json(
        "http://localhost:5000/api/users/3/likes",
        json!({ "data": [] }),
    ));

    let call = likes_call().with_method(Method::Delete);
    let mut actions = Vec::new();
    api.call(&call, &mut actions).await;

    assert_eq!(executor.requests()[0].method, Method::Delete);
}
