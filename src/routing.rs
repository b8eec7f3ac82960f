//! Application router configuration.

use axum::{Router, middleware, routing::post};

use crate::{
    AppState,
    bot::{get_status, post_webhook},
    endpoints,
    logging::logging_middleware,
    store::SheetStore,
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: SheetStore + Clone + 'static,
{
    Router::new()
        .route(endpoints::WEBHOOK, post(post_webhook).get(get_status))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod webhook_route_tests {
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{AppState, endpoints, routing::build_router, store::MemorySheetStore};

    fn test_server() -> TestServer {
        let state = AppState::new(MemorySheetStore::default(), None);

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn the_webhook_route_answers_the_liveness_check() {
        let server = test_server();

        let response = server.get(endpoints::WEBHOOK).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "status": "Bot is running! 🤖" }));
    }

    #[tokio::test]
    async fn unknown_routes_get_a_404() {
        let server = test_server();

        server.get("/nope").await.assert_status_not_found();
    }
}
