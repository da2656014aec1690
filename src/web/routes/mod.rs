use crate::web::{doc::ApiDoc, AppState};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod lessons;

pub fn build_app<S: Send + Sync + Clone + 'static>(state: AppState, docs: bool) -> Router<S> {
    let mut router = Router::new()
        .nest("/api/v1/lessons/", lessons::routes(state.clone()))
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if docs {
        let openapi = ApiDoc::openapi();

        router = router
            .merge(
                SwaggerUi::new("/api/v1/docs")
                    .url("/api-doc/openapi.json", openapi),
            );
    }

    router
}
