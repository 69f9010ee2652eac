// CORS configuration
// The frontend polls the job API from the browser, so keep this permissive.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub fn apply_cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
