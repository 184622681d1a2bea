mod dto;
pub mod handlers;
pub mod repo;
pub mod summary;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_meals).post(handlers::create_meal),
        )
        .route("/summary", get(handlers::summary))
        .route(
            "/:id",
            get(handlers::get_meal)
                .put(handlers::update_meal)
                .delete(handlers::delete_meal),
        )
}
