//! Author API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/authors", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/courses", get(handler::list_courses))
        .route("/{id}/courses/{course_id}", post(handler::assign_course))
        .route(
            "/courses/{course_id}/remove-author",
            delete(handler::remove_author),
        )
}
