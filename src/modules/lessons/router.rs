use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::lessons::controller::{
    create_lesson, get_lesson, get_lesson_comments, get_lessons, get_my_lessons, update_lesson,
};
use crate::state::AppState;

pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_lessons).post(create_lesson))
        .route("/mine", get(get_my_lessons))
        .route("/{id}", get(get_lesson).put(update_lesson))
        .route("/{id}/comments", get(get_lesson_comments))
}
