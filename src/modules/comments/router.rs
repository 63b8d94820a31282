use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::comments::controller::{
    create_comment, delete_comment, get_comment, get_my_comments, update_comment,
};
use crate::state::AppState;

pub fn init_comments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_comment))
        .route("/mine", get(get_my_comments))
        .route(
            "/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}
