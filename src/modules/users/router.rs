use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{change_password, get_profile, update_profile};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/change-password", post(change_password))
}
