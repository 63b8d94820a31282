use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, RegisterRequestDto, TokenPair};
use crate::modules::comments::model::{Comment, CreateCommentDto, UpdateCommentDto};
use crate::modules::lessons::model::{CreateLessonDto, Lesson, UpdateLessonDto};
use crate::modules::users::controller::MessageResponse;
use crate::modules::users::model::{ChangePasswordDto, UpdateProfileDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::change_password,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::get_lesson_comments,
        crate::modules::lessons::controller::get_my_lessons,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::get_comment,
        crate::modules::comments::controller::get_my_comments,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::delete_comment,
    ),
    components(
        schemas(
            User,
            LoginRequest,
            RegisterRequestDto,
            TokenPair,
            UpdateProfileDto,
            ChangePasswordDto,
            MessageResponse,
            ErrorResponse,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            Comment,
            CreateCommentDto,
            UpdateCommentDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, token refresh and registration"),
        (name = "Users", description = "Profile management"),
        (name = "Lessons", description = "Lesson catalogue and ratings"),
        (name = "Comments", description = "Lesson reviews")
    ),
    info(
        title = "Classrate API",
        version = "0.1.0",
        description = "A REST API for rating and reviewing lessons, built with Rust, Axum and PostgreSQL.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
