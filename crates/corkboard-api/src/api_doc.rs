//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorResponse;
use crate::handlers;
use corkboard_core::models::{ImageItem, Post, StoredImage, UserRow};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Corkboard API",
        version = "0.1.0",
        description = "Posts API with platform auth and public image bucket helpers."
    ),
    paths(
        handlers::health::health_check,
        handlers::posts::list_posts,
        handlers::posts::create_post,
        handlers::posts::delete_post,
        handlers::users::sync_user,
        handlers::image_upload::upload_image,
        handlers::image_list::list_images,
    ),
    components(schemas(
        Post,
        UserRow,
        StoredImage,
        ImageItem,
        ErrorResponse,
        handlers::posts::CreatePostRequest,
        handlers::posts::PostListResponse,
        handlers::posts::PostResponse,
        handlers::posts::DeletePostResponse,
        handlers::users::UserSyncResponse,
        handlers::image_upload::UploadImageResponse,
        handlers::image_list::ImageListResponse,
        handlers::health::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "posts"),
        (name = "images"),
        (name = "users")
    )
)]
pub struct ApiDoc;

/// The OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
