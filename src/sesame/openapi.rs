use super::handlers::{health, root};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(description = "Cookie session login exercise"),
    paths(root::page, root::login, health::health),
    components(schemas(root::LoginForm, health::Health)),
    tags(
        (name = "sesame", description = "Login page and form"),
        (name = "health", description = "Liveness")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
