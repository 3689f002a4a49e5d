use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Outfit API",
        version = "0.1.0",
        description = "Recommends clothing items to pair with an uploaded photo"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/recommendations", api = domain_outfits::ApiDoc)
    )
)]
pub struct ApiDoc;
