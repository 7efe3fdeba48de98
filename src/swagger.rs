use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::battlepass::get_current_season,
        handlers::battlepass::get_user_progress,
        handlers::battlepass::claim_reward,
        handlers::status::create_status_check,
        handlers::status::get_status_checks,
    ),
    components(
        schemas(
            Reward,
            RewardKind,
            SeasonResponse,
            UserProgressResponse,
            ClaimRewardRequest,
            ClaimRewardResponse,
            StatusCheckCreate,
            StatusCheckResponse,
        )
    ),
    tags(
        (name = "battlepass", description = "Battle pass seasons, progress and reward claims"),
        (name = "status", description = "Status check log"),
    ),
    info(
        title = "Battle Pass Backend API",
        version = "1.0.0",
        description = "Battle pass progression and status check REST API documentation",
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
