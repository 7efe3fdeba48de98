use crate::models::*;
use crate::services::BattlePassService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/battlepass/current-season",
    tag = "battlepass",
    responses(
        (status = 200, description = "Active season with its reward schedule; a default season is created when none is active", body = SeasonResponse)
    )
)]
pub async fn get_current_season(service: web::Data<BattlePassService>) -> Result<HttpResponse> {
    match service.get_or_create_active_season().await {
        Ok(season) => Ok(HttpResponse::Ok().json(SeasonResponse::from(season))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/battlepass/user-progress/{uid}",
    tag = "battlepass",
    params(
        ("uid" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User's progress in the active season; created on first access", body = UserProgressResponse),
        (status = 404, description = "No active season")
    )
)]
pub async fn get_user_progress(
    service: web::Data<BattlePassService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let uid = path.into_inner();
    match service.get_or_create_progress(uid).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(UserProgressResponse::from(progress))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/battlepass/claim-reward",
    tag = "battlepass",
    request_body = ClaimRewardRequest,
    responses(
        (status = 200, description = "Claim outcome; rule violations come back with success=false", body = ClaimRewardResponse)
    )
)]
pub async fn claim_reward(
    service: web::Data<BattlePassService>,
    request: web::Json<ClaimRewardRequest>,
) -> Result<HttpResponse> {
    match service.claim_reward(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn battlepass_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/battlepass")
            .route("/current-season", web::get().to(get_current_season))
            .route("/user-progress/{uid}", web::get().to(get_user_progress))
            .route("/claim-reward", web::post().to(claim_reward)),
    );
}
