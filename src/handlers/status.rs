use crate::models::*;
use crate::services::StatusService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/status",
    tag = "status",
    request_body = StatusCheckCreate,
    responses(
        (status = 200, description = "Created status check record", body = StatusCheckResponse)
    )
)]
pub async fn create_status_check(
    service: web::Data<StatusService>,
    input: web::Json<StatusCheckCreate>,
) -> Result<HttpResponse> {
    match service.create_status_check(input.into_inner()).await {
        Ok(record) => Ok(HttpResponse::Ok().json(StatusCheckResponse::from(record))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    responses(
        (status = 200, description = "Up to 1000 status check records", body = [StatusCheckResponse])
    )
)]
pub async fn get_status_checks(service: web::Data<StatusService>) -> Result<HttpResponse> {
    match service.list_status_checks().await {
        Ok(records) => {
            let response: Vec<StatusCheckResponse> =
                records.into_iter().map(Into::into).collect();
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn status_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/status")
            .route("", web::post().to(create_status_check))
            .route("", web::get().to(get_status_checks)),
    );
}
