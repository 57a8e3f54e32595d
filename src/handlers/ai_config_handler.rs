use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, Identity},
    errors::AppError,
    models::dto::{
        request::{CreateAiConfigRequest, UpdateAiConfigRequest},
        response::{AiConfigDto, DeleteResponse},
    },
};

#[get("/api/admin/ai-configs")]
pub async fn list_ai_configs(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    let configs = state.ai_config_service.list_configs().await?;
    let dtos: Vec<AiConfigDto> = configs.into_iter().map(AiConfigDto::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

#[get("/api/admin/ai-configs/active")]
pub async fn get_active_ai_config(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    let active = state.ai_config_service.get_active().await?;
    match active {
        Some(config) => Ok(HttpResponse::Ok().json(AiConfigDto::from(config))),
        None => Err(AppError::ConfigurationMissing(
            "no provider configuration is active".to_string(),
        )),
    }
}

#[post("/api/admin/ai-configs")]
pub async fn create_ai_config(
    state: web::Data<AppState>,
    request: web::Json<CreateAiConfigRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    let config = state
        .ai_config_service
        .create_config(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(AiConfigDto::from(config)))
}

#[put("/api/admin/ai-configs/{id}")]
pub async fn update_ai_config(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateAiConfigRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    let config = state
        .ai_config_service
        .update_config(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(AiConfigDto::from(config)))
}

#[post("/api/admin/ai-configs/{id}/activate")]
pub async fn activate_ai_config(
    state: web::Data<AppState>,
    id: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    let config = state.ai_config_service.activate_config(&id).await?;
    Ok(HttpResponse::Ok().json(AiConfigDto::from(config)))
}

#[post("/api/admin/ai-configs/{id}/deactivate")]
pub async fn deactivate_ai_config(
    state: web::Data<AppState>,
    id: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    let config = state.ai_config_service.deactivate_config(&id).await?;
    Ok(HttpResponse::Ok().json(AiConfigDto::from(config)))
}

#[delete("/api/admin/ai-configs/{id}")]
pub async fn delete_ai_config(
    state: web::Data<AppState>,
    id: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;

    state.ai_config_service.delete_config(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Config deleted".to_string(),
    }))
}
