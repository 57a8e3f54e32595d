use actix_web::{delete, get, post, web, HttpResponse};
use serde::Serialize;

use crate::{
    app_state::AppState,
    auth::{require_staff, Identity},
    errors::AppError,
    models::dto::{
        request::{GenerateQuizRequest, SubmitQuizRequest},
        response::{DeleteResponse, QuizDetailDto},
    },
};

#[derive(Serialize)]
struct QuizAttemptsResponse {
    attempts: Vec<crate::models::domain::QuizAttempt>,
    passed_count: u64,
}

#[derive(Serialize)]
struct BestScoreResponse {
    best_score: Option<f64>,
}

#[post("/api/quizzes/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_staff(&identity)?;

    let response = state.quiz_service.generate_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let aggregate = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(QuizDetailDto::from(aggregate)))
}

#[delete("/api/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_staff(&identity)?;

    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Quiz deleted".to_string(),
    }))
}

#[post("/api/quizzes/{id}/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_attempt_service
        .submit(&id, &identity.user_id, request.into_inner().answers)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/quizzes/{id}/attempts")]
pub async fn list_quiz_attempts(
    state: web::Data<AppState>,
    id: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    require_staff(&identity)?;

    let attempts = state.quiz_attempt_service.attempts_for_quiz(&id).await?;
    let passed_count = state.quiz_attempt_service.passed_count(&id).await?;
    Ok(HttpResponse::Ok().json(QuizAttemptsResponse {
        attempts,
        passed_count,
    }))
}

#[get("/api/quizzes/{id}/attempts/best")]
pub async fn best_quiz_score(
    state: web::Data<AppState>,
    id: web::Path<String>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let best_score = state
        .quiz_attempt_service
        .best_score(&identity.user_id, &id)
        .await?;
    Ok(HttpResponse::Ok().json(BestScoreResponse { best_score }))
}

#[get("/api/me/attempts")]
pub async fn list_my_attempts(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let attempts = state
        .quiz_attempt_service
        .attempts_for_user(&identity.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
    use actix_web::{test, App};

    fn assert_error_status(status: actix_web::http::StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    #[actix_web::test]
    async fn test_submit_quiz_requires_identity() {
        let app = test::init_service(App::new().service(submit_quiz)).await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes/quiz-1/submit")
            .set_json(serde_json::json!({ "answers": {} }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }

    #[actix_web::test]
    async fn test_get_quiz_endpoint_structure() {
        let app = test::init_service(App::new().service(get_quiz)).await;

        let req = test::TestRequest::get()
            .uri("/api/quizzes/quiz-1")
            .insert_header((USER_ID_HEADER, "user-1"))
            .insert_header((USER_ROLE_HEADER, "STUDENT"))
            .to_request();

        // Without application state this cannot succeed, but the route
        // exists and resolves the request
        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
