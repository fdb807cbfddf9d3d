use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, Authenticated},
    errors::AppError,
    models::dto::request::{PurchaseRequest, SigninRequest, SignupRequest},
};

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.signup(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    request: web::Json<SigninRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.signin(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/preview")]
pub async fn preview(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let response = state.user_service.preview().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/purchase", wrap = "AuthMiddleware::user()")]
pub async fn purchase(
    state: web::Data<AppState>,
    auth: Authenticated,
    request: web::Json<PurchaseRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .user_service
        .purchase(auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/purchases", wrap = "AuthMiddleware::user()")]
pub async fn purchases(
    state: web::Data<AppState>,
    auth: Authenticated,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.purchases(auth.0.id).await?;
    Ok(HttpResponse::Ok().json(response))
}
