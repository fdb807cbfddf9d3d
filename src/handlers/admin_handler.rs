use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, Authenticated},
    errors::AppError,
    models::dto::request::{CreateCourseRequest, SigninRequest, SignupRequest, UpdateCourseRequest},
};

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.admin_service.signup(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    request: web::Json<SigninRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.admin_service.signin(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/course", wrap = "AuthMiddleware::admin()")]
pub async fn create_course(
    state: web::Data<AppState>,
    auth: Authenticated,
    request: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .admin_service
        .create_course(auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[put("/course", wrap = "AuthMiddleware::admin()")]
pub async fn update_course(
    state: web::Data<AppState>,
    auth: Authenticated,
    request: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .admin_service
        .update_course(auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/course/bulk", wrap = "AuthMiddleware::admin()")]
pub async fn list_courses(
    state: web::Data<AppState>,
    auth: Authenticated,
) -> Result<HttpResponse, AppError> {
    let response = state.admin_service.list_courses(auth.0.id).await?;
    Ok(HttpResponse::Ok().json(response))
}
