use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::Header,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{Identity, JwtService},
    errors::AppError,
    models::domain::Role,
};

const NOT_SIGNED_IN: &str = "You are not signed in";

/// Guards a route: the request must carry a bearer token issued to `role`.
/// On success the caller's [`Identity`] is stored in the request extensions.
pub struct AuthMiddleware {
    role: Role,
}

impl AuthMiddleware {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    role: Role,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let role = self.role;

        Box::pin(async move {
            match authenticate(&req, role) {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("Rejected {} {}: {}", req.method(), req.path(), err);
                    let response = AppError::InvalidToken(NOT_SIGNED_IN.to_string()).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(req: &ServiceRequest, role: Role) -> Result<Identity, AppError> {
    let jwt_service = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    let bearer = Authorization::<Bearer>::parse(req)
        .map_err(|_| AppError::InvalidToken("Missing or malformed bearer token".to_string()))?
        .into_scheme();

    let identity = jwt_service.verify_token(bearer.token())?;

    if identity.role != role {
        return Err(AppError::InvalidToken(format!(
            "Token issued to {} cannot access {} routes",
            identity.role, role
        )));
    }

    Ok(identity)
}

/// Extractor for the caller of a guarded route.
pub struct Authenticated(pub Identity);

impl FromRequest for Authenticated {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Identity>()
            .copied()
            .ok_or_else(|| AppError::InvalidToken(NOT_SIGNED_IN.to_string()));

        ready(identity.map(Authenticated))
    }
}
