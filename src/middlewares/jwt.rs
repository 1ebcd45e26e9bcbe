use serde::{Deserialize, Serialize};

use crate::actix_web::{
    dev::{Service, ServiceRequest, Transform},
    Error, HttpMessage,
};
use crate::context::UserInfo;
use crate::jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::future::Future;
use std::pin::Pin;

pub static JWT_TOKEN: &str = "JWT_TOKEN";
pub static JWT_SECRET: &str = "JWT_SECRET";

#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    pub user: String,
    pub exp: i64,
}

/// Deposits a `UserInfo` into request extensions when a valid token is
/// presented and passes the request through untouched otherwise. Rejection
/// of guests is left to the `UserInfo` extractor so that endpoints with a
/// guest path (the quota check) can run behind the same scope.
pub struct Jwt {
    secret: Vec<u8>,
}

impl Jwt {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for Jwt
where
    S: Service<ServiceRequest> + 'static,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Error = Error;
    type Response = S::Response;
    type Transform = JwtService<S>;
    type InitError = ();
    type Future = Pin<Box<dyn Future<Output = Result<Self::Transform, Self::InitError>>>>;
    fn new_transform(&self, service: S) -> Self::Future {
        let secret = self.secret.clone();
        Box::pin(async move {
            Ok(JwtService {
                secret,
                next_service: service,
            })
        })
    }
}

pub struct JwtService<S> {
    secret: Vec<u8>,
    next_service: S,
}

impl<S> JwtService<S> {
    fn token_of(&self, req: &ServiceRequest) -> Option<String> {
        if let Some(header) = req.headers().get("Authorization") {
            if let Ok(value) = header.to_str() {
                return Some(value.trim_start_matches("Bearer ").to_owned());
            }
        }
        req.request().cookie(JWT_TOKEN).map(|c| c.value().to_owned())
    }
}

impl<S> Service<ServiceRequest> for JwtService<S>
where
    S: Service<ServiceRequest>,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut core::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx).map_err(|e| e.into())
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = self.token_of(&req) {
            if let Ok(data) = decode::<Claim>(&token, &DecodingKey::from_secret(&self.secret), &Validation::new(Algorithm::HS256)) {
                if let Ok(id) = data.claims.user.parse::<i32>() {
                    req.extensions_mut().insert(UserInfo { id });
                }
            }
        }
        let res_fut = self.next_service.call(req);
        Box::pin(async move {
            let resp = res_fut.await.map_err(|e| e.into())?;
            Ok(resp)
        })
    }
}
