//! Bearer token validation middleware and the identity extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use scribe_core::ports::{AuthError, TokenClaims, TokenService};
use scribe_shared::ErrorResponse;

use super::error::AppError;

/// Authenticated caller, stored in request extensions by [`TokenValidation`].
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    /// Reject a request body that names a different user.
    pub fn ensure_user(&self, claimed: &str) -> Result<(), AppError> {
        if claimed == self.user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "user_id does not match the authenticated user".to_string(),
            ))
        }
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::unauthorized()
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => ErrorResponse::unauthorized().with_detail(msg.clone()),
            AuthError::MissingAuth => ErrorResponse::unauthorized()
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

/// Validates bearer tokens on every path not starting with an ignored prefix.
pub struct TokenValidation {
    tokens: Arc<dyn TokenService>,
    ignore_prefixes: Rc<Vec<String>>,
}

impl TokenValidation {
    pub fn new(tokens: Arc<dyn TokenService>, ignore_prefixes: Vec<String>) -> Self {
        Self {
            tokens,
            ignore_prefixes: Rc::new(ignore_prefixes),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenValidation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = TokenValidationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenValidationService {
            service,
            tokens: self.tokens.clone(),
            ignore_prefixes: self.ignore_prefixes.clone(),
        }))
    }
}

pub struct TokenValidationService<S> {
    service: S,
    tokens: Arc<dyn TokenService>,
    ignore_prefixes: Rc<Vec<String>>,
}

impl<S> TokenValidationService<S> {
    fn is_ignored(&self, path: &str) -> bool {
        self.ignore_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl<S, B> Service<ServiceRequest> for TokenValidationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !self.is_ignored(req.path()) {
            let claims = bearer_token(req.request())
                .and_then(|token| self.tokens.validate_token(token));

            match claims {
                Ok(claims) => {
                    req.extensions_mut().insert(Identity::from(claims));
                }
                Err(e) => {
                    tracing::debug!(path = %req.path(), error = %e, "Rejected request");
                    return Box::pin(async move { Err(AuthenticationError(e).into()) });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(AuthenticationError(AuthError::MissingAuth)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def");

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert!(matches!(bearer_token(&req), Err(AuthError::InvalidToken(_))));

        let req = TestRequest::default().to_http_request();
        assert!(matches!(bearer_token(&req), Err(AuthError::MissingAuth)));
    }

    #[test]
    fn test_ensure_user() {
        let identity = Identity {
            user_id: "author-1".to_string(),
        };

        assert!(identity.ensure_user("author-1").is_ok());
        assert!(matches!(
            identity.ensure_user("author-2"),
            Err(AppError::Forbidden(_))
        ));
    }
}
