use axum::{
    body::Body, extract::Request, http::HeaderMap, http::StatusCode, middleware::Next,
    response::Response,
};

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires admin or manager role
pub async fn require_manager(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;
    if !claims.is_manager() {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires admin role
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_from_request(req.headers()).await?;
    if !claims.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn claims_from_request(
    headers: &HeaderMap,
) -> Result<contracts::system::auth::TokenClaims, StatusCode> {
    // Extract the bearer token into an owned String so that the borrow of the
    // headers ends before the `.await` below. We borrow `&HeaderMap` (which is
    // Sync) rather than `&Request<Body>` (whose Body is not Sync) so the
    // resulting future stays Send.
    let token = {
        // Extract Authorization header
        let auth_header = headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // Check Bearer prefix
        auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_string()
    };

    super::jwt::validate_token(&token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}
