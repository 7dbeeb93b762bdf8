use std::net::IpAddr;

use poem::Request;

use crate::app_data::AppData;
use crate::types::internal::RequestContext;

/// Set-Cookie value that removes the session cookie
pub const CLEAR_SESSION_COOKIE: &str = "token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

/// Set-Cookie value carrying a freshly issued session token
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "token={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        token, max_age_seconds
    )
}

/// Extract the client IP address from request headers.
///
/// Checks X-Forwarded-For, X-Real-IP, and falls back to the remote address.
pub fn extract_ip_address(req: &Request) -> Option<IpAddr> {
    if let Some(forwarded) = req.header("X-Forwarded-For") {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().parse().ok();
        }
    }

    if let Some(real_ip) = req.header("X-Real-IP") {
        return real_ip.parse().ok();
    }

    req.remote_addr().as_socket_addr().map(|addr| addr.ip())
}

/// Build the RequestContext for an endpoint.
///
/// Authentication requires both a verifying JWT and a live session row for
/// its hash; a banned user's token fails the second check because the ban
/// deleted their sessions. Any failure leaves the context unauthenticated
/// and the service layer turns that into the right error.
pub async fn request_context(
    app_data: &AppData,
    req: &Request,
    token: Option<&str>,
) -> RequestContext {
    let mut ctx = RequestContext::new();
    if let Some(ip) = extract_ip_address(req) {
        ctx = ctx.with_ip_address(ip);
    }

    let Some(token) = token else {
        return ctx;
    };

    match app_data.token_service.validate_jwt(token) {
        Ok(claims) => {
            let token_hash = app_data.token_service.hash_session_token(token);
            match app_data.session_store.find_valid(&token_hash).await {
                Ok(Some(_)) => ctx = ctx.with_auth(claims),
                Ok(None) => {
                    tracing::debug!("Valid token without live session for user {}", claims.sub)
                }
                Err(e) => tracing::error!("Session lookup failed: {}", e),
            }
        }
        Err(rejection) => tracing::debug!("Token rejected: {:?}", rejection),
    }

    ctx
}
