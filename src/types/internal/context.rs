use std::net::IpAddr;

use uuid::Uuid;

use crate::types::internal::auth::Claims;

/// Request context that flows through service and store layers.
///
/// Carries the information needed for audit logging and tracing. Claims
/// are present only when the token cookie verified AND a live session row
/// was found for it; services treat `claims: None` as unauthenticated.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request
    pub request_id: Uuid,

    /// Verified JWT claims, if any
    pub claims: Option<Claims>,

    /// Actor who initiated the operation ("anonymous" when unauthenticated)
    pub actor_id: String,
}

impl RequestContext {
    /// Create an unauthenticated context
    pub fn new() -> Self {
        Self {
            ip_address: None,
            request_id: Uuid::new_v4(),
            claims: None,
            actor_id: "anonymous".to_string(),
        }
    }

    /// Create a context for system operations (reminder sweep, bootstrap)
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: Uuid::new_v4(),
            claims: None,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Set authentication state with claims; actor_id follows the subject
    pub fn with_auth(mut self, claims: Claims) -> Self {
        self.actor_id = claims.sub.clone();
        self.claims = Some(claims);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
