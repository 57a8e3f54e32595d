use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Identity headers injected by the upstream authentication gateway.
/// Token validation happens there; this service only consumes the
/// resolved result.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Tutor,
    Student,
}

impl Role {
    fn parse(value: &str) -> Option<Role> {
        match value.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "TUTOR" => Some(Role::Tutor),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }
}

/// The resolved caller identity for one request.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

pub fn identity_from_request(req: &HttpRequest) -> AppResult<Identity> {
    let user_id = header_value(req, USER_ID_HEADER)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing identity".to_string()))?;

    let role = header_value(req, USER_ROLE_HEADER)
        .and_then(Role::parse)
        .ok_or_else(|| AppError::Unauthorized("Missing or unknown role".to_string()))?;

    Ok(Identity {
        user_id: user_id.to_string(),
        role,
    })
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

pub fn require_admin(identity: &Identity) -> AppResult<()> {
    if identity.role != Role::Admin {
        return Err(AppError::Unauthorized(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Authoring operations are open to tutors and admins.
pub fn require_staff(identity: &Identity) -> AppResult<()> {
    if identity.role != Role::Admin && identity.role != Role::Tutor {
        return Err(AppError::Unauthorized(
            "Only tutors or admins can perform this action".to_string(),
        ));
    }
    Ok(())
}
