use std::sync::Arc;
use uuid::Uuid;

use crate::database::UserStore;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, ProfileUpdate, User};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::TokenIssuer;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(Error::BadRequest("Name is required".to_string()));
        }

        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email: normalize_email(&req.email),
                password_hash: hash_password(&req.password)?,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        let token = self.tokens.issue(user.id)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        let invalid = || Error::Unauthorized("Invalid email or password".to_string());

        let user = self
            .users
            .find_by_email(&normalize_email(&req.email))
            .await?
            .ok_or_else(invalid)?;
        if !verify_password(&req.password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "failed login attempt");
            return Err(invalid());
        }

        let token = self.tokens.issue(user.id)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn update_profile(&self, user_id: Uuid, req: UpdateProfileRequest) -> Result<User> {
        let update = ProfileUpdate {
            name: req.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            email: req.email.as_deref().map(normalize_email),
            profile_pic: req.profile_pic,
        };
        self.users
            .update_profile(user_id, update)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }
}
