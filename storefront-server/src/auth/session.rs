//! Session tokens
//!
//! Opaque bearer tokens: 32 random bytes from the system CSPRNG,
//! base64url-encoded, resolved server-side against the session store.
//! The token carries no claims, so nothing about the user leaks from
//! it and revocation is a single record delete.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use shared::models::{Role, User};
use shared::util::now_millis;
use std::sync::Arc;

use crate::store::{Session, Store};
use crate::utils::{AppError, AppResult};

const TOKEN_BYTES: usize = 32;

/// Authenticated caller, injected into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
    pub token: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_delivery_partner(&self) -> bool {
        self.role == Role::DeliveryPartner
    }
}

/// Issues and resolves opaque session tokens.
///
/// Sessions are persisted in the store so they survive restarts; a
/// DashMap cache in front keeps the hot path off the database.
#[derive(Clone, Debug)]
pub struct SessionService {
    store: Store,
    cache: Arc<DashMap<String, Session>>,
    rng: SystemRandom,
    ttl_millis: i64,
}

impl SessionService {
    pub fn new(store: Store, ttl_minutes: i64) -> Self {
        Self {
            store,
            cache: Arc::new(DashMap::new()),
            rng: SystemRandom::new(),
            ttl_millis: ttl_minutes * 60_000,
        }
    }

    fn generate_token(&self) -> AppResult<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::internal("System RNG unavailable"))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Issue a fresh session for `user`
    pub fn issue(&self, user: &User) -> AppResult<Session> {
        let now = now_millis();
        let session = Session {
            token: self.generate_token()?,
            user_id: user.id.clone(),
            role: user.role,
            created_at: now,
            expires_at: now + self.ttl_millis,
        };
        self.store.insert_session(&session)?;
        self.cache.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    /// Resolve a bearer token to its session. Expired sessions are
    /// removed on the spot.
    pub fn resolve(&self, token: &str) -> AppResult<CurrentUser> {
        let now = now_millis();

        let session = match self.cache.get(token) {
            Some(cached) => cached.clone(),
            None => self
                .store
                .get_session(token)?
                .ok_or_else(AppError::invalid_session)?,
        };

        if session.is_expired(now) {
            self.revoke(token)?;
            return Err(AppError::invalid_session());
        }

        if !self.cache.contains_key(token) {
            self.cache.insert(token.to_string(), session.clone());
        }

        Ok(CurrentUser {
            id: session.user_id,
            role: session.role,
            token: token.to_string(),
        })
    }

    /// Revoke a session (logout or expiry)
    pub fn revoke(&self, token: &str) -> AppResult<()> {
        self.cache.remove(token);
        self.store.remove_session(token)?;
        Ok(())
    }

    /// Drop expired sessions from store and cache, returns the number
    /// removed from the store
    pub fn sweep_expired(&self) -> AppResult<usize> {
        let now = now_millis();
        self.cache.retain(|_, s| !s.is_expired(now));
        Ok(self.store.sweep_expired_sessions(now)?)
    }

    /// Parse `Authorization: Bearer <token>`
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
