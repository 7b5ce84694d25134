//! Account and session management.
//!
//! Users live under `appUsers`; the most recent sign-in is mirrored under
//! `authToken` and `authUser`. Tokens are base64-encoded JSON with an expiry
//! and carry no signature.

use chrono::Utc;
use shared::{AuthResponse, SessionResponse, SignInRequest, SignUpRequest, User};
use tracing::{info, warn};

use crate::domain::models::{StoredUser, TokenPayload};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

#[derive(Clone)]
pub struct AuthService {
    store: JsonStore,
}

impl AuthService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// All stored users, seeding the default accounts on first use
    fn users(&self) -> AppResult<Vec<StoredUser>> {
        if let Some(users) = self.store.load_optional::<Vec<StoredUser>>(StorageKey::USERS)? {
            return Ok(users);
        }

        let defaults = StoredUser::defaults();
        self.store.save(StorageKey::USERS, &defaults)?;
        info!("Seeded {} default users", defaults.len());
        Ok(defaults)
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users()?.iter().map(StoredUser::to_public).collect())
    }

    pub fn sign_up(&self, request: SignUpRequest) -> AppResult<AuthResponse> {
        let username = request.username.trim();
        let email = request.email.trim();

        if username.is_empty() || email.is_empty() || request.password.is_empty() {
            return Err(AppError::validation("Please fill in all fields"));
        }
        if !request.agreed_to_terms {
            return Err(AppError::validation("Please agree to the Terms and Conditions"));
        }

        let mut users = self.users()?;

        if users.iter().any(|u| u.email.to_lowercase() == email.to_lowercase()) {
            return Err(AppError::Conflict("User with this email already exists".to_string()));
        }
        if users
            .iter()
            .any(|u| u.username.to_lowercase() == username.to_lowercase())
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let user_id = users.iter().map(|u| u.user_id).max().unwrap_or(0) + 1;
        let new_user = StoredUser {
            user_id,
            username: username.to_string(),
            email: email.to_string(),
            password: request.password,
        };
        users.push(new_user.clone());
        self.store.save(StorageKey::USERS, &users)?;

        info!("Registered user {} ({})", new_user.username, user_id);
        self.start_session(&new_user)
    }

    pub fn sign_in(&self, request: SignInRequest) -> AppResult<AuthResponse> {
        let users = self.users()?;

        let found = users
            .iter()
            .find(|u| u.email == request.email)
            .filter(|u| u.password == request.password)
            .ok_or_else(|| {
                warn!("Failed sign-in attempt for {}", request.email);
                AppError::Unauthorized("Invalid email or password".to_string())
            })?;

        info!("User {} signed in", found.user_id);
        self.start_session(found)
    }

    pub fn sign_out(&self) -> AppResult<()> {
        self.store.remove(StorageKey::AUTH_TOKEN)?;
        self.store.remove(StorageKey::AUTH_USER)?;
        info!("User signed out successfully");
        Ok(())
    }

    /// Issue a token for `user_id` valid for 24 hours from now
    pub fn generate_token(&self, user_id: u64) -> AppResult<String> {
        Ok(TokenPayload::issue(user_id, now_millis()).encode()?)
    }

    /// Decode a token, `None` if malformed or expired
    pub fn verify_token(&self, token: &str) -> Option<TokenPayload> {
        Self::verify_token_at(token, now_millis())
    }

    pub fn verify_token_at(token: &str, now_millis: i64) -> Option<TokenPayload> {
        TokenPayload::decode(token).filter(|payload| !payload.is_expired(now_millis))
    }

    /// Resolve a bearer token to the user ID it was issued for
    pub fn authenticate(&self, token: &str) -> AppResult<u64> {
        let payload = self
            .verify_token(token)
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        if !self.users()?.iter().any(|u| u.user_id == payload.user_id) {
            return Err(AppError::Unauthorized("Unknown user".to_string()));
        }
        Ok(payload.user_id)
    }

    /// The saved session, as restored when the app loads
    pub fn current_session(&self) -> AppResult<SessionResponse> {
        let token = self.store.get_raw(StorageKey::AUTH_TOKEN)?;
        let user_present = self.store.get_raw(StorageKey::AUTH_USER)?.is_some();

        let (token, user) = match (token, user_present) {
            (Some(token), true) => match self.store.load_optional::<User>(StorageKey::AUTH_USER)? {
                Some(user) => (token, user),
                None => {
                    warn!("Saved session user was unreadable, clearing session");
                    self.store.remove(StorageKey::AUTH_TOKEN)?;
                    return Ok(SessionResponse { authenticated: false, user: None });
                }
            },
            _ => return Ok(SessionResponse { authenticated: false, user: None }),
        };

        let authenticated = self.verify_token(&token).is_some();
        Ok(SessionResponse {
            authenticated,
            user: authenticated.then_some(user),
        })
    }

    fn start_session(&self, user: &StoredUser) -> AppResult<AuthResponse> {
        let token = self.generate_token(user.user_id)?;
        let public = user.to_public();

        self.store.set_raw(StorageKey::AUTH_TOKEN, &token)?;
        self.store.save(StorageKey::AUTH_USER, &public)?;

        Ok(AuthResponse { token, user: public })
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;
    use crate::storage::KeyValueStorage;

    fn setup() -> (AuthService, TestEnvironment) {
        let env = TestEnvironment::new();
        (AuthService::new(env.store.clone()), env)
    }

    fn sign_up_request(username: &str, email: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            agreed_to_terms: true,
        }
    }

    #[test]
    fn test_default_users_are_seeded() {
        let (service, env) = setup();

        let users = service.list_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "john_doe");
        assert_eq!(users[1].email, "jane@example.com");
        assert!(env.memory.get_item(StorageKey::USERS).unwrap().is_some());
    }

    #[test]
    fn test_sign_in_with_default_user() {
        let (service, _env) = setup();

        let response = service
            .sign_in(SignInRequest {
                email: "john@example.com".to_string(),
                password: "password123".to_string(),
            })
            .unwrap();

        assert_eq!(response.user.user_id, 1);
        assert_eq!(service.authenticate(&response.token).unwrap(), 1);
    }

    #[test]
    fn test_sign_in_rejects_wrong_password() {
        let (service, _env) = setup();

        let result = service.sign_in(SignInRequest {
            email: "john@example.com".to_string(),
            password: "wrong".to_string(),
        });

        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid email or password"),
            other => panic!("expected unauthorized, got {:?}", other.map(|r| r.user)),
        }
    }

    #[test]
    fn test_sign_up_assigns_next_id_and_starts_session() {
        let (service, env) = setup();

        let response = service.sign_up(sign_up_request("alice", "alice@example.com")).unwrap();
        assert_eq!(response.user.user_id, 3);

        assert_eq!(
            env.memory.get_item(StorageKey::AUTH_TOKEN).unwrap(),
            Some(response.token.clone())
        );
        let session = service.current_session().unwrap();
        assert!(session.authenticated);
        assert_eq!(session.user.unwrap().username, "alice");
    }

    #[test]
    fn test_sign_up_validation() {
        let (service, _env) = setup();

        let mut missing = sign_up_request("bob", "");
        missing.email = "  ".to_string();
        assert!(matches!(service.sign_up(missing), Err(AppError::Validation(_))));

        let mut no_terms = sign_up_request("bob", "bob@example.com");
        no_terms.agreed_to_terms = false;
        match service.sign_up(no_terms) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Please agree to the Terms and Conditions")
            }
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn test_sign_up_rejects_duplicates_case_insensitively() {
        let (service, _env) = setup();

        match service.sign_up(sign_up_request("someone", "JOHN@example.com")) {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "User with this email already exists"),
            _ => panic!("expected email conflict"),
        }
        match service.sign_up(sign_up_request("Jane_Smith", "new@example.com")) {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Username already taken"),
            _ => panic!("expected username conflict"),
        }
    }

    #[test]
    fn test_sign_out_clears_session() {
        let (service, env) = setup();
        service
            .sign_in(SignInRequest {
                email: "jane@example.com".to_string(),
                password: "password456".to_string(),
            })
            .unwrap();

        service.sign_out().unwrap();

        assert_eq!(env.memory.get_item(StorageKey::AUTH_TOKEN).unwrap(), None);
        assert_eq!(env.memory.get_item(StorageKey::AUTH_USER).unwrap(), None);
        assert!(!service.current_session().unwrap().authenticated);
    }

    #[test]
    fn test_unreadable_session_user_is_cleared() {
        let (service, env) = setup();
        env.memory.set_item(StorageKey::AUTH_TOKEN, "token").unwrap();
        env.memory.set_item(StorageKey::AUTH_USER, "{broken").unwrap();

        let session = service.current_session().unwrap();
        assert!(!session.authenticated);
        assert_eq!(env.memory.get_item(StorageKey::AUTH_TOKEN).unwrap(), None);
        assert_eq!(env.memory.get_item(StorageKey::AUTH_USER).unwrap(), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = TokenPayload { user_id: 1, exp: 1_000 }.encode().unwrap();
        assert!(AuthService::verify_token_at(&token, 999).is_some());
        assert!(AuthService::verify_token_at(&token, 1_000).is_none());

        let (service, _env) = setup();
        assert!(matches!(service.authenticate(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_sign_in_matches_email_exactly() {
        let (service, _env) = setup();
        let result = service.sign_in(SignInRequest {
            email: " john@example.com".to_string(),
            password: "password123".to_string(),
        });
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_session_with_expired_token_is_unauthenticated() {
        let (service, env) = setup();
        let user = User {
            user_id: 1,
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
        };
        let expired = TokenPayload { user_id: 1, exp: now_millis() - 1 }.encode().unwrap();
        env.memory.set_item(StorageKey::AUTH_TOKEN, &expired).unwrap();
        env.store.save(StorageKey::AUTH_USER, &user).unwrap();

        let session = service.current_session().unwrap();
        assert!(!session.authenticated);
        assert!(session.user.is_none());

        let fresh = service.generate_token(1).unwrap();
        env.memory.set_item(StorageKey::AUTH_TOKEN, &fresh).unwrap();
        let session = service.current_session().unwrap();
        assert!(session.authenticated);
        assert_eq!(session.user, Some(user));
    }

    #[test]
    fn test_token_for_unknown_user_is_rejected() {
        let (service, _env) = setup();
        let token = service.generate_token(99).unwrap();
        assert!(matches!(service.authenticate(&token), Err(AppError::Unauthorized(_))));
    }
}
