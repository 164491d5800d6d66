use std::sync::Arc;

use axum::extract::FromRef;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        dto::{SignupRequest, VerifyUserRequest},
        repo_types::{NewUser, User},
    },
    error::ServiceError,
    state::AppState,
    store::Store,
    validate::present,
};

/// Creates users and checks email/password pairs.
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn Store>,
}

impl FromRef<AppState> for IdentityService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.store.clone())
    }
}

impl IdentityService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Inserts a user. Emails are neither format-checked nor deduplicated.
    pub async fn create_user(&self, req: SignupRequest) -> Result<Uuid, ServiceError> {
        let (Some(email), Some(password), Some(first_name), Some(last_name)) = (
            present(&req.email),
            present(&req.password),
            present(&req.first_name),
            present(&req.last_name),
        ) else {
            return Err(ServiceError::Validation("All fields are required"));
        };

        let id = self
            .store
            .insert_user(NewUser {
                email: email.to_string(),
                password: password.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
            .await?;
        Ok(id)
    }

    /// Returns the first user whose email and password both match exactly.
    pub async fn verify_credentials(&self, req: VerifyUserRequest) -> Result<User, ServiceError> {
        let (Some(email), Some(password)) = (present(&req.email), present(&req.password)) else {
            return Err(ServiceError::Validation("Email and password are required"));
        };

        let matches = self.store.find_users_by_credentials(email, password).await?;
        debug!(count = matches.len(), "credential lookup");
        matches.into_iter().next().ok_or(ServiceError::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, UnavailableStore};

    fn service() -> IdentityService {
        IdentityService::new(Arc::new(MemoryStore::new()))
    }

    fn signup(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            first_name: Some("A".into()),
            last_name: Some("B".into()),
        }
    }

    fn login(email: &str, password: &str) -> VerifyUserRequest {
        VerifyUserRequest {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[tokio::test]
    async fn every_signup_gets_a_fresh_id_even_for_the_same_email() {
        let svc = service();
        let a = svc.create_user(signup("a@b.com", "pw")).await.unwrap();
        let b = svc.create_user(signup("a@b.com", "pw")).await.unwrap();
        let c = svc.create_user(signup("c@d.com", "pw")).await.unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn signup_requires_every_field() {
        let svc = service();
        let mut req = signup("a@b.com", "pw");
        req.last_name = Some(String::new());
        let err = svc.create_user(req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation("All fields are required")));

        let err = svc.create_user(SignupRequest::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn signup_does_not_check_email_shape() {
        let svc = service();
        assert!(svc.create_user(signup("not an email", "pw")).await.is_ok());
    }

    #[tokio::test]
    async fn verify_returns_the_stored_user() {
        let svc = service();
        let id = svc.create_user(signup("a@b.com", "pw")).await.unwrap();
        let user = svc.verify_credentials(login("a@b.com", "pw")).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "B");
    }

    #[tokio::test]
    async fn verify_is_exact_and_case_sensitive() {
        let svc = service();
        svc.create_user(signup("a@b.com", "pw")).await.unwrap();
        for (email, password) in [("A@B.COM", "pw"), ("a@b.com", "PW"), ("a@b.com ", "pw"), ("x@y.z", "pw")] {
            let err = svc.verify_credentials(login(email, password)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Auth), "{email}/{password}");
        }
    }

    #[tokio::test]
    async fn verify_requires_both_fields() {
        let svc = service();
        let err = svc
            .verify_credentials(VerifyUserRequest {
                email: Some("a@b.com".into()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation("Email and password are required")));
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let svc = IdentityService::new(Arc::new(UnavailableStore::new("down")));
        let err = svc.create_user(signup("a@b.com", "pw")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        // Validation still runs before the store is touched.
        let err = svc.verify_credentials(VerifyUserRequest::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
