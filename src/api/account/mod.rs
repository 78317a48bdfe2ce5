//! Account API endpoints
//!
//! Routes for signup, signin, profile fetch/update, signout and delete.
//! Request bodies are statically declared schemas; unknown fields are
//! rejected at the type boundary. Responses redact the identifier and the
//! password fields everywhere, and the token on the signup response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::user::{SignupRequest, UpdateProfileRequest};

/// Create the account router
pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        // The original service accepted POST as an alias for PUT here
        .route(
            "/profile/{token}",
            get(fetch_profile)
                .put(update_profile)
                .post(update_profile)
                .delete(delete_profile),
        )
        .route("/signout/{token}", delete(signout))
}

/// Signup input.
///
/// Absent fields default to empty strings so the validator reports them as
/// blank in the violation mapping instead of serde failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    password_confirmation: String,
}

/// Signin input
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigninBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Profile update input; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileBody {
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    password_confirmation: Option<String>,
}

/// Signup response: no id, no token, no password fields
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    username: String,
    first_name: String,
    last_name: String,
}

impl CreatedUserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
        }
    }
}

/// Profile response: token included, id and password fields never
#[derive(Debug, Serialize)]
pub struct UserResponse {
    username: String,
    first_name: String,
    last_name: String,
    token: Option<String>,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            token: user.token().map(str::to_string),
        }
    }
}

/// Create a new account
///
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    let user = state
        .account_service
        .signup(SignupRequest {
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
            password_confirmation: body.password_confirmation,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedUserResponse::from_user(&user))))
}

/// Authenticate and receive a fresh session token
///
/// POST /signin
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .account_service
        .signin(&body.username, &body.password)
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Fetch the profile behind a token
///
/// GET /profile/{token}
pub async fn fetch_profile(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.account_service.fetch(&token).await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Update profile fields behind a token
///
/// PUT /profile/{token}
pub async fn update_profile(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .account_service
        .update_profile(
            &token,
            UpdateProfileRequest {
                first_name: body.first_name,
                last_name: body.last_name,
                password: body.password,
                password_confirmation: body.password_confirmation,
            },
        )
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Clear the session token
///
/// DELETE /signout/{token}
pub async fn signout(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.account_service.signout(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Permanently delete the account behind a token
///
/// DELETE /profile/{token}
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.account_service.delete(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::infrastructure::user::{AccountService, InMemoryUserRepository, TokenPolicy};

    fn test_state() -> AppState {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = AccountService::new(repository, TokenPolicy::RequireSignin);
        AppState::new(Arc::new(service))
    }

    fn signup_body() -> SignupBody {
        SignupBody {
            username: "validuser1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "secret1".to_string(),
            password_confirmation: "secret1".to_string(),
        }
    }

    async fn signed_in_token(state: &AppState) -> String {
        signup(State(state.clone()), Json(signup_body()))
            .await
            .unwrap();

        let Json(response) = signin(
            State(state.clone()),
            Json(SigninBody {
                username: "validuser1".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .unwrap();

        response.token.unwrap()
    }

    #[tokio::test]
    async fn test_signup_created_with_redacted_body() {
        let state = test_state();

        let (status, Json(response)) = signup(State(state), Json(signup_body())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let json = serde_json::to_value(&response).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["first_name", "last_name", "username"]);
    }

    #[tokio::test]
    async fn test_signup_violations_return_400() {
        let state = test_state();

        let mut body = signup_body();
        body.username = "ab".to_string();

        let err = signup(State(state), Json(body)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_value(&err.body).unwrap();
        assert!(json["reason"]["username"].is_array());
    }

    #[tokio::test]
    async fn test_signin_includes_token_but_no_password() {
        let state = test_state();

        signup(State(state.clone()), Json(signup_body()))
            .await
            .unwrap();

        let Json(response) = signin(
            State(state),
            Json(SigninBody {
                username: "validuser1".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["token"].is_string());
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_confirmation"));
    }

    #[tokio::test]
    async fn test_signin_failure_is_401() {
        let state = test_state();

        let err = signin(
            State(state),
            Json(SigninBody {
                username: "validuser1".to_string(),
                password: "wrong-1".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        let json = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json["reason"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_fetch_profile_roundtrip() {
        let state = test_state();
        let token = signed_in_token(&state).await;

        let Json(response) = fetch_profile(State(state.clone()), Path(token))
            .await
            .unwrap();
        assert_eq!(response.username, "validuser1");

        let err = fetch_profile(State(state), Path("never-issued".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_profile_merges_fields() {
        let state = test_state();
        let token = signed_in_token(&state).await;

        let Json(response) = update_profile(
            State(state),
            Path(token),
            Json(UpdateProfileBody {
                first_name: Some("Alicia".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.first_name, "Alicia");
        assert_eq!(response.last_name, "B");
    }

    #[tokio::test]
    async fn test_signout_then_signout_again() {
        let state = test_state();
        let token = signed_in_token(&state).await;

        let status = signout(State(state.clone()), Path(token.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = signout(State(state), Path(token)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_fetch() {
        let state = test_state();
        let token = signed_in_token(&state).await;

        let status = delete_profile(State(state.clone()), Path(token.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = fetch_profile(State(state), Path(token)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<SignupBody, _> = serde_json::from_value(serde_json::json!({
            "username": "validuser1",
            "admin": true
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_absent_signup_fields_default_to_blank() {
        let body: SignupBody = serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(body.username.is_empty());
        assert!(body.password.is_empty());
    }
}
