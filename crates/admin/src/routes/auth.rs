//! Authentication route handlers for admin.
//!
//! Email and password login; the session then carries [`CurrentAdmin`].

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

use super::render;

/// Message shown for any failed login.
const LOGIN_FAILED: &str = "Correo o contraseña incorrectos";

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page; already signed-in admins go to the dashboard.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }

    render(&LoginPageTemplate {
        email: String::new(),
        error: None,
    })
    .into_response()
}

/// Check credentials and start the admin session.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = match AdminAuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AdminAuthError::InvalidEmail(_) | AdminAuthError::InvalidCredentials) => {
            tracing::warn!("Failed admin login");
            return Ok(render(&LoginPageTemplate {
                email: form.email,
                error: Some(LOGIN_FAILED.to_string()),
            })
            .into_response());
        }
        Err(AdminAuthError::Repository(e)) => return Err(e.into()),
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin).await?;
    set_sentry_user(&admin);
    tracing::info!(admin_id = %admin.id, "Admin logged in");

    Ok(Redirect::to("/").into_response())
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    clear_sentry_user();

    Redirect::to("/auth/login")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_keeps_email_and_shows_error() {
        let html = LoginPageTemplate {
            email: "chef@cafeancestral.mx".to_string(),
            error: Some(LOGIN_FAILED.to_string()),
        }
        .render()
        .unwrap();

        assert!(html.contains("value=\"chef@cafeancestral.mx\""));
        assert!(html.contains(LOGIN_FAILED));
        assert!(html.contains("action=\"/auth/login\""));
    }
}
