//! Login and registration forms

use crate::App;
use masakin_api_client::endpoints::{LoginRequest, RegisterRequest};
use masakin_core::route::Route;
use masakin_core::validation::Validator;
use tracing::{info, warn};

const FILL_ALL_FIELDS: &str = "Please fill in all fields";
const MIN_PASSWORD_LEN: usize = 6;

/// Login form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Inline error from the last submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in and go to the profile page; `false` leaves an inline error
    pub async fn submit(&mut self, app: &App) -> bool {
        self.error = None;
        let checked = Validator::new()
            .required("email", &self.email)
            .required("password", &self.password)
            .validate();
        if !checked.is_valid() {
            self.error = Some(FILL_ALL_FIELDS.to_string());
            return false;
        }

        let credentials = LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        let grant = match app.client().auth().login(&credentials).await {
            Ok(grant) => grant,
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.error = Some(e.user_message("Login failed. Please try again."));
                return false;
            }
        };

        if let Err(e) = app.session().login(grant.token, grant.user) {
            warn!(error = %e, "Could not store session");
            self.error = Some("Login failed. Please try again.".to_string());
            return false;
        }
        info!("Logged in");
        app.navigate(Route::Profile);
        true
    }
}

/// Registration form state
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn check(&self) -> Option<&'static str> {
        let filled = Validator::new()
            .required("name", &self.name)
            .required("email", &self.email)
            .required("password", &self.password)
            .validate();
        if !filled.is_valid() {
            return Some(FILL_ALL_FIELDS);
        }
        let long_enough = Validator::new()
            .min_length("password", &self.password, MIN_PASSWORD_LEN)
            .validate();
        if !long_enough.is_valid() {
            return Some("Password must be at least 6 characters");
        }
        None
    }

    /// Create the account and go to the login page
    ///
    /// The user still signs in afterwards, even when the backend returned
    /// credentials.
    pub async fn submit(&mut self, app: &App) -> bool {
        self.error = None;
        if let Some(message) = self.check() {
            self.error = Some(message.to_string());
            return false;
        }

        let account = RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        match app.client().auth().register(&account).await {
            Ok(_) => {
                info!("Registered new account");
                app.notifier().success("Registration successful! Please login.");
                app.navigate(Route::Login);
                true
            }
            Err(e) => {
                let message = e.user_message("Registration failed. Please try again.");
                warn!(error = %e, "Registration failed");
                app.notifier().error(&message);
                self.error = Some(message);
                false
            }
        }
    }
}
