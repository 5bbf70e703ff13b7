use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form::{FormErrors, max_length, required};
use crate::entities::user_entity::{self, UserType};
use crate::utils::{
    format_kenyan_phone, normalize_email, normalize_id_number, validate_kenyan_phone,
    validate_password,
};

const NAME_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignupForm {
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

/// Signup values after per-field cleaning; uniqueness is checked against the database afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSignup {
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn clean(&self) -> Result<CleanSignup, FormErrors> {
        let mut errors = FormErrors::default();

        let id_number = errors.capture("id_number", normalize_id_number(&self.id_number));

        let first_name = required(
            &mut errors,
            "first_name",
            &self.first_name,
            "First name is required",
        );
        let first_name = max_length(&mut errors, "first_name", first_name, NAME_MAX_LEN);
        let last_name =
            required(&mut errors, "last_name", &self.last_name, "Last name is required");
        let last_name = max_length(&mut errors, "last_name", last_name, NAME_MAX_LEN);

        let phone_number = required(
            &mut errors,
            "phone_number",
            &self.phone_number,
            "Phone number is required",
        )
        .map(|raw| format_kenyan_phone(&raw))
        .and_then(|phone| {
            let checked = validate_kenyan_phone(&phone).map(|_| phone);
            errors.capture("phone_number", checked)
        });

        let email = errors.capture("email", normalize_email(&self.email));

        let password = if self.password.is_empty() {
            errors.add("password", "Password is required");
            None
        } else {
            let checked = validate_password(&self.password).map(|_| self.password.clone());
            errors.capture("password", checked)
        };

        if self.confirm_password.is_empty() {
            errors.add("confirm_password", "Please confirm your password");
        } else if !self.password.is_empty() && self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }

        errors.finish(|| {
            Some(CleanSignup {
                id_number: id_number?,
                first_name: first_name?,
                last_name: last_name?,
                phone_number: phone_number?,
                email: email?,
                password: password?,
            })
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    /// Email, national ID number or first name.
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    /// Returns the trimmed identifier and the password.
    pub fn clean(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(
            &mut errors,
            "username",
            &self.username,
            "Please enter your email or ID number",
        );
        let username = max_length(&mut errors, "username", username, NAME_MAX_LEN);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.finish(|| Some((username?, self.password.clone())))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn clean(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::default();
        let email = errors.capture("email", normalize_email(&self.email));
        errors.finish(|| email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub user_type: UserType,
    pub user_type_label: String,
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    /// Prepaid balance in cents.
    pub credits: i64,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<user_entity::Model> for UserResponse {
    fn from(user: user_entity::Model) -> Self {
        Self {
            id: user.id,
            user_type: user.user_type,
            user_type_label: user.user_type.label().to_string(),
            full_name: user.full_name(),
            id_number: user.id_number,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            profile_picture: user.profile_picture,
            is_active: user.is_active,
            is_verified: user.is_verified,
            is_staff: user.is_staff,
            credits: user.credits,
            date_joined: user.date_joined,
            last_login: user.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupForm {
        SignupForm {
            id_number: "12345678".to_string(),
            first_name: "Wanjiku".to_string(),
            last_name: "Kamau".to_string(),
            phone_number: "0712345678".to_string(),
            email: "Wanjiku@Example.com".to_string(),
            password: "matatu2024".to_string(),
            confirm_password: "matatu2024".to_string(),
        }
    }

    #[test]
    fn test_signup_normalizes_fields() {
        let clean = valid_signup().clean().unwrap();
        assert_eq!(clean.phone_number, "+254712345678");
        assert_eq!(clean.email, "wanjiku@example.com");
        assert_eq!(clean.id_number, "12345678");
    }

    #[test]
    fn test_signup_reports_every_bad_field() {
        let form = SignupForm {
            id_number: "1234".to_string(),
            phone_number: "12".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "different".to_string(),
            ..SignupForm::default()
        };
        let errors = form.clean().unwrap_err();

        assert_eq!(errors.get("id_number"), ["ID number must be 8 or 9 digits".to_string()]);
        assert_eq!(errors.get("first_name"), ["First name is required".to_string()]);
        assert_eq!(errors.get("last_name"), ["Last name is required".to_string()]);
        assert_eq!(
            errors.get("phone_number"),
            ["Phone must be in the format +254XXXXXXXXX".to_string()]
        );
        assert_eq!(errors.get("email"), ["Enter a valid email address".to_string()]);
        assert_eq!(
            errors.get("password"),
            ["Password must be at least 8 characters long".to_string()]
        );
        assert_eq!(errors.get("confirm_password"), ["Passwords do not match".to_string()]);
    }

    #[test]
    fn test_signup_requires_confirmation() {
        let form = SignupForm {
            confirm_password: String::new(),
            ..valid_signup()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(
            errors.get("confirm_password"),
            ["Please confirm your password".to_string()]
        );
    }

    #[test]
    fn test_signup_form_never_echoes_passwords() {
        let json = serde_json::to_value(valid_signup()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("confirm_password").is_none());
        assert_eq!(json["first_name"], "Wanjiku");
    }

    #[test]
    fn test_login_requires_identifier() {
        let errors = LoginForm {
            username: "   ".to_string(),
            password: "secret123".to_string(),
        }
        .clean()
        .unwrap_err();
        assert_eq!(
            errors.get("username"),
            ["Please enter your email or ID number".to_string()]
        );
    }

    #[test]
    fn test_forgot_password_validates_email() {
        let form = ForgotPasswordForm {
            email: "".to_string(),
        };
        assert_eq!(form.clean().unwrap_err().get("email"), ["Email is required".to_string()]);

        let form = ForgotPasswordForm {
            email: " Rider@Example.com ".to_string(),
        };
        assert_eq!(form.clean().unwrap(), "rider@example.com");
    }
}
