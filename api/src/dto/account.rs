//! Account DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use hotel_core::domain::TokenPair;
use hotel_core::services::RegisterUser;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserDto {
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    #[schema(example = "admin@hotels.example")]
    pub email: String,

    #[validate(length(min = 6, max = 15, message = "Your Password is limited to 6 to 15 characters"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    #[schema(example = "admin@hotels.example")]
    pub email: String,

    #[validate(length(min = 6, max = 15, message = "Your Password is limited to 6 to 15 characters"))]
    pub password: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone_number: Option<String>,

    /// Role names; defaults to "User" when empty
    #[serde(default)]
    #[schema(example = json!(["User"]))]
    pub roles: Vec<String>,
}

impl From<UserDto> for RegisterUser {
    fn from(dto: UserDto) -> Self {
        Self {
            email: dto.email,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone_number: dto.phone_number,
            roles: dto.roles,
        }
    }
}

/// Access and refresh token pair, both as a response and as a refresh request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequestDto {
    pub token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenRequestDto {
    fn from(pair: TokenPair) -> Self {
        Self {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_defaults() {
        let dto: UserDto =
            serde_json::from_str(r#"{"email":"guest@hotels.example","password":"P@ssw0rd"}"#).unwrap();
        assert!(dto.validate().is_ok());

        let request = RegisterUser::from(dto);
        assert!(request.roles.is_empty());
        assert_eq!(request.first_name, None);
    }

    #[test]
    fn test_login_rules() {
        let dto = LoginUserDto {
            email: "not-an-email".into(),
            password: "abc".into(),
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_token_request_wire_names() {
        let json = serde_json::to_value(TokenRequestDto::from(TokenPair::new("a".into(), "r".into(), 900))).unwrap();
        assert_eq!(json, serde_json::json!({"token": "a", "refreshToken": "r"}));
    }
}
