//! 账户表单校验
//!
//! 校验按固定顺序进行，返回第一条失败的规则。

use crate::error::ValidationError;
use crate::protocol::{SignInRequest, SignUpRequest};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 恰好 10 位数字
pub fn is_ten_digit_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// 注册表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpRequest, ValidationError> {
        if [
            &self.username,
            &self.email,
            &self.phone,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .any(|f| f.is_empty())
        {
            return Err(ValidationError::MissingFields);
        }

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if !is_ten_digit_phone(&self.phone) {
            return Err(ValidationError::InvalidPhone);
        }

        Ok(SignUpRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
        })
    }
}

/// 登录表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInRequest, ValidationError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(SignInRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            username: "jane".into(),
            email: "jane@example.com".into(),
            phone: "0712345678".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        }
    }

    #[test]
    fn test_valid_sign_up() {
        let req = valid_form().validate().unwrap();
        assert_eq!(req.username, "jane");
        assert_eq!(req.phone, "0712345678");
    }

    #[test]
    fn test_password_length_boundary() {
        let mut form = valid_form();
        form.password = "12345".into();
        form.confirm_password = "12345".into();
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));

        form.password = "123456".into();
        form.confirm_password = "123456".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_confirmation_mismatch_blocks() {
        let mut form = valid_form();
        form.confirm_password = "secreT".into();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));

        // 不一致优先于长度检查
        form.password = "abc".into();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_missing_field() {
        let mut form = valid_form();
        form.email.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_email_and_phone_rules() {
        let mut form = valid_form();
        form.email = "jane@example".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));

        let mut form = valid_form();
        form.phone = "12345".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));

        form.phone = "07123456a8".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let form = SignInForm {
            username: "jane".into(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingCredentials));
    }
}
