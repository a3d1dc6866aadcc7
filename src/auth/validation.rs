//! Server-side checks run on raw request bodies before any store or crypto
//! work. Clients may validate too; nothing here relies on it.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::dto::{LoginInput, SignupInput};
use super::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 4;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

/// Presence, type, password length, then email format; first failure wins.
pub fn validate_signup(payload: &Value) -> Result<SignupInput, AuthError> {
    let fields = payload.as_object();
    let [name, email, password] = require(fields, ["name", "email", "password"])?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmailFormat);
    }

    Ok(SignupInput {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// Presence and type only. A malformed email just won't match any account.
pub fn validate_login(payload: &Value) -> Result<LoginInput, AuthError> {
    let [email, password] = require(payload.as_object(), ["email", "password"])?;
    Ok(LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// Every field is checked for presence before any is checked for type.
fn require<'a, const N: usize>(
    fields: Option<&'a Map<String, Value>>,
    names: [&'static str; N],
) -> Result<[&'a str; N], AuthError> {
    let lookup = |name: &str| fields.and_then(|m| m.get(name)).filter(|v| !is_blank(v));

    if let Some(&field) = names.iter().find(|&&n| lookup(n).is_none()) {
        return Err(AuthError::MissingField { field });
    }

    let mut out = [""; N];
    for (slot, field) in out.iter_mut().zip(names) {
        match lookup(field) {
            Some(Value::String(s)) => *slot = s.as_str(),
            Some(other) => {
                return Err(AuthError::InvalidType {
                    field,
                    got: json_type(other),
                })
            }
            None => return Err(AuthError::MissingField { field }),
        }
    }
    Ok(out)
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub(crate) fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
