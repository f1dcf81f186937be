use serde::{Deserialize, Serialize};

/// A stored user. The password is kept exactly as supplied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique username
    pub username: String,

    /// Unique email address, also the record's primary key
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// User projection without the password
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
}

impl From<UserRecord> for UserSummary {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
        }
    }
}

impl From<&UserRecord> for UserSummary {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
        }
    }
}

/// Registration input
#[derive(Debug, Default, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login input
#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Profile update input, addressed by the current username
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(default)]
    pub new_username: Option<String>,
    #[serde(default)]
    pub new_email: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserRecord {
        UserRecord {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_summary_from_record() {
        let summary = UserSummary::from(alice());
        assert_eq!(summary.username, "alice");
        assert_eq!(summary.email, "a@x.com");
    }

    #[test]
    fn test_summary_serialization_has_no_password() {
        let json = serde_json::to_value(UserSummary::from(&alice())).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_record_serialization_keeps_password() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(json["password"], "secret1");
    }

    #[test]
    fn test_register_input_deserialization() {
        let json = r#"{
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1"
        }"#;

        let input: RegisterInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.username.as_deref(), Some("alice"));
        assert_eq!(input.email.as_deref(), Some("a@x.com"));
        assert_eq!(input.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn test_register_input_missing_fields() {
        let input: RegisterInput = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert_eq!(input.username, None);
        assert_eq!(input.password, None);
    }

    #[test]
    fn test_update_input_camel_case() {
        let json = r#"{
            "newUsername": "alice2",
            "newEmail": "a2@x.com",
            "newPassword": "secret9"
        }"#;

        let input: UpdateUserInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.new_username.as_deref(), Some("alice2"));
        assert_eq!(input.new_email.as_deref(), Some("a2@x.com"));
        assert_eq!(input.new_password.as_deref(), Some("secret9"));
    }

    #[test]
    fn test_update_input_partial() {
        let input: UpdateUserInput =
            serde_json::from_str(r#"{"newPassword": "secret9"}"#).unwrap();
        assert_eq!(input.new_username, None);
        assert_eq!(input.new_email, None);
        assert_eq!(input.new_password.as_deref(), Some("secret9"));
    }
}
