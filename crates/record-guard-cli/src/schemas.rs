//! Built-in schemas available from the command line

use record_guard_core::{
    CharField, DeclareSchema, EmailField, FieldPreset, IntegerField, NumberField, Result, Schema,
};

/// Username and password for a login request
pub struct Login;

impl DeclareSchema for Login {
    fn declare() -> Result<Schema> {
        Schema::builder("login")
            .field(
                "username",
                CharField::builder("用户名").required(true).max_length(10).build(),
            )
            .field(
                "password",
                CharField::builder("密码").min_length(6).max_length(32).build(),
            )
            .build()
    }
}

/// Account registration
pub struct Register;

impl DeclareSchema for Register {
    fn declare() -> Result<Schema> {
        Schema::builder("register")
            .field(
                "username",
                CharField::builder("用户名")
                    .min_length(4)
                    .max_length(10)
                    .not_equal("admin")
                    .build(),
            )
            .field("email", EmailField::builder("邮箱").max_length(64).build())
            .field("age", IntegerField::builder("年龄").required(false).build())
            .build()
    }
}

/// Optional profile details
pub struct Profile;

impl DeclareSchema for Profile {
    fn declare() -> Result<Schema> {
        Schema::builder("profile")
            .field(
                "nickname",
                CharField::builder("昵称").required(false).max_length(16).build(),
            )
            .field(
                "height",
                NumberField::builder("身高").required(false).build(),
            )
            .build()
    }
}

/// Names accepted by `--schema`
pub const BUILTIN_SCHEMAS: [&str; 3] = ["login", "register", "profile"];

/// Declare a built-in schema by name
pub fn builtin_schema(name: &str) -> Option<Result<Schema>> {
    match name {
        "login" => Some(Login::declare()),
        "register" => Some(Register::declare()),
        "profile" => Some(Profile::declare()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_schemas_are_well_formed() {
        for name in BUILTIN_SCHEMAS {
            let schema = builtin_schema(name).unwrap().unwrap();
            assert_eq!(schema.name(), name);
            assert!(schema.verify().is_ok(), "{} is misconfigured", name);
        }
        assert!(builtin_schema("checkout").is_none());
    }

    #[test]
    fn test_register_rejects_reserved_username() {
        let schema = Register::declare().unwrap();
        let result = schema
            .evaluate(&json!({"username": "admin", "email": "a@b.cn"}))
            .unwrap();
        assert_eq!(result.error_message, "用户名: 不可等于admin");
    }

    #[test]
    fn test_profile_allows_empty_record() {
        assert!(Profile::declare().unwrap().evaluate(&json!({})).unwrap().is_valid);
    }
}
