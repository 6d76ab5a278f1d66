//! 员工账号数据模型
//!
//! 员工与顾客是两套独立账号体系，分别存放在 admin / customer 库中，
//! 互不相认。密码使用 argon2 哈希，序列化时跳过。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::StaffRole;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub username: String,
    /// argon2 哈希，永不出现在响应里
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub role: StaffRole,
    /// 随角色写入，读取时直接返回，避免每次登录重算
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl StaffUser {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> bool {
        use argon2::{Argon2, PasswordHash, PasswordVerifier};

        PasswordHash::new(&self.password_hash)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::password_hash::{SaltString, rand_core::OsRng};
        use argon2::{Argon2, PasswordHasher};

        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = StaffUser::hash_password("kitchen@123").unwrap();
        let user = StaffUser {
            id: None,
            username: "chef.arjun".into(),
            password_hash: hash,
            display_name: "Arjun".into(),
            role: StaffRole::Chef,
            permissions: StaffRole::Chef.permissions(),
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        assert!(user.verify_password("kitchen@123"));
        assert!(!user.verify_password("kitchen@124"));
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = StaffUser {
            id: None,
            username: "admin".into(),
            password_hash: "$argon2id$fake".into(),
            display_name: "Admin".into(),
            role: StaffRole::Admin,
            permissions: vec!["all".into()],
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "admin");
    }
}
