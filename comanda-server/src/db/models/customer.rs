//! 顾客账号数据模型

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// 登录标识，唯一
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Customer {
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
