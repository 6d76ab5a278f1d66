//! Staff User Repository
//!
//! 员工账号存放在 admin 库。密码哈希只通过显式字段写入，
//! 模型序列化永远不带哈希。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::{RegisterStaffRequest, StaffRole};

use crate::db::models::StaffUser;

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Clone)]
pub struct StaffUserRepository {
    base: BaseRepository,
}

impl StaffUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StaffUser>> {
        let thing = self.base.parse_id(id)?;
        let user: Option<StaffUser> = self.base.db().select(thing).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<StaffUser>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM staff_user WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<StaffUser> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new staff account
    pub async fn create(&self, data: RegisterStaffRequest, now: i64) -> RepoResult<StaffUser> {
        // Check duplicate username
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let password_hash = StaffUser::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let permissions = data.role.permissions();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE staff_user SET
                    username = $username,
                    passwordHash = $password_hash,
                    displayName = $display_name,
                    role = $role,
                    permissions = $permissions,
                    isActive = true,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("password_hash", password_hash))
            .bind(("display_name", data.display_name))
            .bind(("role", data.role))
            .bind(("permissions", permissions))
            .bind(("now", now))
            .await?;

        let created: Option<StaffUser> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff user".to_string()))
    }

    /// 保证默认管理员存在，首次启动时调用
    pub async fn ensure_seed_admin(
        &self,
        username: &str,
        password: &str,
        now: i64,
    ) -> RepoResult<Option<StaffUser>> {
        if self.find_by_username(username).await?.is_some() {
            return Ok(None);
        }
        let created = self
            .create(
                RegisterStaffRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                    display_name: "Administrator".to_string(),
                    role: StaffRole::Admin,
                },
                now,
            )
            .await?;
        Ok(Some(created))
    }
}
