//! Customer Repository
//!
//! 顾客账号存放在 customer 库，邮箱做登录标识。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::RegisterCustomerRequest;

use crate::db::models::Customer;

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a new customer account
    pub async fn create(&self, data: RegisterCustomerRequest, now: i64) -> RepoResult<Customer> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let password_hash = Customer::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE customer SET
                    name = $name,
                    email = $email,
                    phone = $phone,
                    passwordHash = $password_hash,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("password_hash", password_hash))
            .bind(("now", now))
            .await?;

        let created: Option<Customer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }
}
