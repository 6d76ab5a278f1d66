//! 本地持久化 - localStorage 的文件版
//!
//! 一个 JSON 对象文件，键 → 任意 JSON 值。向导、购物车和顾客会话
//! 共用这一份文件；键名在 [`shared::intent::keys`] 里逐字保留。
//!
//! 每次写操作都立即落盘，崩溃后丢的最多是最后一次写入。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const STORE_FILE: &str = "local_store.json";

/// 客户端本地存储
pub struct LocalStore {
    /// 存储文件路径: {dir}/local_store.json
    file_path: PathBuf,
    /// 内存态，与文件保持同步
    data: BTreeMap<String, serde_json::Value>,
}

impl LocalStore {
    /// 创建空存储（不读文件，首次写入时落盘）
    pub fn new(dir: &Path) -> Self {
        Self {
            file_path: dir.join(STORE_FILE),
            data: BTreeMap::new(),
        }
    }

    /// 从文件加载，文件不存在时视为空
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let file_path = dir.join(STORE_FILE);

        let data = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { file_path, data })
    }

    /// 保存到文件
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    /// 写入一个键并落盘
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        self.data
            .insert(key.to_string(), serde_json::to_value(value)?);
        self.save()?;
        tracing::debug!(key = %key, "Store key written");
        Ok(())
    }

    /// 读取一个键
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// 读取并删除一个键（断点续作的 load + clear 语义）
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, StoreError> {
        match self.data.remove(key) {
            Some(value) => {
                self.save()?;
                Ok(Some(serde_json::from_value(value)?))
            }
            None => Ok(None),
        }
    }

    /// 删除一个键，键不存在时是 no-op
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.data.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// 清空所有键
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.data.clear();
        self.save()?;
        Ok(())
    }

    /// 当前存在的键
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::intent::keys;

    #[test]
    fn test_set_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());

        store.set(keys::QR_TABLE_NUMBER, &5).unwrap();
        assert_eq!(store.get::<i32>(keys::QR_TABLE_NUMBER).unwrap(), Some(5));
        assert!(store.contains(keys::QR_TABLE_NUMBER));
        assert_eq!(store.get::<i32>("missing").unwrap(), None);
    }

    #[test]
    fn test_persists_across_load() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = LocalStore::new(dir.path());
            store.set(keys::RETURN_AFTER_LOGIN, &"/reserve").unwrap();
        }

        let store = LocalStore::load(dir.path()).unwrap();
        assert_eq!(
            store.get::<String>(keys::RETURN_AFTER_LOGIN).unwrap(),
            Some("/reserve".to_string())
        );
    }

    #[test]
    fn test_take_removes_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());
        store.set(keys::QR_TABLE_NUMBER, &3).unwrap();

        assert_eq!(store.take::<i32>(keys::QR_TABLE_NUMBER).unwrap(), Some(3));
        assert_eq!(store.take::<i32>(keys::QR_TABLE_NUMBER).unwrap(), None);

        let reloaded = LocalStore::load(dir.path()).unwrap();
        assert!(!reloaded.contains(keys::QR_TABLE_NUMBER));
    }

    #[test]
    fn test_clear_empties_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());
        store.set("a", &1).unwrap();
        store.set("b", &2).unwrap();
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);

        store.clear().unwrap();
        assert!(store.keys().is_empty());
        let reloaded = LocalStore::load(dir.path()).unwrap();
        assert!(reloaded.keys().is_empty());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::load(dir.path()).unwrap();
        assert!(store.keys().is_empty());
    }
}
