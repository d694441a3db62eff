use crate::utils::error::{EnablerError, Result};
use std::fs;
use std::path::Path;

/// 要設定的 repository 清單，一行一個名稱
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryList {
    names: Vec<String>,
}

impl RepositoryList {
    /// 從檔案載入；檔案不存在或沒有任何名稱時回傳錯誤
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EnablerError::RepositoryFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let list = Self::parse(&content);
        if list.is_empty() {
            return Err(EnablerError::EmptyRepositoryFile {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Loaded {} repositories from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RepositoryList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
