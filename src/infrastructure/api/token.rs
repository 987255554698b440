use crate::application::ports::credentials::AccessTokenProvider;
use crate::shared::error::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// 固定トークンのプロバイダ。テストやワンショットのツール用。
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, AppError> {
        Ok(self.token.clone())
    }
}

/// ログイン/リフレッシュ処理から差し替えられる共有トークンストア。
#[derive(Default)]
pub struct SharedTokenStore {
    token: RwLock<Option<String>>,
}

impl SharedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl AccessTokenProvider for SharedTokenStore {
    async fn access_token(&self) -> Result<String, AppError> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::Auth("no access token available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_store_roundtrip() {
        let store = SharedTokenStore::new();
        assert!(store.access_token().await.is_err());

        store.set_token("tok_1").await;
        assert_eq!(store.access_token().await.unwrap(), "tok_1");

        store.clear().await;
        assert!(store.access_token().await.is_err());
    }
}
