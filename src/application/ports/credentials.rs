use crate::shared::error::AppError;
use async_trait::async_trait;

/// リモート呼び出しごとに現在のアクセストークンを供給する。
/// キューは資格情報を保存しない。トークン更新後のリプレイは新しい値を拾う。
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AppError>;
}
