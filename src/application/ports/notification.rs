use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationSeverity::Info => "info",
            NotificationSeverity::Success => "success",
            NotificationSeverity::Warning => "warning",
            NotificationSeverity::Error => "error",
        }
    }
}

/// 一時通知の送出先。グローバルなトースト関数の代わりに構築時へ注入する。
/// 送出失敗は呼び出し元でログに落とすだけで、処理を失敗させない。
pub trait NotificationSink: Send + Sync {
    fn show(&self, message: &str, severity: NotificationSeverity) -> Result<(), String>;
}
