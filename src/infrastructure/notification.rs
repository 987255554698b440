use crate::application::ports::notification::{NotificationSeverity, NotificationSink};

/// 通知をログに流すだけのシンク。UIを持たないホスト（CLI・デーモン）向け。
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn show(&self, message: &str, severity: NotificationSeverity) -> Result<(), String> {
        match severity {
            NotificationSeverity::Error => {
                tracing::error!(target: "offline::notify", "{message}");
            }
            NotificationSeverity::Warning => {
                tracing::warn!(target: "offline::notify", "{message}");
            }
            NotificationSeverity::Info | NotificationSeverity::Success => {
                tracing::info!(target: "offline::notify", "{message}");
            }
        }
        Ok(())
    }
}
