use crate::application::ports::credentials::AccessTokenProvider;
use crate::application::ports::remote_gateway::{RemoteAck, RemoteCallError, RemoteGateway};
use crate::domain::value_objects::{OfflineActionType, OfflinePayload, RemoteEntityId};
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// `(action_type, payload)` を Harmonia REST API の呼び出しへ対応付けるゲートウェイ。
/// トークンは呼び出しごとにプロバイダから取得するため、更新後のリプレイは新しい資格情報を使う。
pub struct RestRemoteGateway {
    base_url: String,
    client: reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl RestRemoteGateway {
    pub fn new(
        config: &RemoteConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, AppError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            base_url,
            client,
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn route(
        &self,
        action_type: &OfflineActionType,
        payload: &OfflinePayload,
    ) -> Result<(Method, String, Option<Value>), RemoteCallError> {
        let fields = payload.as_object().ok_or_else(|| RemoteCallError::InvalidPayload {
            action: action_type.to_string(),
            reason: "payload must be a JSON object".to_string(),
        })?;

        let body = Some(payload.as_json().clone());

        match action_type.as_str() {
            "create_playlist" => Ok((Method::POST, self.url("/playlists"), body)),
            "update_playlist" => {
                let id = required_str(action_type, fields, "id")?;
                Ok((Method::PUT, self.url(&format!("/playlists/{id}")), body))
            }
            "delete_playlist" => {
                let id = required_str(action_type, fields, "id")?;
                Ok((Method::DELETE, self.url(&format!("/playlists/{id}")), None))
            }
            "add_track" => {
                let playlist_id = required_str(action_type, fields, "playlistId")?;
                Ok((
                    Method::POST,
                    self.url(&format!("/playlists/{playlist_id}/tracks")),
                    body,
                ))
            }
            "remove_track" => {
                let playlist_id = required_str(action_type, fields, "playlistId")?;
                let song_id = required_str(action_type, fields, "songId")?;
                Ok((
                    Method::DELETE,
                    self.url(&format!("/playlists/{playlist_id}/tracks/{song_id}")),
                    None,
                ))
            }
            "verify_payment" => Ok((Method::POST, self.url("/payments/verify"), body)),
            other => Err(RemoteCallError::UnsupportedAction(other.to_string())),
        }
    }
}

#[async_trait]
impl RemoteGateway for RestRemoteGateway {
    async fn apply(
        &self,
        action_type: &OfflineActionType,
        payload: &OfflinePayload,
    ) -> Result<RemoteAck, RemoteCallError> {
        let (method, url, body) = self.route(action_type, payload)?;

        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|err| RemoteCallError::AuthExpired(err.to_string()))?;

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| RemoteCallError::NetworkUnavailable(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallError::AuthExpired(parse_api_error(status, &body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallError::RemoteRejected {
                status: status.as_u16(),
                message: parse_api_error(status, &body),
            });
        }

        Ok(parse_ack(response).await)
    }
}

fn required_str<'a>(
    action_type: &OfflineActionType,
    fields: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<&'a str, RemoteCallError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| RemoteCallError::InvalidPayload {
            action: action_type.to_string(),
            reason: format!("missing required field `{key}`"),
        })
}

async fn parse_ack(response: reqwest::Response) -> RemoteAck {
    // 応答ボディが無い/JSONでないエンドポイントは ID なしの成功として扱う
    let Ok(value) = response.json::<Value>().await else {
        return RemoteAck::default();
    };

    let remote_id = value
        .get("id")
        .and_then(|id| match id {
            Value::String(raw) => Some(raw.clone()),
            Value::Number(raw) => Some(raw.to_string()),
            _ => None,
        })
        .and_then(|raw| RemoteEntityId::new(raw).ok());

    RemoteAck { remote_id }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::ConfigurationError(
            "remote base URL must not be empty".to_string(),
        ));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(AppError::ConfigurationError(
            "remote base URL must include http:// or https://".to_string(),
        ))
    }
}
