use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// サーバーが採番した正式なエンティティID。リプレイ成功時に確定する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteEntityId(String);

impl RemoteEntityId {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        Self::validate(value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Remote entity ID cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for RemoteEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RemoteEntityId> for String {
    fn from(id: RemoteEntityId) -> Self {
        id.0
    }
}

impl FromStr for RemoteEntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
