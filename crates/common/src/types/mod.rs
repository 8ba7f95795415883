use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".into(), error: None }
    }

    pub fn degraded(reason: &str) -> Self {
        Self { status: "degraded".into(), error: Some(reason.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
