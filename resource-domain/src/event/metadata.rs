use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 事件元数据
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    event_id: String,
    occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// 生成一份新的元数据（随机事件 id + 当前时间）
    pub fn generate() -> Self {
        Self::builder()
            .event_id(uuid::Uuid::new_v4().to_string())
            .occurred_at(Utc::now())
            .build()
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn occurred_at(&self) -> &DateTime<Utc> {
        &self.occurred_at
    }
}
