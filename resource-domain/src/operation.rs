//! 生命周期操作枚举
//!
//! 以带标签的枚举取代字符串键的方法分派：配置中的操作名统一经 `FromStr`
//! 解析，拼写错误在解析点即失败，而不是在运行期被悄悄忽略。
//!
use crate::error::ResourceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 资源生命周期操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Update,
    Delete,
    Load,
    Metadata,
}

impl Operation {
    /// 参与持久化冲突检测的三个操作
    pub const PERSISTENCE: [Operation; 3] =
        [Operation::Insert, Operation::Update, Operation::Delete];

    /// 操作名（同时用作事件名后缀）
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Load => "load",
            Operation::Metadata => "metadata",
        }
    }

    /// 是否属于持久化操作（insert/update/delete）
    pub const fn is_persistence(&self) -> bool {
        matches!(
            self,
            Operation::Insert | Operation::Update | Operation::Delete
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Operation::Insert),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            "load" => Ok(Operation::Load),
            "metadata" => Ok(Operation::Metadata),
            other => Err(ResourceError::UnknownOperation {
                name: other.to_string(),
            }),
        }
    }
}
