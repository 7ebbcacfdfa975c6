//! 领域层统一错误定义
//!
//! 聚焦配置解析、事件队列与监听器分发的最小必要集合，
//! 所有错误在产生点即为致命错误：不重试、不降级，由事务边界负责回滚。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ResourceError {
    // --- 配置解析 ---
    #[error("resource not registered: {class}")]
    ResourceNotRegistered { class: String },
    #[error("resource config not found: {name}")]
    ResourceConfigNotFound { name: String },
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },

    // --- 事件队列 ---
    #[error("event queue closed: flush is not re-entrant")]
    ClosedQueue,
    #[error("event conflict: object already scheduled for action {current}, requested {requested}")]
    EventConflict { current: String, requested: String },

    // --- 事件分发 ---
    #[error("event listener error: listener={listener}, reason={reason}")]
    EventListener { listener: String, reason: String },
}

/// 统一 Result 类型别名
pub type ResourceResult<T> = Result<T, ResourceError>;
