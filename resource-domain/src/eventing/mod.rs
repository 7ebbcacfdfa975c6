//! 事件系统（eventing）
//!
//! 提供资源事件的同步分发与延迟派发运行时：
//! - `EventListener`：按事件名订阅并消费资源事件；
//! - `ResourceEventDispatcher`：同步分发器，负责事件构造、命名与扇出；
//! - `EventQueue`：延迟派发队列，带优先级排序与可插拔冲突检测；
//! - `PersistenceEventQueue`：绑定 ORM flush 生命周期的持久化特化；
//! - `ChangeTracker`：持久化变更追踪边界协议。
//!
//! 该模块仅定义协议与队列运行时，不绑定具体 ORM；flush 监听器由
//! 基础设施层适配。
//!
pub mod dispatcher;
pub mod listener;
pub mod persistence;
pub mod queue;
pub mod tracker;

pub use dispatcher::ResourceEventDispatcher;
pub use listener::{EventListener, ListenedEvents};
pub use persistence::{
    DELETE_EVENT_PRIORITY, INSERT_EVENT_PRIORITY, PersistenceEventQueue, PersistenceQueuePolicy,
    UPDATE_EVENT_PRIORITY,
};
pub use queue::{
    DEFAULT_EVENT_PRIORITY, DefaultQueuePolicy, EventQueue, EventQueuePolicy, PendingEvents,
};
pub use tracker::{ChangeTracker, InMemoryChangeTracker};
