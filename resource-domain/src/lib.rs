//! 资源管理领域层基础库（resource-domain）
//!
//! 提供以“资源（Resource）”为中心的声明式生命周期构件，用于在应用中实现：
//! - 资源与行为的只读配置模型（`config`）及选项树合并（`options`）
//! - 资源领域事件（`event`）与变更集（`change_set`）
//! - 事件系统（`eventing`）：分发器、事件队列、持久化事件队列与变更追踪边界
//! - ORM 映射元数据视图（`metadata`）与生命周期操作枚举（`operation`）
//!
//! 本 crate 不绑定任何具体 ORM 或存储实现：持久化侧只以 `ChangeTracker`
//! 等最小协议出现，由上层基础设施适配。队列与分发器均为同步执行，
//! 生命周期内不跨线程共享，一次 flush 周期对应一个队列实例。
//!
//! 典型用法：
//! 1. 在引导期构建 `ResourceRegistry` 与 `BehaviorConfigRegistry`（构建后只读）；
//! 2. 以注册表装配 `ResourceEventDispatcher` 与事件监听器；
//! 3. 在每次 ORM flush 周期内创建 `PersistenceEventQueue`，
//!    由 flush 监听器调用 `schedule_insert/update/delete` 并最终 `flush`。
//!
pub mod change_set;
pub mod config;
pub mod error;
pub mod event;
pub mod eventing;
pub mod metadata;
pub mod operation;
pub mod options;
pub mod resource;
