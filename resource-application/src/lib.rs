//! 资源管理应用层（resource-application）
//!
//! 在领域层配置模型之上提供行为（Behavior）运行时：
//! - `Behavior`：声明式附加在资源上的生命周期副作用处理器；
//! - `BehaviorRegistry`：行为名 → 活实例的服务定位，带别名间接层；
//! - `BehaviorExecutor`：按资源配置扇出行为调用，合并选项并按操作过滤。
//!
pub mod behavior;
pub mod behavior_executor;
pub mod behavior_registry;
pub mod error;

pub use behavior::Behavior;
pub use behavior_executor::BehaviorExecutor;
pub use behavior_registry::BehaviorRegistry;
