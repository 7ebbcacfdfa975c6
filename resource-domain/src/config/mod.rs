//! 资源与行为的只读配置模型
//!
//! 配置在引导期一次性构建，此后只读；注册表对并发读取安全。
//!
mod behavior_config;
mod registry;
mod resource_config;

pub use behavior_config::BehaviorConfig;
pub use registry::{BehaviorConfigRegistry, ResourceRegistry, ResourceRegistryBuilder};
pub use resource_config::{ActionDecl, BehaviorDecl, ResourceConfig};
