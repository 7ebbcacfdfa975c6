//! 资源领域事件
//!
//! 定义分发期间在监听器之间传递的事件对象（`ResourceEvent`）、其元数据
//! 与消息列表。
//!
mod metadata;
mod resource_event;

pub use metadata::EventMetadata;
pub use resource_event::{EventMessage, MessageKind, ResourceEvent};
