//! 资源事件（ResourceEvent）
//!
//! 事件对象携带资源句柄、元数据与消息列表，在同步分发期间被监听器就地
//! 修改（追加消息、终止传播）。
//!
use crate::event::EventMetadata;
use crate::resource::{ObjectIdentity, Resource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 事件消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// 监听器在分发期间附加到事件上的消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    kind: MessageKind,
    content: String,
}

impl EventMessage {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// 资源生命周期事件
#[derive(Debug, Clone)]
pub struct ResourceEvent {
    metadata: EventMetadata,
    resource: Arc<dyn Resource>,
    messages: Vec<EventMessage>,
    propagation_stopped: bool,
}

impl ResourceEvent {
    pub fn new(resource: Arc<dyn Resource>) -> Self {
        Self {
            metadata: EventMetadata::generate(),
            resource,
            messages: Vec::new(),
            propagation_stopped: false,
        }
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    pub fn resource(&self) -> &Arc<dyn Resource> {
        &self.resource
    }

    /// 事件所指资源的实例标识
    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity::of(&self.resource)
    }

    pub fn add_message(&mut self, message: EventMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[EventMessage] {
        &self.messages
    }

    /// 终止后续监听器的执行
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
