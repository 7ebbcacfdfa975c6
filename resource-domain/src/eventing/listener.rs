//! 事件监听器（EventListener）
//!
//! 定义消费某类/多类/全部资源事件的处理逻辑与元信息（名称、订阅事件名）。
//!
use crate::event::ResourceEvent;

#[derive(Clone, Debug)]
pub enum ListenedEvents {
    One(String),
    Many(Vec<String>),
    All,
}

/// 事件监听器：按事件名消费资源事件
pub trait EventListener: Send + Sync {
    /// 监听器名称（用于错误包装与审计）
    fn listener_name(&self) -> &str;
    /// 返回该监听器订阅的事件名
    fn listened_events(&self) -> ListenedEvents;
    /// 处理事件；可就地追加消息或终止传播
    fn on_event(&self, event_name: &str, event: &mut ResourceEvent) -> anyhow::Result<()>;
}
