//! 持久化事件队列（PersistenceEventQueue）
//!
//! 将 ORM 层“该资源被插入/更新/删除”的事实转译为排队的领域事件：
//! - 事件名由分发器按资源配置解析，未注册类型静默跳过；
//! - 同一实例在一个 flush 周期内只允许调度一种持久化操作，
//!   冲突立即报错而非悄悄覆盖；
//! - 派发顺序固定为 update > insert > delete（同级保持调度顺序）；
//! - flush 先走队列基础流程，随后清空变更追踪器；`clear` 只清
//!   变更集缓存再清队列（追踪登记保留）。
//!
use crate::error::{ResourceError, ResourceResult};
use crate::eventing::dispatcher::ResourceEventDispatcher;
use crate::eventing::queue::{
    DEFAULT_EVENT_PRIORITY, EventQueue, EventQueuePolicy, PendingEvents,
};
use crate::eventing::tracker::ChangeTracker;
use crate::operation::Operation;
use crate::resource::{ObjectIdentity, Resource};
use std::sync::Arc;

/// 同一 flush 周期内的固定优先级带：update 先于 insert，insert 先于 delete。
/// 相关资源的更新事件先行，依赖方在容器消失前先看到新数据。
pub const UPDATE_EVENT_PRIORITY: i64 = 9999;
pub const INSERT_EVENT_PRIORITY: i64 = 9998;
pub const DELETE_EVENT_PRIORITY: i64 = 9997;

// 事件名形如 `{namespace}.{name}.{suffix}`；仅当末段是持久化后缀时参与
// 冲突检测与优先级分带
fn split_persistence_suffix(event_name: &str) -> Option<(&str, Operation)> {
    let (prefix, suffix) = event_name.rsplit_once('.')?;
    Operation::PERSISTENCE
        .into_iter()
        .find(|op| op.as_str() == suffix)
        .map(|op| (prefix, op))
}

/// 持久化队列策略：后缀感知的冲突检测与固定优先级带
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceQueuePolicy;

impl EventQueuePolicy for PersistenceQueuePolicy {
    fn prevent_conflict(
        &self,
        pending: &PendingEvents,
        event_name: &str,
        identity: ObjectIdentity,
    ) -> ResourceResult<()> {
        let Some((prefix, requested)) = split_persistence_suffix(event_name) else {
            return Ok(());
        };

        for other in Operation::PERSISTENCE {
            if other == requested {
                continue;
            }
            if pending.contains(&format!("{prefix}.{}", other.as_str()), identity) {
                return Err(ResourceError::EventConflict {
                    current: other.as_str().to_string(),
                    requested: requested.as_str().to_string(),
                });
            }
        }
        Ok(())
    }

    fn event_priority(&self, event_name: &str) -> i64 {
        match split_persistence_suffix(event_name) {
            Some((_, Operation::Update)) => UPDATE_EVENT_PRIORITY,
            Some((_, Operation::Insert)) => INSERT_EVENT_PRIORITY,
            Some((_, Operation::Delete)) => DELETE_EVENT_PRIORITY,
            _ => DEFAULT_EVENT_PRIORITY,
        }
    }
}

/// 绑定 ORM flush 生命周期的持久化事件队列
///
/// 实例归属单次 flush 周期；flush 监听器对每个变更资源先执行行为，
/// 再调用 `schedule_*`，调度完成后统一 `flush`。
pub struct PersistenceEventQueue {
    queue: EventQueue<PersistenceQueuePolicy>,
    tracker: Arc<dyn ChangeTracker>,
}

impl PersistenceEventQueue {
    pub fn new(
        dispatcher: Arc<ResourceEventDispatcher>,
        tracker: Arc<dyn ChangeTracker>,
    ) -> Self {
        Self {
            queue: EventQueue::with_policy(dispatcher, PersistenceQueuePolicy),
            tracker,
        }
    }

    pub fn tracker(&self) -> &Arc<dyn ChangeTracker> {
        &self.tracker
    }

    pub fn dispatcher(&self) -> &Arc<ResourceEventDispatcher> {
        self.queue.dispatcher()
    }

    /// 入队任意事件名；自定义事件名不参与持久化冲突检测
    pub fn enqueue(
        &mut self,
        event_name: &str,
        resource: &Arc<dyn Resource>,
        strict: bool,
    ) -> ResourceResult<()> {
        self.queue.enqueue(event_name, resource, strict)
    }

    pub fn is_opened(&self) -> bool {
        self.queue.is_opened()
    }

    pub fn set_opened(&mut self, opened: bool) {
        self.queue.set_opened(opened);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule_insert(&mut self, resource: &Arc<dyn Resource>) -> ResourceResult<()> {
        self.schedule(resource, Operation::Insert)
    }

    pub fn schedule_update(&mut self, resource: &Arc<dyn Resource>) -> ResourceResult<()> {
        self.schedule(resource, Operation::Update)
    }

    pub fn schedule_delete(&mut self, resource: &Arc<dyn Resource>) -> ResourceResult<()> {
        self.schedule(resource, Operation::Delete)
    }

    // 未注册类型不是资源，静默跳过；其余委托基础队列入队
    fn schedule(&mut self, resource: &Arc<dyn Resource>, operation: Operation) -> ResourceResult<()> {
        let Some(event_name) = self
            .queue
            .dispatcher()
            .resource_event_name(resource.as_ref(), operation.as_str())
        else {
            return Ok(());
        };
        self.queue.enqueue(&event_name, resource, false)
    }

    /// 基础 flush 完成后清空变更追踪器
    ///
    /// 顺序固定：先队列状态、后追踪器状态。监听器在派发期间仍可读到
    /// 本次 flush 的变更集。
    pub fn flush(&mut self) -> ResourceResult<()> {
        self.queue.flush()?;
        self.tracker.clear();
        Ok(())
    }

    /// 丢弃待派发事件与变更集缓存（追踪登记保留）
    pub fn clear(&mut self) {
        self.tracker.clear_change_sets();
        self.queue.clear();
    }
}
