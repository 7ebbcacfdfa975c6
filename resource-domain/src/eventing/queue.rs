//! 事件队列（EventQueue）
//!
//! 将领域事件的分发推迟到显式的 flush 点：
//! - 待派发表以 `(事件名, 实例标识)` 为键，重复键后写覆盖（保留原位置）；
//! - flush 前按策略计算优先级，稳定降序排序后逐个分发；
//! - `opened` 闸门抑制 flush 期间的再入调度，flush 自身不可重入；
//! - 冲突检测与优先级均为策略（`EventQueuePolicy`）的扩展点，
//!   基础策略放行一切、优先级恒为默认值。
//!
//! 队列实例归属单个 flush 周期，由调度方显式构造并独占持有，
//! 不做进程级单例，也不提供内部加锁。
//!
use crate::error::{ResourceError, ResourceResult};
use crate::event::ResourceEvent;
use crate::eventing::dispatcher::ResourceEventDispatcher;
use crate::resource::{ObjectIdentity, Resource};
use std::cmp::Reverse;
use std::sync::Arc;

/// 基础优先级：未被策略细化的事件一律取该值
pub const DEFAULT_EVENT_PRIORITY: i64 = 0;

/// 队列策略：冲突检测与优先级的扩展点
pub trait EventQueuePolicy: Send + Sync {
    /// 入队前检查；基础实现放行
    fn prevent_conflict(
        &self,
        _pending: &PendingEvents,
        _event_name: &str,
        _identity: ObjectIdentity,
    ) -> ResourceResult<()> {
        Ok(())
    }

    /// 事件优先级；基础实现返回默认值
    fn event_priority(&self, _event_name: &str) -> i64 {
        DEFAULT_EVENT_PRIORITY
    }
}

/// 默认策略：不做冲突检测，优先级恒为默认值
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultQueuePolicy;

impl EventQueuePolicy for DefaultQueuePolicy {}

struct PendingEvent {
    event_name: String,
    identity: ObjectIdentity,
    event: ResourceEvent,
}

/// 待派发事件集合（插入有序）
#[derive(Default)]
pub struct PendingEvents {
    entries: Vec<PendingEvent>,
}

impl PendingEvents {
    /// 是否存在给定键的待派发事件
    pub fn contains(&self, event_name: &str, identity: ObjectIdentity) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.identity == identity && entry.event_name == event_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // 重复键就地覆盖：后写胜出，原有位置保留
    fn insert(&mut self, event_name: String, identity: ObjectIdentity, event: ResourceEvent) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|entry| entry.identity == identity && entry.event_name == event_name)
        {
            existing.event = event;
        } else {
            self.entries.push(PendingEvent {
                event_name,
                identity,
                event,
            });
        }
    }

    fn take(&mut self) -> Vec<PendingEvent> {
        std::mem::take(&mut self.entries)
    }

    fn restore(&mut self, entries: Vec<PendingEvent>) {
        self.entries = entries;
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// 延迟派发的事件队列
pub struct EventQueue<P = DefaultQueuePolicy> {
    dispatcher: Arc<ResourceEventDispatcher>,
    policy: P,
    opened: bool,
    pending: PendingEvents,
}

impl EventQueue<DefaultQueuePolicy> {
    pub fn new(dispatcher: Arc<ResourceEventDispatcher>) -> Self {
        Self::with_policy(dispatcher, DefaultQueuePolicy)
    }
}

impl<P> EventQueue<P>
where
    P: EventQueuePolicy,
{
    pub fn with_policy(dispatcher: Arc<ResourceEventDispatcher>, policy: P) -> Self {
        Self {
            dispatcher,
            policy,
            opened: true,
            pending: PendingEvents::default(),
        }
    }

    pub fn dispatcher(&self) -> &Arc<ResourceEventDispatcher> {
        &self.dispatcher
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// 调度方在 flush 各阶段间切换闸门，抑制再入调度
    pub fn set_opened(&mut self, opened: bool) {
        self.opened = opened;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 将资源解析为事件后入队
    ///
    /// 未注册类型：`strict` 时报错，否则静默跳过。队列关闭时入队被抑制。
    pub fn enqueue(
        &mut self,
        event_name: &str,
        resource: &Arc<dyn Resource>,
        strict: bool,
    ) -> ResourceResult<()> {
        let Some(event) = self.dispatcher.create_resource_event(resource, strict)? else {
            return Ok(());
        };
        self.enqueue_event(event_name, event)
    }

    /// 将已构造的事件入队
    pub fn enqueue_event(&mut self, event_name: &str, event: ResourceEvent) -> ResourceResult<()> {
        if !self.opened {
            return Ok(());
        }

        let identity = event.identity();
        self.policy
            .prevent_conflict(&self.pending, event_name, identity)?;
        self.pending.insert(event_name.to_string(), identity, event);
        Ok(())
    }

    /// 关闸、按优先级稳定降序分发全部待派发事件、清空并重新开闸
    ///
    /// 已关闭时调用视为嵌套 flush，立即报错。分发中途失败时错误原样上抛，
    /// 队列保持关闭，由事务边界回滚后自行 `clear` 并重新开闸。
    pub fn flush(&mut self) -> ResourceResult<()> {
        if !self.opened {
            return Err(ResourceError::ClosedQueue);
        }
        self.opened = false;

        let mut entries = self.pending.take();
        entries.sort_by_key(|entry| Reverse(self.policy.event_priority(&entry.event_name)));

        let mut iter = entries.into_iter();
        while let Some(mut entry) = iter.next() {
            if let Err(err) = self.dispatcher.dispatch(&entry.event_name, &mut entry.event) {
                // 失败条目与未派发的剩余条目退回，等待事务边界 clear
                self.pending
                    .restore(std::iter::once(entry).chain(iter).collect());
                return Err(err);
            }
        }

        self.clear();
        self.opened = true;
        Ok(())
    }

    /// 丢弃全部待派发事件，不分发（回滚场景）
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResourceConfig, ResourceRegistry};
    use crate::eventing::listener::{EventListener, ListenedEvents};
    use std::any::Any;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Product;

    #[derive(Debug)]
    struct Untracked;

    impl crate::resource::Resource for Product {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn class(&self) -> &'static str {
            std::any::type_name::<Self>()
        }
    }

    impl crate::resource::Resource for Untracked {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn class(&self) -> &'static str {
            std::any::type_name::<Self>()
        }
    }

    struct RecordingListener {
        seen: Arc<Mutex<Vec<(String, String)>>>,
        fail_on: Option<&'static str>,
    }

    impl EventListener for RecordingListener {
        fn listener_name(&self) -> &str {
            "recording"
        }

        fn listened_events(&self) -> ListenedEvents {
            ListenedEvents::All
        }

        fn on_event(&self, event_name: &str, event: &mut ResourceEvent) -> anyhow::Result<()> {
            if let Some(bad) = self.fail_on {
                if event_name == bad {
                    anyhow::bail!("fail requested");
                }
            }
            self.seen
                .lock()
                .unwrap()
                .push((event_name.to_string(), event.metadata().event_id().to_string()));
            Ok(())
        }
    }

    fn dispatcher(
        seen: Arc<Mutex<Vec<(String, String)>>>,
        fail_on: Option<&'static str>,
    ) -> Arc<ResourceEventDispatcher> {
        let registry = Arc::new(
            ResourceRegistry::builder()
                .register::<Product>(
                    ResourceConfig::builder().namespace("shop").name("product").build(),
                )
                .build(),
        );
        Arc::new(
            ResourceEventDispatcher::builder()
                .resources(registry)
                .event_listeners(vec![Arc::new(RecordingListener { seen, fail_on })])
                .build(),
        )
    }

    fn dispatched_names(seen: &Arc<Mutex<Vec<(String, String)>>>) -> Vec<String> {
        seen.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
    }

    // 默认策略下同优先级保持插入顺序（稳定排序）
    #[test]
    fn flush_dispatches_in_insertion_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), None));
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);
        let b: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.custom_a", &a, false).unwrap();
        queue.enqueue("shop.product.custom_b", &b, false).unwrap();
        queue.flush().unwrap();

        assert_eq!(
            dispatched_names(&seen),
            vec!["shop.product.custom_a", "shop.product.custom_b"]
        );
    }

    // 重复键后写覆盖：只派发第二个事件对象，且保留原队列位置
    #[test]
    fn duplicate_key_keeps_position_last_write_wins() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = dispatcher(seen.clone(), None);
        let mut queue = EventQueue::new(dispatcher.clone());
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);
        let b: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        let first = dispatcher.create_resource_event(&a, true).unwrap().unwrap();
        let replacement = dispatcher.create_resource_event(&a, true).unwrap().unwrap();
        let replacement_id = replacement.metadata().event_id().to_string();

        queue.enqueue_event("shop.product.custom", first).unwrap();
        queue.enqueue("shop.product.other", &b, false).unwrap();
        queue.enqueue_event("shop.product.custom", replacement).unwrap();

        assert_eq!(queue.len(), 2);
        queue.flush().unwrap();

        let dispatched = seen.lock().unwrap().clone();
        assert_eq!(dispatched.len(), 2);
        // 覆盖后的事件保留在首次入队的位置
        assert_eq!(dispatched[0].0, "shop.product.custom");
        assert_eq!(dispatched[0].1, replacement_id);
        assert_eq!(dispatched[1].0, "shop.product.other");
    }

    // flush 清空状态并重新开闸；空队列 flush 是无害的空操作
    #[test]
    fn flush_clears_and_reopens() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), None));
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.custom", &a, false).unwrap();
        queue.flush().unwrap();

        assert!(queue.is_empty());
        assert!(queue.is_opened());
        assert_eq!(seen.lock().unwrap().len(), 1);

        queue.flush().unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    // 嵌套 flush 立即报错，不派发任何事件
    #[test]
    fn flush_on_closed_queue_fails() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), None));
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.custom", &a, false).unwrap();
        queue.set_opened(false);

        let err = queue.flush().unwrap_err();
        match err {
            ResourceError::ClosedQueue => {}
            other => panic!("unexpected {other:?}"),
        }
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(queue.len(), 1);
    }

    // 关闸期间的入队被抑制（再入保护）
    #[test]
    fn enqueue_on_closed_queue_is_suppressed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), None));
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.set_opened(false);
        queue.enqueue("shop.product.custom", &a, false).unwrap();

        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_without_dispatch() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), None));
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.custom", &a, false).unwrap();
        queue.clear();
        queue.flush().unwrap();

        assert!(seen.lock().unwrap().is_empty());
    }

    // 未注册资源：非严格静默，严格报错且不留痕
    #[test]
    fn unregistered_resource_enqueue() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), None));
        let unknown: Arc<dyn crate::resource::Resource> = Arc::new(Untracked);

        queue.enqueue("shop.unknown.custom", &unknown, false).unwrap();
        assert!(queue.is_empty());

        let err = queue.enqueue("shop.unknown.custom", &unknown, true).unwrap_err();
        match err {
            ResourceError::ResourceNotRegistered { .. } => {}
            other => panic!("unexpected {other:?}"),
        }
        assert!(queue.is_empty());
    }

    struct NamedPriorityPolicy;

    impl EventQueuePolicy for NamedPriorityPolicy {
        fn prevent_conflict(
            &self,
            pending: &PendingEvents,
            event_name: &str,
            _identity: ObjectIdentity,
        ) -> ResourceResult<()> {
            if event_name.ends_with(".forbidden") && !pending.is_empty() {
                return Err(ResourceError::EventConflict {
                    current: "any".to_string(),
                    requested: "forbidden".to_string(),
                });
            }
            Ok(())
        }

        fn event_priority(&self, event_name: &str) -> i64 {
            if event_name.ends_with(".late") { -10 } else { 5 }
        }
    }

    // 策略优先级决定派发顺序，同优先级保持插入序
    #[test]
    fn policy_priority_orders_flush() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::with_policy(dispatcher(seen.clone(), None), NamedPriorityPolicy);
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);
        let b: Arc<dyn crate::resource::Resource> = Arc::new(Product);
        let c: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.late", &a, false).unwrap();
        queue.enqueue("shop.product.first", &b, false).unwrap();
        queue.enqueue("shop.product.second", &c, false).unwrap();
        queue.flush().unwrap();

        assert_eq!(
            dispatched_names(&seen),
            vec!["shop.product.first", "shop.product.second", "shop.product.late"]
        );
    }

    // 策略冲突检测失败阻止入队
    #[test]
    fn policy_conflict_rejects_enqueue() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::with_policy(dispatcher(seen.clone(), None), NamedPriorityPolicy);
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);
        let b: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.ok", &a, false).unwrap();
        let err = queue.enqueue("shop.product.forbidden", &b, false).unwrap_err();
        match err {
            ResourceError::EventConflict { .. } => {}
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(queue.len(), 1);
    }

    // 分发失败：错误上抛，队列保持关闭，由调用方清理后复用
    #[test]
    fn listener_failure_leaves_queue_closed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut queue = EventQueue::new(dispatcher(seen.clone(), Some("shop.product.bad")));
        let a: Arc<dyn crate::resource::Resource> = Arc::new(Product);

        queue.enqueue("shop.product.bad", &a, false).unwrap();
        let err = queue.flush().unwrap_err();
        match err {
            ResourceError::EventListener { listener, .. } => assert_eq!(listener, "recording"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!queue.is_opened());
        // 失败条目退回待派发表，等待回滚路径清理
        assert_eq!(queue.len(), 1);

        queue.clear();
        queue.set_opened(true);
        queue.flush().unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }
}
