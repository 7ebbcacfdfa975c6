//! 变更追踪边界（ChangeTracker）
//!
//! 持久化事件队列与监听器通过该协议读取“本次 flush 改了什么”。
//! 变更集缓存与实例登记分两级清理：`clear_change_sets` 只清缓存，
//! `clear` 连同登记一并清空。
//!
//! `InMemoryChangeTracker` 为内存参考实现，面向测试、示例与本地开发。
//!
use crate::change_set::{ChangeSet, FieldChanged};
use crate::resource::{ObjectIdentity, Resource};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 持久化变更追踪协议
pub trait ChangeTracker: Send + Sync {
    /// 登记一个受追踪实例
    fn track(&self, resource: &Arc<dyn Resource>);

    fn is_tracked(&self, resource: &Arc<dyn Resource>) -> bool;

    /// 记录一个字段变更（隐式登记实例）
    fn record_change(&self, resource: &Arc<dyn Resource>, field: &str, change: FieldChanged<Value>);

    /// 读取实例的完整变更集
    fn change_set(&self, resource: &Arc<dyn Resource>) -> Option<ChangeSet>;

    /// 读取单字段变更
    fn field_change(&self, resource: &Arc<dyn Resource>, field: &str)
    -> Option<FieldChanged<Value>>;

    /// 仅清空变更集缓存，保留实例登记
    fn clear_change_sets(&self);

    /// 清空变更集缓存与实例登记
    fn clear(&self);
}

#[derive(Default)]
struct TrackerState {
    tracked: HashSet<ObjectIdentity>,
    change_sets: HashMap<ObjectIdentity, ChangeSet>,
}

/// 内存版变更追踪器
#[derive(Default)]
pub struct InMemoryChangeTracker {
    state: Mutex<TrackerState>,
}

impl InMemoryChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChangeTracker for InMemoryChangeTracker {
    fn track(&self, resource: &Arc<dyn Resource>) {
        self.lock().tracked.insert(ObjectIdentity::of(resource));
    }

    fn is_tracked(&self, resource: &Arc<dyn Resource>) -> bool {
        self.lock().tracked.contains(&ObjectIdentity::of(resource))
    }

    fn record_change(
        &self,
        resource: &Arc<dyn Resource>,
        field: &str,
        change: FieldChanged<Value>,
    ) {
        let identity = ObjectIdentity::of(resource);
        let mut state = self.lock();
        state.tracked.insert(identity);
        state
            .change_sets
            .entry(identity)
            .or_default()
            .insert(field, change);
    }

    fn change_set(&self, resource: &Arc<dyn Resource>) -> Option<ChangeSet> {
        self.lock()
            .change_sets
            .get(&ObjectIdentity::of(resource))
            .cloned()
    }

    fn field_change(
        &self,
        resource: &Arc<dyn Resource>,
        field: &str,
    ) -> Option<FieldChanged<Value>> {
        self.lock()
            .change_sets
            .get(&ObjectIdentity::of(resource))
            .and_then(|cs| cs.field(field).cloned())
    }

    fn clear_change_sets(&self) {
        self.lock().change_sets.clear();
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.change_sets.clear();
        state.tracked.clear();
    }
}
