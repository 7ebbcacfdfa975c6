//! 字段变更与变更集
//!
//! `FieldChanged` 封装单字段的旧值/新值；`ChangeSet` 以字段名为键聚合一次
//! flush 周期内某个资源的全部变更，供行为与事件监听器在分发期间读取。
//!
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 字段变更封装，包含旧值与新值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChanged<T> {
    pub old: T,
    pub new: T,
}

impl<T> FieldChanged<T> {
    pub fn new(old: T, new: T) -> Self {
        Self { old, new }
    }

    pub fn old_value(&self) -> &T {
        &self.old
    }

    pub fn new_value(&self) -> &T {
        &self.new
    }
}

impl<T> FieldChanged<T>
where
    T: PartialEq,
{
    pub fn is_changed(&self) -> bool {
        self.old != self.new
    }
}

/// 单个资源在一次 flush 周期内的字段变更集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: BTreeMap<String, FieldChanged<Value>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个字段变更，同名字段后写覆盖
    pub fn insert(&mut self, field: impl Into<String>, change: FieldChanged<Value>) {
        self.changes.insert(field.into(), change);
    }

    pub fn field(&self, name: &str) -> Option<&FieldChanged<Value>> {
        self.changes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldChanged<Value>)> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
