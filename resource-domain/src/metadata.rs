//! ORM 映射元数据视图
//!
//! `metadata` 阶段的行为在 ORM 引导期收到 `ClassMetadata`，可向其中追加
//! 字段映射（例如时间戳、软删除列）。以类型名为键，与注册表的
//! `find_by_class` 索引对齐；每个类只在引导期处理一次，而非每请求。
//!
use crate::resource::Resource;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个字段的映射描述
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[builder(into)]
    kind: String,
    #[builder(default)]
    nullable: bool,
}

impl FieldMapping {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

/// 一个实体类的映射元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    class: String,
    fields: BTreeMap<String, FieldMapping>,
}

impl ClassMetadata {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: BTreeMap::new(),
        }
    }

    /// 以资源类型构造，键为完整类型名
    pub fn of<T: Resource>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// 追加或覆盖一个字段映射
    pub fn map_field(&mut self, name: impl Into<String>, mapping: FieldMapping) {
        self.fields.insert(name.into(), mapping);
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldMapping)> {
        self.fields.iter()
    }
}
