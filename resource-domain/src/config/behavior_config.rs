//! 行为配置（BehaviorConfig）
//!
use crate::operation::Operation;
use crate::options::Options;
use bon::Builder;

/// 行为的不可变元数据：名称、支持的操作集合与默认选项
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[builder(into)]
    name: String,
    #[builder(default)]
    operations: Vec<Operation>,
    #[builder(default)]
    default_options: Options,
}

impl BehaviorConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// 该行为是否声明支持给定操作
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    pub fn default_options(&self) -> &Options {
        &self.default_options
    }
}
