//! 行为执行器（BehaviorExecutor）
//!
//! 对一个资源按声明顺序执行其全部行为：
//! - 配置经翻译感知路径解析（翻译行映射回所属资源的配置）；
//! - 未注册类型与零行为资源静默返回；
//! - 行为配置或活实例缺失是致命错误，不做“跳过未知行为”降级；
//! - 选项三层合并：行为内建默认 < 行为配置默认 < 资源级覆盖，逐层递归。
//!
//! `metadata` 走独立入口，以类型名为键，在 ORM 引导期每类调用一次。
//!
use crate::behavior::Behavior;
use crate::behavior_registry::BehaviorRegistry;
use crate::error::AppError;
use resource_domain::config::{BehaviorConfigRegistry, ResourceConfig, ResourceRegistry};
use resource_domain::metadata::ClassMetadata;
use resource_domain::operation::Operation;
use resource_domain::options::{Options, merge_options};
use resource_domain::resource::Resource;
use std::sync::Arc;

/// 行为执行器
pub struct BehaviorExecutor {
    resources: Arc<ResourceRegistry>,
    behavior_configs: Arc<BehaviorConfigRegistry>,
    behaviors: Arc<BehaviorRegistry>,
}

impl BehaviorExecutor {
    pub fn new(
        resources: Arc<ResourceRegistry>,
        behavior_configs: Arc<BehaviorConfigRegistry>,
        behaviors: Arc<BehaviorRegistry>,
    ) -> Self {
        Self {
            resources,
            behavior_configs,
            behaviors,
        }
    }

    /// 对资源执行一个生命周期操作声明的全部行为
    ///
    /// `Operation::Metadata` 不经此入口，传入即报错。
    pub fn execute(&self, resource: &dyn Resource, operation: Operation) -> Result<(), AppError> {
        if operation == Operation::Metadata {
            return Err(AppError::UnsupportedOperation {
                operation: operation.to_string(),
            });
        }

        let Some(config) = self.resources.find_for(resource) else {
            return Ok(());
        };

        self.run(&config, operation, |behavior, options| match operation {
            Operation::Insert => behavior.on_insert(resource, options),
            Operation::Update => behavior.on_update(resource, options),
            Operation::Delete => behavior.on_delete(resource, options),
            Operation::Load => behavior.on_load(resource, options),
            Operation::Metadata => anyhow::bail!("metadata requires class metadata"),
        })
    }

    /// ORM 引导期的映射钩子：按类型名解析配置并执行 `metadata` 行为
    pub fn metadata(&self, metadata: &mut ClassMetadata) -> Result<(), AppError> {
        let Some(config) = self.resources.find_by_class(metadata.class()) else {
            return Ok(());
        };

        self.run(&config, Operation::Metadata, |behavior, options| {
            behavior.on_metadata(metadata, options)
        })
    }

    // 公共扇出路径：按声明顺序过滤、合并选项并调用
    fn run<F>(
        &self,
        config: &ResourceConfig,
        operation: Operation,
        mut invoke: F,
    ) -> Result<(), AppError>
    where
        F: FnMut(&dyn Behavior, &Options) -> anyhow::Result<()>,
    {
        for decl in config.behaviors() {
            let behavior_config = self
                .behavior_configs
                .find(decl.name())
                .ok_or_else(|| AppError::BehaviorConfigNotFound(decl.name().to_string()))?;

            if !behavior_config.supports(operation) {
                continue;
            }

            let behavior = self.behaviors.get_behavior(decl.name())?;
            let defaults = merge_options(
                &behavior.configure_options(),
                behavior_config.default_options(),
            );
            let options = merge_options(&defaults, decl.options());

            invoke(behavior.as_ref(), &options).map_err(|err| AppError::Behavior {
                behavior: decl.name().to_string(),
                operation: operation.to_string(),
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }
}
