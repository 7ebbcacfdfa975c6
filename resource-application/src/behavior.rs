//! 行为（Behavior）
//!
//! 声明式附加在资源上的副作用处理器，在特定生命周期点被执行器调用。
//! 所有钩子默认空实现，具体行为只覆盖自己关心的操作；
//! `configure_options` 返回行为的内建默认选项，位于选项合并的最底层
//! （其上依次是行为配置默认值与资源级覆盖）。
//!
use resource_domain::metadata::ClassMetadata;
use resource_domain::options::Options;
use resource_domain::resource::Resource;

/// 行为接口：资源生命周期副作用处理器
pub trait Behavior: Send + Sync {
    /// 行为名称（注册与错误包装使用）
    fn name(&self) -> &str;

    /// 行为内建默认选项
    fn configure_options(&self) -> Options {
        Options::new()
    }

    fn on_insert(&self, resource: &dyn Resource, options: &Options) -> anyhow::Result<()> {
        let _ = (resource, options);
        Ok(())
    }

    fn on_update(&self, resource: &dyn Resource, options: &Options) -> anyhow::Result<()> {
        let _ = (resource, options);
        Ok(())
    }

    fn on_delete(&self, resource: &dyn Resource, options: &Options) -> anyhow::Result<()> {
        let _ = (resource, options);
        Ok(())
    }

    fn on_load(&self, resource: &dyn Resource, options: &Options) -> anyhow::Result<()> {
        let _ = (resource, options);
        Ok(())
    }

    /// ORM 引导期的映射钩子：每个类只调用一次
    fn on_metadata(&self, metadata: &mut ClassMetadata, options: &Options) -> anyhow::Result<()> {
        let _ = (metadata, options);
        Ok(())
    }
}

impl std::fmt::Debug for dyn Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Behavior").field("name", &self.name()).finish()
    }
}
