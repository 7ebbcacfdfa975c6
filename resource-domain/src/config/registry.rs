//! 配置注册表
//!
//! `ResourceRegistry`：实体类型/翻译实体类型/资源名/类型名 → 资源配置；
//! `BehaviorConfigRegistry`：行为名 → 行为配置。
//!
//! 两者均在引导期经构建器装配并冻结，此后只读，可被多个请求作用域的
//! 队列并发读取。PHP 侧以类名字符串声明的实体/翻译实体关联，在这里
//! 表现为 `register::<T>` / `register_translation::<T>` 的类型绑定。
//!
use crate::config::{BehaviorConfig, ResourceConfig};
use crate::error::{ResourceError, ResourceResult};
use crate::resource::Resource;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// 资源配置注册表构建器
#[derive(Default)]
pub struct ResourceRegistryBuilder {
    by_type: HashMap<TypeId, Arc<ResourceConfig>>,
    by_translation: HashMap<TypeId, Arc<ResourceConfig>>,
    by_name: HashMap<String, Arc<ResourceConfig>>,
    by_class: HashMap<String, Arc<ResourceConfig>>,
}

impl ResourceRegistryBuilder {
    /// 注册一个资源，并将 `T` 绑定为其实体类型
    pub fn register<T: Resource>(mut self, config: ResourceConfig) -> Self {
        let config = Arc::new(config);
        self.by_type.insert(TypeId::of::<T>(), config.clone());
        self.by_name.insert(config.name().to_string(), config.clone());
        self.by_class
            .insert(std::any::type_name::<T>().to_string(), config);
        self
    }

    /// 将 `T` 绑定为某个已注册资源的翻译实体类型
    ///
    /// 翻译行实例由此映射回其所属资源的配置，而不是被当作独立资源类型。
    pub fn register_translation<T: Resource>(mut self, resource_name: &str) -> Self {
        if let Some(config) = self.by_name.get(resource_name) {
            let config = config.clone();
            self.by_translation.insert(TypeId::of::<T>(), config.clone());
            self.by_class
                .insert(std::any::type_name::<T>().to_string(), config);
        }
        self
    }

    pub fn build(self) -> ResourceRegistry {
        ResourceRegistry {
            by_type: self.by_type,
            by_translation: self.by_translation,
            by_name: self.by_name,
            by_class: self.by_class,
        }
    }
}

/// 只读的资源配置注册表
pub struct ResourceRegistry {
    by_type: HashMap<TypeId, Arc<ResourceConfig>>,
    by_translation: HashMap<TypeId, Arc<ResourceConfig>>,
    by_name: HashMap<String, Arc<ResourceConfig>>,
    by_class: HashMap<String, Arc<ResourceConfig>>,
}

impl ResourceRegistry {
    pub fn builder() -> ResourceRegistryBuilder {
        ResourceRegistryBuilder::default()
    }

    /// 按实体类型检索配置
    pub fn find(&self, resource: &dyn Resource) -> Option<Arc<ResourceConfig>> {
        self.by_type.get(&resource.as_any().type_id()).cloned()
    }

    /// 按翻译实体类型检索所属资源的配置
    pub fn find_by_translation(&self, resource: &dyn Resource) -> Option<Arc<ResourceConfig>> {
        self.by_translation
            .get(&resource.as_any().type_id())
            .cloned()
    }

    /// 先按实体类型、再按翻译实体类型检索
    pub fn find_for(&self, resource: &dyn Resource) -> Option<Arc<ResourceConfig>> {
        self.find(resource)
            .or_else(|| self.find_by_translation(resource))
    }

    /// 给定实例是否为某资源的翻译行
    pub fn is_translation(&self, resource: &dyn Resource) -> bool {
        self.by_translation
            .contains_key(&resource.as_any().type_id())
    }

    pub fn find_by_name(&self, name: &str) -> Option<Arc<ResourceConfig>> {
        self.by_name.get(name).cloned()
    }

    /// 按完整类型名检索（ORM 元数据阶段使用）
    pub fn find_by_class(&self, class: &str) -> Option<Arc<ResourceConfig>> {
        self.by_class.get(class).cloned()
    }

    /// 严格检索：未注册类型返回错误
    pub fn get(&self, resource: &dyn Resource) -> ResourceResult<Arc<ResourceConfig>> {
        self.find_for(resource)
            .ok_or_else(|| ResourceError::ResourceNotRegistered {
                class: resource.class().to_string(),
            })
    }

    /// 严格按名检索：缺失返回错误
    pub fn get_by_name(&self, name: &str) -> ResourceResult<Arc<ResourceConfig>> {
        self.find_by_name(name)
            .ok_or_else(|| ResourceError::ResourceConfigNotFound {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// 只读的行为配置注册表
#[derive(Default)]
pub struct BehaviorConfigRegistry {
    by_name: HashMap<String, Arc<BehaviorConfig>>,
}

impl BehaviorConfigRegistry {
    pub fn new(configs: Vec<BehaviorConfig>) -> Self {
        let mut by_name = HashMap::new();
        for config in configs {
            by_name.insert(config.name().to_string(), Arc::new(config));
        }
        Self { by_name }
    }

    pub fn find(&self, name: &str) -> Option<Arc<BehaviorConfig>> {
        self.by_name.get(name).cloned()
    }

    /// 严格检索：缺失的行为配置属于部署缺陷
    pub fn get(&self, name: &str) -> ResourceResult<Arc<BehaviorConfig>> {
        self.find(name)
            .ok_or_else(|| ResourceError::ResourceConfigNotFound {
                name: name.to_string(),
            })
    }
}
