//! 资源事件分发器（ResourceEventDispatcher）
//!
//! 同步的发布/订阅分发器：
//! - 依据资源注册表构造事件对象并计算事件名（翻译实体带 `_translation` 中缀）；
//! - 将事件按名扇出给订阅的监听器，顺序执行；
//! - 监听器可终止传播；监听器错误包装为 `ResourceError::EventListener` 上抛。
//!
use crate::config::ResourceRegistry;
use crate::error::{ResourceError, ResourceResult};
use crate::event::ResourceEvent;
use crate::eventing::listener::{EventListener, ListenedEvents};
use crate::resource::Resource;
use bon::Builder;
use std::collections::HashMap;
use std::sync::Arc;

// 导入由 bon::Builder 生成的 typestate 模块与状态转换别名
use self::resource_event_dispatcher_builder::{IsUnset, SetRegistry, State as BuilderState};

/// ResourceEventDispatcher：
/// - 持有只读资源注册表与监听器注册表
/// - `dispatch` 为同步顺序扇出，运行至完成后返回
#[derive(Builder)]
pub struct ResourceEventDispatcher {
    resources: Arc<ResourceRegistry>,
    #[builder(setters(vis = "pub(crate)"))]
    registry: ListenerRegistry,
}

impl<S: BuilderState> ResourceEventDispatcherBuilder<S> {
    pub fn event_listeners(
        self,
        listeners: Vec<Arc<dyn EventListener>>,
    ) -> ResourceEventDispatcherBuilder<SetRegistry<S>>
    where
        <S as BuilderState>::Registry: IsUnset,
    {
        self.registry(ListenerRegistry::new(listeners))
    }
}

impl ResourceEventDispatcher {
    pub fn resources(&self) -> &Arc<ResourceRegistry> {
        &self.resources
    }

    /// 为资源构造事件对象
    ///
    /// 未注册类型：`strict` 时报错，否则返回 `None`（静默跳过）。
    pub fn create_resource_event(
        &self,
        resource: &Arc<dyn Resource>,
        strict: bool,
    ) -> ResourceResult<Option<ResourceEvent>> {
        match self.resources.find_for(resource.as_ref()) {
            Some(_) => Ok(Some(ResourceEvent::new(resource.clone()))),
            None if strict => Err(ResourceError::ResourceNotRegistered {
                class: resource.class().to_string(),
            }),
            None => Ok(None),
        }
    }

    /// 计算资源在给定后缀下的事件名；翻译行得到 `_translation` 中缀
    pub fn resource_event_name(&self, resource: &dyn Resource, suffix: &str) -> Option<String> {
        if let Some(config) = self.resources.find(resource) {
            Some(config.event_name(suffix))
        } else {
            self.resources
                .find_by_translation(resource)
                .map(|config| config.translation_event_name(suffix))
        }
    }

    /// 同步分发：按订阅匹配的监听器顺序执行
    pub fn dispatch(&self, event_name: &str, event: &mut ResourceEvent) -> ResourceResult<()> {
        for listener in self.registry.matching(event_name) {
            if event.is_propagation_stopped() {
                break;
            }
            listener.on_event(event_name, event).map_err(|err| {
                ResourceError::EventListener {
                    listener: listener.listener_name().to_string(),
                    reason: err.to_string(),
                }
            })?;
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
struct ListenerRegistry {
    by_name: HashMap<String, Vec<Arc<dyn EventListener>>>,
    all: Vec<Arc<dyn EventListener>>,
}

impl ListenerRegistry {
    fn new(listeners: Vec<Arc<dyn EventListener>>) -> Self {
        let mut by_name: HashMap<String, Vec<Arc<dyn EventListener>>> = HashMap::new();
        let mut all: Vec<Arc<dyn EventListener>> = Vec::new();

        for listener in listeners {
            match listener.listened_events() {
                ListenedEvents::All => all.push(listener),
                ListenedEvents::One(name) => {
                    by_name.entry(name).or_default().push(listener);
                }
                ListenedEvents::Many(names) => {
                    for name in names {
                        by_name.entry(name).or_default().push(listener.clone());
                    }
                }
            }
        }

        Self { by_name, all }
    }

    fn matching(&self, event_name: &str) -> Vec<Arc<dyn EventListener>> {
        let mut merged: Vec<Arc<dyn EventListener>> = Vec::new();
        if let Some(list) = self.by_name.get(event_name) {
            merged.extend(list.iter().cloned());
        }
        merged.extend(self.all.iter().cloned());
        merged
    }
}
