//! 行为注册表（BehaviorRegistry）
//!
//! 行为名 → 活实例的服务定位，带别名间接层：配置引用稳定短名，
//! 底层服务标识可经别名改动而不影响既有配置。
//!
use crate::behavior::Behavior;
use crate::error::AppError;
use dashmap::DashMap;
use std::sync::Arc;

/// 基于内存的行为服务定位器
/// - 以行为名注册活实例
/// - 别名在查找时做一次替换，错误诊断始终报告原始名称
#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: DashMap<String, Arc<dyn Behavior>>,
    aliases: DashMap<String, String>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册行为实例；同名重复注册报错
    pub fn register(&self, behavior: Arc<dyn Behavior>) -> Result<(), AppError> {
        let name = behavior.name().to_string();
        if self.behaviors.contains_key(&name) {
            return Err(AppError::AlreadyRegisteredBehavior { behavior: name });
        }
        self.behaviors.insert(name, behavior);
        Ok(())
    }

    /// 注册别名：`alias` 解析为 `target`
    pub fn register_alias(&self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    // 别名替换（单层）
    fn resolve(&self, name: &str) -> String {
        self.aliases
            .get(name)
            .map(|target| target.clone())
            .unwrap_or_else(|| name.to_string())
    }

    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.contains_key(&self.resolve(name))
    }

    /// 取活实例；缺失时报错并携带原始（未别名化的）名称
    pub fn get_behavior(&self, name: &str) -> Result<Arc<dyn Behavior>, AppError> {
        self.behaviors
            .get(&self.resolve(name))
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::BehaviorNotFound(name.to_string()))
    }
}
