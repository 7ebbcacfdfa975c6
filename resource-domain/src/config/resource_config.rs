//! 资源配置（ResourceConfig）
//!
//! 对一个资源的不可变描述：标识（namespace + name）、关联服务类、声明的
//! 动作/行为/权限、以及事件命名规则。实体与翻译实体的*类型*绑定不在此处，
//! 由 `ResourceRegistry` 的注册接口承担。
//!
use crate::options::Options;
use bon::Builder;

/// 声明在资源上的一个动作（name → options）
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDecl {
    name: String,
    options: Options,
}

impl ActionDecl {
    pub fn new(name: impl Into<String>, options: Options) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// 声明在资源上的一个行为（name → 资源级选项覆盖）
///
/// 声明顺序即执行顺序。
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorDecl {
    name: String,
    options: Options,
}

impl BehaviorDecl {
    pub fn new(name: impl Into<String>, options: Options) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// 资源的不可变配置
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct ResourceConfig {
    #[builder(into)]
    namespace: String,
    #[builder(into)]
    name: String,
    #[builder(into)]
    repository: Option<String>,
    #[builder(into)]
    factory: Option<String>,
    #[builder(into)]
    manager: Option<String>,
    /// 父资源名（嵌套/子资源场景）
    #[builder(into)]
    parent: Option<String>,
    #[builder(default)]
    actions: Vec<ActionDecl>,
    #[builder(default)]
    behaviors: Vec<BehaviorDecl>,
    #[builder(default)]
    permissions: Vec<String>,
}

impl ResourceConfig {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn factory(&self) -> Option<&str> {
        self.factory.as_deref()
    }

    pub fn manager(&self) -> Option<&str> {
        self.manager.as_deref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn actions(&self) -> &[ActionDecl] {
        &self.actions
    }

    pub fn behaviors(&self) -> &[BehaviorDecl] {
        &self.behaviors
    }

    /// 按名称取资源级行为选项覆盖
    pub fn behavior(&self, name: &str) -> Option<&Options> {
        self.behaviors
            .iter()
            .find(|decl| decl.name() == name)
            .map(BehaviorDecl::options)
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// 事件名：`{namespace}.{name}.{suffix}`
    pub fn event_name(&self, suffix: &str) -> String {
        format!("{}.{}.{}", self.namespace, self.name, suffix)
    }

    /// 翻译实体的事件名：`{namespace}.{name}_translation.{suffix}`
    pub fn translation_event_name(&self, suffix: &str) -> String {
        format!("{}.{}_translation.{}", self.namespace, self.name, suffix)
    }
}
