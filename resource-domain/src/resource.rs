//! 资源（Resource）基础抽象
//!
//! 被配置系统追踪的领域实体统一以 `Arc<dyn Resource>` 在队列与执行器之间流转；
//! `ObjectIdentity` 提供与数据库主键无关的实例级标识（新建未落库的资源同样持有）。
//!
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 可被声明式配置追踪的资源抽象
///
/// 实现方通常直接返回 `std::any::type_name::<Self>()` 作为 `class`，
/// 注册表据此与类型绑定对齐。
pub trait Resource: Any + fmt::Debug + Send + Sync {
    /// 以 `Any` 形式暴露自身，供注册表按具体类型检索配置
    fn as_any(&self) -> &dyn Any;

    /// 资源的完整类型名（诊断与元数据检索使用）
    fn class(&self) -> &'static str;
}

/// 实例级稳定标识
///
/// 取自 `Arc` 分配地址：同一共享实例的所有克隆句柄得到同一标识，
/// 不依赖数据库分配的主键，因此对尚未持久化的资源同样成立。
/// 仅在持有该实例存活期间有效，不可跨进程或持久化使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectIdentity(usize);

impl ObjectIdentity {
    /// 计算资源实例的标识
    pub fn of(resource: &Arc<dyn Resource>) -> Self {
        Self(Arc::as_ptr(resource) as *const () as usize)
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Sample {
        #[allow(dead_code)]
        id: Option<u64>,
    }

    impl Resource for Sample {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn class(&self) -> &'static str {
            std::any::type_name::<Self>()
        }
    }

    // 同一实例的克隆句柄共享同一标识
    #[test]
    fn identity_is_stable_across_arc_clones() {
        let a: Arc<dyn Resource> = Arc::new(Sample { id: None });
        let b = a.clone();

        assert_eq!(ObjectIdentity::of(&a), ObjectIdentity::of(&b));
    }

    // 不同实例即使内容相同也有不同标识
    #[test]
    fn identity_distinguishes_instances() {
        let a: Arc<dyn Resource> = Arc::new(Sample { id: None });
        let b: Arc<dyn Resource> = Arc::new(Sample { id: None });

        assert_ne!(ObjectIdentity::of(&a), ObjectIdentity::of(&b));
    }
}
