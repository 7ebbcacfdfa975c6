/// 持久化事件队列示例
/// 展示 调度（insert/update/delete）-> 冲突检测 -> 优先级排序派发 -> 状态清理 的闭环
use anyhow::Result as AnyResult;
use resource_domain::change_set::FieldChanged;
use resource_domain::config::{ResourceConfig, ResourceRegistry};
use resource_domain::event::ResourceEvent;
use resource_domain::eventing::{
    ChangeTracker, EventListener, InMemoryChangeTracker, ListenedEvents, PersistenceEventQueue,
    ResourceEventDispatcher,
};
use resource_domain::resource::Resource;
use serde_json::json;
use std::any::Any;
use std::sync::Arc;

// ============================================================================
// 示例资源
// ============================================================================

#[derive(Debug)]
struct Product {
    id: String,
}

#[derive(Debug)]
struct Order {
    id: String,
}

impl Resource for Product {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn class(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl Resource for Order {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn class(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ============================================================================
// 示例监听器
// ============================================================================

struct PrintListener {
    tracker: Arc<InMemoryChangeTracker>,
}

impl EventListener for PrintListener {
    fn listener_name(&self) -> &str {
        "printer"
    }

    fn listened_events(&self) -> ListenedEvents {
        ListenedEvents::All
    }

    fn on_event(&self, event_name: &str, event: &mut ResourceEvent) -> AnyResult<()> {
        match self.tracker.change_set(event.resource()) {
            Some(change_set) => {
                for (field, change) in change_set.iter() {
                    println!(
                        "listener=printer event={event_name} field={field} {} -> {}",
                        change.old_value(),
                        change.new_value()
                    );
                }
            }
            None => println!("listener=printer event={event_name}"),
        }
        Ok(())
    }
}

fn main() -> AnyResult<()> {
    println!("=== 持久化事件队列示例 ===\n");

    // 引导期：只读注册表
    let registry = Arc::new(
        ResourceRegistry::builder()
            .register::<Product>(
                ResourceConfig::builder().namespace("shop").name("product").build(),
            )
            .register::<Order>(ResourceConfig::builder().namespace("shop").name("order").build())
            .build(),
    );

    let tracker = Arc::new(InMemoryChangeTracker::new());
    let dispatcher = Arc::new(
        ResourceEventDispatcher::builder()
            .resources(registry)
            .event_listeners(vec![Arc::new(PrintListener {
                tracker: tracker.clone(),
            })])
            .build(),
    );

    // 每个 flush 周期一个队列实例
    let mut queue = PersistenceEventQueue::new(dispatcher, tracker.clone());

    let existing = Arc::new(Product {
        id: "p-1".to_string(),
    });
    let fresh = Arc::new(Order {
        id: "o-1".to_string(),
    });
    let doomed = Arc::new(Product {
        id: "p-2".to_string(),
    });
    println!(
        "资源: existing={}, fresh={}, doomed={}",
        existing.id, fresh.id, doomed.id
    );
    let existing: Arc<dyn Resource> = existing;
    let fresh: Arc<dyn Resource> = fresh;
    let doomed: Arc<dyn Resource> = doomed;

    tracker.record_change(
        &existing,
        "title",
        FieldChanged::new(json!("旧标题"), json!("新标题")),
    );

    // 调度顺序故意与派发顺序相反
    queue.schedule_delete(&doomed)?;
    queue.schedule_insert(&fresh)?;
    queue.schedule_update(&existing)?;
    println!("✅ 已调度 {} 个事件（delete, insert, update 顺序）", queue.len());

    // 冲突检测：同一实例不能再调度另一种持久化操作
    if let Err(err) = queue.schedule_delete(&existing) {
        println!("✅ 冲突被拒绝: {err}");
    }

    println!("\n--- flush：按 update > insert > delete 派发 ---");
    queue.flush()?;

    println!("\n✅ flush 完成: pending={}, opened={}", queue.len(), queue.is_opened());
    println!(
        "✅ 追踪器已清空: change_set={:?}",
        tracker.change_set(&existing).map(|cs| cs.len())
    );
    Ok(())
}
