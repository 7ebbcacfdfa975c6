use resource_application::BehaviorExecutor;
use resource_application::behavior::Behavior;
use resource_application::behavior_registry::BehaviorRegistry;
use resource_domain::config::{
    BehaviorConfig, BehaviorConfigRegistry, BehaviorDecl, ResourceConfig, ResourceRegistry,
};
use resource_domain::metadata::{ClassMetadata, FieldMapping};
use resource_domain::operation::Operation;
use resource_domain::options::Options;
use resource_domain::resource::Resource;
use serde_json::json;
use std::any::Any;
use std::sync::Arc;

#[derive(Debug)]
struct Product {
    title: String,
}

impl Resource for Product {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn class(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// 时间戳行为：insert/update 时打印，metadata 阶段追加列映射
struct Timestampable;

impl Behavior for Timestampable {
    fn name(&self) -> &str {
        "timestampable"
    }

    fn configure_options(&self) -> Options {
        json!({"created_field": "created_at", "updated_field": "updated_at"})
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    fn on_insert(&self, resource: &dyn Resource, options: &Options) -> anyhow::Result<()> {
        println!(
            "timestampable.on_insert: class={} options={}",
            resource.class(),
            serde_json::Value::Object(options.clone())
        );
        Ok(())
    }

    fn on_update(&self, resource: &dyn Resource, options: &Options) -> anyhow::Result<()> {
        println!(
            "timestampable.on_update: class={} options={}",
            resource.class(),
            serde_json::Value::Object(options.clone())
        );
        Ok(())
    }

    fn on_metadata(&self, metadata: &mut ClassMetadata, options: &Options) -> anyhow::Result<()> {
        for key in ["created_field", "updated_field"] {
            if let Some(field) = options.get(key).and_then(|v| v.as_str()) {
                metadata.map_field(field, FieldMapping::builder().kind("datetime").build());
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 引导期：配置注册表 + 行为服务注册表
    let resources = Arc::new(
        ResourceRegistry::builder()
            .register::<Product>(
                ResourceConfig::builder()
                    .namespace("shop")
                    .name("product")
                    .behaviors(vec![BehaviorDecl::new(
                        "timestampable",
                        json!({"updated_field": "touched_at"})
                            .as_object()
                            .cloned()
                            .unwrap_or_default(),
                    )])
                    .build(),
            )
            .build(),
    );
    let behavior_configs = Arc::new(BehaviorConfigRegistry::new(vec![
        BehaviorConfig::builder()
            .name("timestampable")
            .operations(vec![Operation::Insert, Operation::Update, Operation::Metadata])
            .build(),
    ]));
    let behaviors = BehaviorRegistry::new();
    behaviors.register(Arc::new(Timestampable))?;

    let executor = BehaviorExecutor::new(resources, behavior_configs, Arc::new(behaviors));

    // ORM 引导期：metadata 阶段按类型名执行一次
    let mut metadata = ClassMetadata::of::<Product>();
    executor.metadata(&mut metadata)?;
    println!(
        "metadata 映射字段: {:?}",
        metadata.fields().map(|(name, _)| name.clone()).collect::<Vec<_>>()
    );

    // flush 期间：每个变更资源各执行一次
    let product = Product {
        title: "奶酪".to_string(),
    };
    println!("资源: title={}", product.title);
    executor.execute(&product, Operation::Insert)?;
    executor.execute(&product, Operation::Update)?;

    // delete 未被声明支持 -> 行为被过滤，静默通过
    executor.execute(&product, Operation::Delete)?;
    println!("✅ delete 被操作过滤跳过");
    Ok(())
}
