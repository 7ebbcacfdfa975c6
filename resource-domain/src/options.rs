//! 行为选项树与递归合并
//!
//! 选项是有序的键值树（`serde_json::Map`）。合并规则：
//! - 嵌套对象按键递归合并；
//! - 标量叶子由覆盖方直接取代；
//! - 序列值整体替换，不做拼接或按下标合并。
//!
use serde_json::Value;

/// 行为/动作选项树
pub type Options = serde_json::Map<String, Value>;

/// 递归合并两棵选项树，`overrides` 中的值优先
pub fn merge_options(defaults: &Options, overrides: &Options) -> Options {
    let mut merged = defaults.clone();

    for (key, value) in overrides {
        match (merged.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                let combined = merge_options(existing, incoming);
                *existing = combined;
            }
            (Some(slot), _) => {
                *slot = value.clone();
            }
            (None, _) => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Options {
        value.as_object().cloned().expect("object literal")
    }

    // 深合并：叶子覆盖，未触及的分支保留
    #[test]
    fn deep_merge_overrides_leaf_and_keeps_untouched_branches() {
        let defaults = options(json!({"foo": "bar", "array": {"data": "datum"}}));
        let overrides = options(json!({"array": {"data": "Luke"}}));

        let merged = merge_options(&defaults, &overrides);

        assert_eq!(
            Value::Object(merged),
            json!({"foo": "bar", "array": {"data": "Luke"}})
        );
    }

    // 序列整体替换，不按下标合并
    #[test]
    fn sequences_are_replaced_wholesale() {
        let defaults = options(json!({"tags": ["c"], "nested": {"keep": true}}));
        let overrides = options(json!({"tags": ["a", "b"]}));

        let merged = merge_options(&defaults, &overrides);

        assert_eq!(
            Value::Object(merged),
            json!({"tags": ["a", "b"], "nested": {"keep": true}})
        );
    }

    // 标量可被对象取代，反之亦然（叶子类型冲突时覆盖方胜出）
    #[test]
    fn conflicting_leaf_types_take_override() {
        let defaults = options(json!({"limit": 10, "filter": {"on": true}}));
        let overrides = options(json!({"limit": {"max": 50}, "filter": false}));

        let merged = merge_options(&defaults, &overrides);

        assert_eq!(
            Value::Object(merged),
            json!({"limit": {"max": 50}, "filter": false})
        );
    }

    #[test]
    fn merge_with_empty_sides() {
        let defaults = options(json!({"a": 1}));
        let empty = Options::new();

        assert_eq!(merge_options(&defaults, &empty), defaults);
        assert_eq!(merge_options(&empty, &defaults), defaults);
    }

    // 多层嵌套逐级递归
    #[test]
    fn merge_recurses_over_multiple_levels() {
        let defaults = options(json!({"a": {"b": {"c": 1, "d": 2}}}));
        let overrides = options(json!({"a": {"b": {"d": 3}, "e": 4}}));

        let merged = merge_options(&defaults, &overrides);

        assert_eq!(
            Value::Object(merged),
            json!({"a": {"b": {"c": 1, "d": 3}, "e": 4}})
        );
    }
}
