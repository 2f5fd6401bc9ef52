//! Property-based tests for dispatch.
//!
//! - Keys without a handler never touch the host
//! - An alias chain behaves exactly like its canonical action
//! - Comma-joined key strings and key lists are interchangeable payloads
//! - Processing specs one by one equals processing them as a sequence

use confmap::{Config, HOST_ACTIONS};
use confmap_host::{EventLog, MemoryHost};
use confmap_types::{ConfigSpec, ConfigValue, WILDCARD};
use proptest::prelude::*;
use std::sync::Arc;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap()
}

fn unknown_action_strategy() -> impl Strategy<Value = String> {
    key_strategy().prop_filter("must not be a built-in action", |name| {
        name != "show" && !HOST_ACTIONS.contains(&name.as_str())
    })
}

fn scalar_strategy() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::from),
        key_strategy().prop_map(ConfigValue::String),
    ]
}

fn entries_strategy() -> impl Strategy<Value = ConfigSpec> {
    prop::collection::vec((key_strategy(), scalar_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn setup() -> (Arc<MemoryHost>, Config) {
    let host = Arc::new(MemoryHost::new());
    let config = confmap::install(host.clone()).unwrap();
    (host, config)
}

fn single(name: &str, value: ConfigValue) -> ConfigSpec {
    let mut spec = ConfigSpec::new();
    spec.insert(name.to_string(), value);
    spec
}

// =============================================================================
// DISPATCH PROPERTIES
// =============================================================================

proptest! {
    /// Unknown keys are ignored: no state change, no events.
    #[test]
    fn unknown_keys_are_inert(
        actions in prop::collection::vec((unknown_action_strategy(), scalar_strategy()), 1..6),
    ) {
        let (host, config) = setup();
        let mut channels: Vec<&str> = HOST_ACTIONS.to_vec();
        channels.push(WILDCARD);
        let log = EventLog::attach(host.as_ref(), &channels);

        let spec: ConfigSpec = actions.into_iter().collect();
        prop_assert!(config.process(&spec).is_ok());
        prop_assert!(host.snapshot().is_empty());
        prop_assert!(log.is_empty());
    }

    /// Dispatching through an alias chain ending in `set` matches `set`.
    #[test]
    fn alias_chain_is_transparent(depth in 1usize..6, entries in entries_strategy()) {
        let (direct_host, direct) = setup();
        let (aliased_host, aliased) = setup();

        let mut previous = "set".to_string();
        for step in 0..depth {
            let name = format!("alias_{step}");
            aliased.alias(&name, &previous);
            previous = name;
        }

        let payload = ConfigValue::Object(entries);
        direct.dispatch("set", &payload).unwrap();
        aliased.dispatch(&previous, &payload).unwrap();

        prop_assert_eq!(direct_host.snapshot(), aliased_host.snapshot());
        prop_assert_eq!(aliased.config().resolve(&previous).unwrap(), "set");
    }

    /// `get` and `has` report the same events for `"a,b"` and `["a", "b"]`.
    #[test]
    fn comma_string_and_list_are_equivalent(
        present in prop::collection::vec(key_strategy(), 0..4),
        queried in prop::collection::vec(key_strategy(), 1..6),
        action in prop_oneof![Just("get"), Just("has")],
    ) {
        let (joined_host, joined) = setup();
        let (listed_host, listed) = setup();
        let seed: ConfigSpec = present
            .iter()
            .map(|key| (key.clone(), ConfigValue::Bool(true)))
            .collect();
        for config in [&joined, &listed] {
            config.dispatch("set", &ConfigValue::Object(seed.clone())).unwrap();
        }

        let joined_log = EventLog::attach(joined_host.as_ref(), &[action]);
        let listed_log = EventLog::attach(listed_host.as_ref(), &[action]);
        joined.process(&single(action, ConfigValue::String(queried.join(",")))).unwrap();
        listed
            .process(&single(
                action,
                ConfigValue::Array(queried.iter().cloned().map(ConfigValue::String).collect()),
            ))
            .unwrap();

        prop_assert_eq!(joined_log.records(), listed_log.records());
        prop_assert_eq!(joined_log.len(), queried.len());
    }

    /// `process_all` is the same as processing each spec in turn.
    #[test]
    fn process_all_is_sequential(specs in prop::collection::vec(entries_strategy(), 0..5)) {
        let (batch_host, batch) = setup();
        let (stepwise_host, stepwise) = setup();
        let specs: Vec<ConfigSpec> = specs
            .into_iter()
            .map(|entries| single("set", ConfigValue::Object(entries)))
            .collect();

        batch.process_all(&specs).unwrap();
        for spec in &specs {
            stepwise.process(spec).unwrap();
        }

        prop_assert_eq!(batch_host.snapshot(), stepwise_host.snapshot());
    }
}
