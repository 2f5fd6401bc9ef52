use confmap::{Config, ConfigError, ConfigPlugin, InstallOptions, PluginRegistry};
use confmap_host::{EventLog, FnPlugin, Host, HostPlugin, MemoryHost, Target};
use confmap_types::{ConfigSpec, ConfigValue};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

fn setup() -> (Arc<MemoryHost>, Config) {
    let host = Arc::new(MemoryHost::with_store("confmap-tests"));
    let config = confmap::install(host.clone()).expect("install should succeed");
    (host, config)
}

fn spec(value: ConfigValue) -> ConfigSpec {
    match value {
        ConfigValue::Object(map) => map,
        other => panic!("not a spec: {other}"),
    }
}

fn marker_plugin(name: &str) -> Arc<dyn HostPlugin> {
    let key = format!("plugin.{name}");
    Arc::new(FnPlugin::new(name, move |host: &dyn Host| {
        host.set(&key, json!(true));
        Ok(())
    }))
}

fn fixture_plugins() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for name in ["a", "b", "c"] {
        registry.register_path(format!("test/fixtures/plugins/{name}"), marker_plugin(name));
    }
    registry
}

// ============================================================================
// Key/value actions
// ============================================================================

#[test]
fn set_with_key_list_sets_null() {
    let (host, config) = setup();

    config.process(&spec(json!({"set": "a,b"}))).unwrap();

    assert_eq!(host.get("a"), Some(ConfigValue::Null));
    assert_eq!(host.get("b"), Some(ConfigValue::Null));
}

#[test]
fn has_reports_each_key() {
    let (host, config) = setup();
    let log = EventLog::attach(host.as_ref(), &["has"]);

    config
        .process(&spec(json!({"set": {"a": 1}, "has": "a, b"})))
        .unwrap();

    let args: Vec<Vec<ConfigValue>> = log.named("has").into_iter().map(|r| r.args).collect();
    assert_eq!(
        args,
        vec![vec![json!("a"), json!(true)], vec![json!("b"), json!(false)]]
    );
}

#[test]
fn get_of_missing_key_reports_null() {
    let (host, config) = setup();
    let log = EventLog::attach(host.as_ref(), &["get"]);

    config.process(&spec(json!({"get": ["missing"]}))).unwrap();

    assert_eq!(log.named("get")[0].args, vec![json!("missing"), ConfigValue::Null]);
}

#[test]
fn del_accepts_a_truthy_map() {
    let (host, config) = setup();

    config
        .process(&spec(json!({"set": {"a": 1, "b": 2, "c": 3}})))
        .unwrap();
    config
        .process(&spec(json!({"del": {"a": true, "b": false}})))
        .unwrap();

    assert!(!host.has("a"));
    assert!(host.has("b"));
    assert!(host.has("c"));
}

// ============================================================================
// Host-only actions
// ============================================================================

#[test]
fn option_map_and_key_list() {
    let (host, config) = setup();
    let log = EventLog::attach(host.as_ref(), &["option", "set"]);

    config
        .process(&spec(json!({"option": {"layout": "default"}})))
        .unwrap();
    config.process(&spec(json!({"option": "verbose"}))).unwrap();

    assert_eq!(host.get_option("layout"), Some(json!("default")));
    assert_eq!(host.get_option("verbose"), Some(json!(true)));
    assert_eq!(log.named("option").len(), 2);
    assert!(log.named("set").is_empty());
}

#[test]
fn enable_and_disable() {
    let (host, config) = setup();

    config.process(&spec(json!({"enable": "a,b"}))).unwrap();
    config.process(&spec(json!({"disable": ["b"]}))).unwrap();

    assert_eq!(host.get_option("a"), Some(json!(true)));
    assert_eq!(host.get_option("b"), Some(json!(false)));
}

#[test]
fn define_requires_an_object() {
    let (host, config) = setup();
    let log = EventLog::attach(host.as_ref(), &["define"]);

    config.process(&spec(json!({"define": {"version": "1.0"}}))).unwrap();
    assert_eq!(host.get("version"), Some(json!("1.0")));
    assert_eq!(log.named("define")[0].args, vec![json!("version"), json!("1.0")]);

    let err = config.process(&spec(json!({"define": "version"}))).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidPayload { ref action, expected: "an object", found: "string" } if action == "define"
    ));
}

#[test]
fn data_is_forwarded() {
    let (host, config) = setup();
    let log = EventLog::attach(host.as_ref(), &["data"]);

    config
        .process(&spec(json!({"data": {"title": "Home"}})))
        .unwrap();

    assert_eq!(host.get("data.title"), Some(json!("Home")));
    assert_eq!(log.named("data")[0].args, vec![json!({"title": "Home"})]);
}

#[test]
fn cwd_sets_the_option() {
    let (host, config) = setup();

    config.process(&spec(json!({"cwd": "fixtures"}))).unwrap();

    assert_eq!(host.get_option("cwd"), Some(json!("fixtures")));
    assert_eq!(host.cwd(), Some(PathBuf::from("fixtures")));
}

#[test]
fn cwd_expands_home() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let (host, config) = setup();

    config.process(&spec(json!({"cwd": "~/projects"}))).unwrap();

    assert_eq!(host.cwd(), Some(home.join("projects")));
}

#[test]
fn cwd_rejects_non_strings() {
    let (_host, config) = setup();

    let err = config.process(&spec(json!({"cwd": 5}))).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPayload { found: "number", .. }));
}

#[test]
fn mapped_name_without_builtin_forwards_to_host_method() {
    let (_host, config) = setup();

    config.map("render");
    let err = config.process(&spec(json!({"render": "page"}))).unwrap_err();

    match err {
        ConfigError::Handler { action, source } => {
            assert_eq!(action, "render");
            assert!(source.to_string().contains("render"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Plugins
// ============================================================================

#[test]
fn use_loads_plugins_relative_to_cwd_in_order() {
    let host = Arc::new(MemoryHost::new());
    let config = ConfigPlugin::default()
        .with_plugins(fixture_plugins())
        .install(host.clone())
        .unwrap();
    let log = EventLog::attach(host.as_ref(), &["use"]);

    config
        .process(&spec(json!({"cwd": "test/fixtures/plugins", "use": "a,b,c"})))
        .unwrap();

    let ids: Vec<ConfigValue> = log.named("use").into_iter().flat_map(|r| r.args).collect();
    assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);
    assert_eq!(host.plugins(), vec!["a", "b", "c"]);
    assert_eq!(host.get("plugin.b"), Some(json!(true)));
}

#[test]
fn use_accepts_registered_identifiers() {
    let host = Arc::new(MemoryHost::new());
    let mut plugins = PluginRegistry::new();
    plugins.register_fn("confmap-extra", |host| {
        host.set("extra", json!(1));
        Ok(())
    });
    let config = ConfigPlugin::new(InstallOptions::new())
        .with_plugins(plugins)
        .install(host.clone())
        .unwrap();

    config.process(&spec(json!({"use": ["confmap-extra"]}))).unwrap();

    assert_eq!(host.get("extra"), Some(json!(1)));
}

#[test]
fn use_of_unknown_plugin_lists_every_attempt() {
    let host = Arc::new(MemoryHost::new());
    let config = ConfigPlugin::default()
        .with_plugins(fixture_plugins())
        .install(host.clone())
        .unwrap();
    let log = EventLog::attach(host.as_ref(), &["use"]);

    let err = config
        .process(&spec(json!({"cwd": "test/fixtures/plugins", "use": "a,missing,c"})))
        .unwrap_err();

    match &err {
        ConfigError::PluginNotFound { attempts } => {
            assert_eq!(attempts.len(), 3);
            assert_eq!(attempts[0], "missing");
            assert!(attempts[2].ends_with("test/fixtures/plugins/missing"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("cannot find plugin at: \n ✖ 'missing'\n"));
    assert_eq!(log.named("use").len(), 1);
    assert_eq!(host.plugins(), vec!["a"]);
}

#[test]
fn failing_plugin_aborts_use() {
    let host = Arc::new(MemoryHost::new());
    let mut plugins = PluginRegistry::new();
    plugins.register_fn("broken", |_| anyhow::bail!("plugin refused"));
    let config = ConfigPlugin::default()
        .with_plugins(plugins)
        .install(host.clone())
        .unwrap();

    let err = config.process(&spec(json!({"use": "broken"}))).unwrap_err();

    assert!(matches!(err, ConfigError::Handler { ref action, .. } if action == "use"));
    assert!(host.plugins().is_empty());
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn store_facade_writes_to_the_store() {
    let (host, config) = setup();
    let store = host.memory_store().unwrap();

    config
        .store()
        .unwrap()
        .process(&spec(json!({"set": {"theme": "dark"}})))
        .unwrap();

    assert_eq!(store.get("theme"), Some(json!("dark")));
    assert_eq!(host.get("theme"), None);
}

#[test]
fn store_action_on_host_delegates_to_store() {
    let (host, config) = setup();
    let store = host.memory_store().unwrap();
    let log = EventLog::attach(store.as_ref(), &["has_own", "get"]);

    config
        .process(&spec(json!({"store": {"set": {"a": 1}, "has_own": "a,b", "show": "a"}})))
        .unwrap();

    assert_eq!(store.get("a"), Some(json!(1)));
    assert_eq!(log.named("has_own")[1].args, vec![json!("b"), json!(false)]);
    assert_eq!(log.named("get")[0].args, vec![json!("a"), json!(1)]);
}

#[test]
fn store_del_with_force_clears_everything() {
    let (host, config) = setup();
    let store = host.memory_store().unwrap();
    let store_config = config.store().unwrap();

    store_config
        .process(&spec(json!({"set": {"a": 1, "b": 2}})))
        .unwrap();
    store_config.process(&spec(json!({"del": "a"}))).unwrap();
    assert_eq!(store.snapshot().len(), 1);

    store_config
        .process(&spec(json!({"del": {"force": true}})))
        .unwrap();
    assert!(store.snapshot().is_empty());
}

#[test]
fn store_rejects_non_object_payload() {
    let (_host, config) = setup();

    let err = config.process(&spec(json!({"store": "a"}))).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPayload { ref action, .. } if action == "store"));
}

#[test]
fn host_without_store_ignores_store_action() {
    let host = Arc::new(MemoryHost::new());
    let config = confmap::install(host.clone()).unwrap();

    assert!(config.store().is_none());
    config
        .process(&spec(json!({"store": {"set": {"a": 1}}})))
        .unwrap();
    assert_eq!(host.get("a"), None);
}
