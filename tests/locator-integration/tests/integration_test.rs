//! Centralized integration tests for the locator crates
//!
//! 覆盖跨分区的端到端场景: 工厂/单例/实例混合注册、
//! 释放与重新注册、类型键门面以及清理失败时的条目移除语义

use locator_abstractions::{
    Disposable, LocatorError, LocatorResult, ServiceLocator, StrategyKind,
};
use locator_impl::{ServiceLocatorImpl, TypedLocator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试实体
#[derive(Debug)]
struct Foo {
    name: String,
}

impl Foo {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 依赖 [`Foo`] 的测试实体
#[derive(Debug)]
struct Bar {
    foo: Arc<Foo>,
}

/// 带可变计数器的全局设置
#[derive(Debug, Default)]
struct GlobalSettings {
    counter: AtomicUsize,
}

impl GlobalSettings {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn counter(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

/// 清理总是失败的测试实体
#[derive(Debug)]
struct BrokenConnection;

impl Disposable for BrokenConnection {
    fn dispose(&self) -> LocatorResult<()> {
        Err(LocatorError::disposal_failed("连接关闭失败"))
    }
}

/// 记录清理次数的测试实体
#[derive(Debug)]
struct TrackedConnection {
    disposed: Arc<AtomicUsize>,
}

impl Disposable for TrackedConnection {
    fn dispose(&self) -> LocatorResult<()> {
        self.disposed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_end_to_end_locator_scenario() {
    let locator = Arc::new(ServiceLocatorImpl::<&str>::new());

    // 工厂: 每次解析产出带相同标签的新值
    locator.register_factory("foo", || Ok(Foo::new("FooInstance")));

    // 工厂可以通过定位器解析自己的依赖
    let inner = Arc::clone(&locator);
    locator.register_factory("bar", move || {
        let foo = inner.resolve::<Foo>(&"foo")?;
        Ok(Bar { foo })
    });

    // 单例: 保留带内部可变状态的值
    locator
        .register_singleton("global-settings", || Ok(GlobalSettings::default()))
        .unwrap();

    let first_foo = locator.resolve::<Foo>(&"foo").unwrap();
    let second_foo = locator.resolve::<Foo>(&"foo").unwrap();
    assert_eq!(first_foo.name, "FooInstance");
    assert_eq!(first_foo.name, second_foo.name);
    assert!(!Arc::ptr_eq(&first_foo, &second_foo));

    let bar = locator.resolve::<Bar>(&"bar").unwrap();
    assert_eq!(bar.foo.name, "FooInstance");

    // 两次解析得到同一个保留值，修改互相可见
    let settings = locator.resolve::<GlobalSettings>(&"global-settings").unwrap();
    settings.increment();
    settings.increment();
    let settings_again = locator.resolve::<GlobalSettings>(&"global-settings").unwrap();
    settings_again.increment();
    assert_eq!(settings.counter(), 3);

    // 释放后解析失败，即使同一标识符稍后可以重新注册
    locator.release(&"global-settings").unwrap();
    assert!(matches!(
        locator.resolve::<GlobalSettings>(&"global-settings"),
        Err(LocatorError::ServiceNotRegistered { .. })
    ));

    // 重新注册后状态回到初始值
    locator
        .register_singleton("global-settings", || Ok(GlobalSettings::default()))
        .unwrap();
    let fresh = locator.resolve::<GlobalSettings>(&"global-settings").unwrap();
    assert_eq!(fresh.counter(), 0);
}

#[test]
fn test_typed_locator_round_trip() {
    let locator = TypedLocator::new();

    locator.register_factory(|| Ok(Foo::new("FooInstance")));
    locator.register_instance(GlobalSettings::default());

    assert!(locator.is_registered::<Foo>());
    assert!(locator.is_registered::<GlobalSettings>());
    assert!(!locator.is_registered::<Bar>());

    let foo = locator.resolve::<Foo>().unwrap();
    assert_eq!(foo.name, "FooInstance");

    let settings = locator.resolve::<GlobalSettings>().unwrap();
    let settings_again = locator.resolve::<GlobalSettings>().unwrap();
    assert!(Arc::ptr_eq(&settings, &settings_again));

    // 实例可以释放，工厂不行
    locator.release::<GlobalSettings>().unwrap();
    assert!(!locator.is_registered::<GlobalSettings>());
    assert!(matches!(
        locator.release::<Foo>(),
        Err(LocatorError::ReleasableNotFound { .. })
    ));
}

#[test]
fn test_typed_locator_disposes_on_release() {
    let locator = TypedLocator::new();
    let disposed = Arc::new(AtomicUsize::new(0));

    let probe = Arc::clone(&disposed);
    locator
        .register_disposable_singleton(move || Ok(TrackedConnection { disposed: probe }))
        .unwrap();

    locator.release::<TrackedConnection>().unwrap();
    assert_eq!(disposed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_disposal_still_removes_entry() {
    let locator = ServiceLocatorImpl::<&str>::new();
    locator.register_disposable_instance("connection", BrokenConnection);

    // 清理失败原样传播
    assert!(matches!(
        locator.release(&"connection"),
        Err(LocatorError::DisposalFailed { .. })
    ));

    // 条目先移除后清理，失败后不会留下可解析的残留注册
    assert!(!locator.is_registered(&"connection"));
    assert!(matches!(
        locator.resolve::<BrokenConnection>(&"connection"),
        Err(LocatorError::ServiceNotRegistered { .. })
    ));
    assert!(matches!(
        locator.release(&"connection"),
        Err(LocatorError::ReleasableNotFound { .. })
    ));
}

#[test]
fn test_descriptor_dump_is_serializable() -> anyhow::Result<()> {
    let locator = ServiceLocatorImpl::<&str>::new();
    locator.register_factory("foo", || Ok(Foo::new("FooInstance")));
    locator.register_singleton("global-settings", || Ok(GlobalSettings::default()))?;

    let services = locator.registered_services();
    assert_eq!(services.len(), 2);
    assert!(services
        .iter()
        .any(|service| service.key == "foo" && service.strategy == StrategyKind::Factory));

    let dump = serde_json::to_string(&services)?;
    assert!(dump.contains("\"strategy\":\"factory\""));
    assert!(dump.contains("\"key\":\"global-settings\""));
    Ok(())
}
