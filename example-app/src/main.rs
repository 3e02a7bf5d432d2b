//! # 示例应用程序
//!
//! 演示如何使用服务定位器完成注册、解析与释放

use anyhow::Result;
use clap::Parser;
use locator_abstractions::{Disposable, LocatorResult, ServiceLocator};
use locator_impl::{ServiceLocatorImpl, TypedLocator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "服务定位器示例应用")]
struct Args {
    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动服务定位器示例应用");

    // 定位器显式构造，按引用传递给所有使用方
    let locator = build_locator()?;

    demonstrate_factory_resolution(&locator)?;
    demonstrate_singleton_state(&locator)?;
    demonstrate_release(&locator)?;
    demonstrate_typed_locator()?;
    dump_registrations(&locator)?;

    info!("示例应用结束");
    Ok(())
}

/// 构建并装配定位器
fn build_locator() -> Result<Arc<ServiceLocatorImpl<&'static str>>> {
    info!("装配服务定位器");

    let locator = Arc::new(ServiceLocatorImpl::new());

    // 注册工厂
    locator.register_factory("greeter", || Ok(GreeterService::new("FooInstance")));

    // 工厂通过定位器回调解析自己的依赖
    let inner = Arc::clone(&locator);
    locator.register_factory("report", move || {
        let greeter = inner.resolve::<GreeterService>(&"greeter")?;
        Ok(ReportService { greeter })
    });

    // 注册单例
    locator.register_singleton("global-settings", || Ok(GlobalSettings::default()))?;

    // 注册可释放单例
    locator.register_disposable_singleton("session-cache", || Ok(SessionCache::new()))?;

    // 注册已构造的实例
    locator.register_instance("registered-greeter", GreeterService::new("RegisteredInstance"));

    info!("装配完成");
    Ok(locator)
}

/// 演示工厂解析
fn demonstrate_factory_resolution(locator: &Arc<ServiceLocatorImpl<&'static str>>) -> Result<()> {
    info!("演示工厂解析");

    let first = locator.resolve::<GreeterService>(&"greeter")?;
    let second = locator.resolve::<GreeterService>(&"greeter")?;
    info!("两次解析工厂: {} / {}", first.greet(), second.greet());
    info!("产出为不同对象: {}", !Arc::ptr_eq(&first, &second));

    let report = locator.resolve::<ReportService>(&"report")?;
    info!("报表服务使用的问候: {}", report.greeter.greet());

    let registered = locator.resolve::<GreeterService>(&"registered-greeter")?;
    info!("已注册实例: {}", registered.greet());

    // 未注册标识符的解析失败会携带标识符信息
    if let Err(error) = locator.resolve::<GreeterService>(&"missing") {
        warn!("解析未注册服务失败: {}", error);
    }

    Ok(())
}

/// 演示单例共享状态
fn demonstrate_singleton_state(locator: &Arc<ServiceLocatorImpl<&'static str>>) -> Result<()> {
    info!("演示单例共享状态");

    let settings = locator.resolve::<GlobalSettings>(&"global-settings")?;
    settings.increment();
    settings.increment();
    info!("第一次读取计数: {}", settings.counter());

    let settings_again = locator.resolve::<GlobalSettings>(&"global-settings")?;
    settings_again.increment();
    info!("第二次读取计数: {}", settings.counter());

    Ok(())
}

/// 演示释放与重新注册
fn demonstrate_release(locator: &Arc<ServiceLocatorImpl<&'static str>>) -> Result<()> {
    info!("演示释放与重新注册");

    // 释放可释放单例会触发其清理操作
    locator.release(&"session-cache")?;

    // 释放普通单例后重新注册，状态回到初始值
    locator.release(&"global-settings")?;
    locator.register_singleton("global-settings", || Ok(GlobalSettings::default()))?;
    let fresh = locator.resolve::<GlobalSettings>(&"global-settings")?;
    info!("重新注册后的计数: {}", fresh.counter());

    Ok(())
}

/// 演示类型键定位器
fn demonstrate_typed_locator() -> Result<()> {
    info!("演示类型键定位器");

    let locator = TypedLocator::new();
    locator.register_factory(|| Ok(GreeterService::new("TypedFoo")));
    locator.register_singleton(|| Ok(GlobalSettings::default()))?;

    let greeter = locator.resolve::<GreeterService>()?;
    info!("按类型解析: {}", greeter.greet());
    info!(
        "GlobalSettings 已注册: {}",
        locator.is_registered::<GlobalSettings>()
    );

    locator.release::<GlobalSettings>()?;
    info!(
        "释放后 GlobalSettings 已注册: {}",
        locator.is_registered::<GlobalSettings>()
    );

    Ok(())
}

/// 输出当前注册的诊断信息
fn dump_registrations(locator: &Arc<ServiceLocatorImpl<&'static str>>) -> Result<()> {
    let services = locator.registered_services();
    info!("当前注册: {}", serde_json::to_string_pretty(&services)?);
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

// 示例服务

/// 问候服务
#[derive(Debug)]
pub struct GreeterService {
    name: String,
}

impl GreeterService {
    /// 创建新的问候服务
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// 生成问候语
    pub fn greet(&self) -> String {
        format!("你好, {}", self.name)
    }
}

/// 依赖问候服务的报表服务
#[derive(Debug)]
pub struct ReportService {
    /// 注入的问候服务
    pub greeter: Arc<GreeterService>,
}

/// 全局设置
#[derive(Debug, Default)]
pub struct GlobalSettings {
    counter: AtomicUsize,
}

impl GlobalSettings {
    /// 递增计数器
    pub fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// 读取计数器
    pub fn counter(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

/// 带清理能力的会话缓存
#[derive(Debug)]
pub struct SessionCache {
    entries: usize,
}

impl SessionCache {
    /// 创建新的会话缓存
    pub fn new() -> Self {
        Self { entries: 0 }
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for SessionCache {
    fn dispose(&self) -> LocatorResult<()> {
        info!("释放会话缓存, 条目数: {}", self.entries);
        Ok(())
    }
}
