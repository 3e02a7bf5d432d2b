//! 服务定位器具体实现

use chrono::{DateTime, Utc};
use locator_abstractions::{
    Disposable, LocatorError, LocatorResult, ServiceDescriptor, ServiceKey, ServiceLocator,
    StrategyKind,
};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// 类型擦除后的保留值
type Retained = Arc<dyn Any + Send + Sync>;

/// 类型擦除后的生产函数
type Producer = Arc<dyn Fn() -> LocatorResult<Retained> + Send + Sync>;

/// 类型擦除后的清理钩子
type Disposer = Box<dyn Fn(&(dyn Any + Send + Sync)) -> LocatorResult<()> + Send + Sync>;

/// 工厂注册项
struct FactoryEntry {
    producer: Producer,
    registered_at: DateTime<Utc>,
}

/// 被保留的单例或实例注册项
struct RetainedEntry {
    value: Retained,
    disposer: Option<Disposer>,
    registered_at: DateTime<Utc>,
}

/// 三个注册分区
///
/// 不变式: 一个标识符同一时刻至多出现在一个分区中
struct Partitions<K> {
    factories: HashMap<K, FactoryEntry>,
    singletons: HashMap<K, RetainedEntry>,
    instances: HashMap<K, RetainedEntry>,
}

impl<K> Default for Partitions<K> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
            singletons: HashMap::new(),
            instances: HashMap::new(),
        }
    }
}

impl<K: ServiceKey> Partitions<K> {
    /// 从所有分区移除标识符
    ///
    /// 重新注册沿用"覆盖不清理"语义，被换出的保留值不触发清理钩子
    fn evict(&mut self, key: &K) {
        self.factories.remove(key);
        self.singletons.remove(key);
        self.instances.remove(key);
    }
}

/// 具体的服务定位器实现
///
/// 三个分区共享一把全表锁，每次公开操作持锁一次；
/// 生产函数与清理钩子都在锁外调用，因此生产函数可以回调定位器
/// 解析自己的依赖
pub struct ServiceLocatorImpl<K: ServiceKey> {
    partitions: RwLock<Partitions<K>>,
}

impl<K: ServiceKey> ServiceLocatorImpl<K> {
    /// 创建新的服务定位器
    pub fn new() -> Self {
        Self {
            partitions: RwLock::new(Partitions::default()),
        }
    }

    /// 保留单例值
    fn store_singleton(&self, key: K, value: Retained, disposer: Option<Disposer>) {
        let mut partitions = self.partitions.write();
        partitions.evict(&key);
        info!("注册单例: {}", key);
        partitions.singletons.insert(
            key,
            RetainedEntry {
                value,
                disposer,
                registered_at: Utc::now(),
            },
        );
    }

    /// 保留实例值
    fn store_instance(&self, key: K, value: Retained, disposer: Option<Disposer>) {
        let mut partitions = self.partitions.write();
        partitions.evict(&key);
        info!("注册实例: {}", key);
        partitions.instances.insert(
            key,
            RetainedEntry {
                value,
                disposer,
                registered_at: Utc::now(),
            },
        );
    }
}

impl<K: ServiceKey> Default for ServiceLocatorImpl<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ServiceKey> ServiceLocator<K> for ServiceLocatorImpl<K> {
    fn register_factory<T, F>(&self, key: K, producer: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> LocatorResult<T> + Send + Sync + 'static,
    {
        let producer: Producer = Arc::new(move || producer().map(|value| Arc::new(value) as Retained));
        let mut partitions = self.partitions.write();
        partitions.evict(&key);
        info!("注册工厂: {}", key);
        partitions.factories.insert(
            key,
            FactoryEntry {
                producer,
                registered_at: Utc::now(),
            },
        );
    }

    fn register_singleton<T, F>(&self, key: K, producer: F) -> LocatorResult<()>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> LocatorResult<T>,
    {
        // 先构造后入表，生产失败时不产生任何注册，原有注册保持不变
        let value = producer()?;
        self.store_singleton(key, Arc::new(value), None);
        Ok(())
    }

    fn register_disposable_singleton<T, F>(&self, key: K, producer: F) -> LocatorResult<()>
    where
        T: Disposable + Send + Sync + 'static,
        F: FnOnce() -> LocatorResult<T>,
    {
        let value = producer()?;
        self.store_singleton(key, Arc::new(value), Some(disposer_for::<T>()));
        Ok(())
    }

    fn register_instance<T>(&self, key: K, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.store_instance(key, Arc::new(value), None);
    }

    fn register_disposable_instance<T>(&self, key: K, value: T)
    where
        T: Disposable + Send + Sync + 'static,
    {
        self.store_instance(key, Arc::new(value), Some(disposer_for::<T>()));
    }

    fn resolve<T>(&self, key: &K) -> LocatorResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        // 查找顺序: 单例 > 实例 > 工厂
        let producer = {
            let partitions = self.partitions.read();
            if let Some(entry) = partitions.singletons.get(key) {
                return downcast(key, Arc::clone(&entry.value));
            }
            if let Some(entry) = partitions.instances.get(key) {
                return downcast(key, Arc::clone(&entry.value));
            }
            match partitions.factories.get(key) {
                Some(entry) => Arc::clone(&entry.producer),
                None => return Err(LocatorError::not_registered(key)),
            }
        };

        // 锁已释放，生产函数可以安全地回调定位器
        downcast(key, producer()?)
    }

    fn release(&self, key: &K) -> LocatorResult<()> {
        let entry = {
            let mut partitions = self.partitions.write();
            partitions
                .singletons
                .remove(key)
                .or_else(|| partitions.instances.remove(key))
                .ok_or_else(|| LocatorError::releasable_not_found(key))?
        };

        info!("释放服务: {}", key);

        // 先移除后清理，清理失败也不会留下可解析的残留条目
        if let Some(disposer) = entry.disposer {
            disposer(entry.value.as_ref())?;
        }
        Ok(())
    }

    fn is_registered(&self, key: &K) -> bool {
        let partitions = self.partitions.read();
        partitions.singletons.contains_key(key)
            || partitions.instances.contains_key(key)
            || partitions.factories.contains_key(key)
    }

    fn registered_services(&self) -> Vec<ServiceDescriptor> {
        let partitions = self.partitions.read();
        let mut services: Vec<ServiceDescriptor> = partitions
            .factories
            .iter()
            .map(|(key, entry)| descriptor(key, StrategyKind::Factory, entry.registered_at))
            .chain(
                partitions
                    .singletons
                    .iter()
                    .map(|(key, entry)| descriptor(key, StrategyKind::Singleton, entry.registered_at)),
            )
            .chain(
                partitions
                    .instances
                    .iter()
                    .map(|(key, entry)| descriptor(key, StrategyKind::Instance, entry.registered_at)),
            )
            .collect();
        services.sort_by_key(|service| service.registered_at);
        services
    }

    fn clear(&self) {
        let mut partitions = self.partitions.write();
        let removed = partitions.factories.len()
            + partitions.singletons.len()
            + partitions.instances.len();
        partitions.factories.clear();
        partitions.singletons.clear();
        partitions.instances.clear();
        info!("清空注册表, 共移除 {} 项注册", removed);
    }
}

/// 构造注册项的描述符
fn descriptor<K: ServiceKey>(
    key: &K,
    strategy: StrategyKind,
    registered_at: DateTime<Utc>,
) -> ServiceDescriptor {
    ServiceDescriptor {
        key: key.to_string(),
        strategy,
        registered_at,
    }
}

/// 为实现了 [`Disposable`] 的类型构造类型擦除的清理钩子
fn disposer_for<T: Disposable + Send + Sync + 'static>() -> Disposer {
    Box::new(|value| match value.downcast_ref::<T>() {
        Some(value) => value.dispose(),
        None => Err(LocatorError::disposal_failed(format!(
            "清理钩子类型还原失败: {}",
            std::any::type_name::<T>()
        ))),
    })
}

/// 将保留值还原为具体类型
fn downcast<K, T>(key: &K, value: Retained) -> LocatorResult<Arc<T>>
where
    K: ServiceKey,
    T: Send + Sync + 'static,
{
    value
        .downcast::<T>()
        .map_err(|_| LocatorError::type_mismatch(key, std::any::type_name::<T>()))
}
