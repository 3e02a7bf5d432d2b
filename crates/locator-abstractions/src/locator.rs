//! 服务定位器抽象接口

use crate::disposal::Disposable;
use crate::errors::LocatorResult;
use crate::key::ServiceKey;
use crate::strategy::ServiceDescriptor;
use std::sync::Arc;

/// 服务定位器 trait
///
/// 提供服务注册、解析与释放的核心接口。
/// 所有操作均为同步调用，实现方按"每次调用一把全表锁"的粒度保证互斥。
pub trait ServiceLocator<K: ServiceKey>: Send + Sync {
    /// 注册工厂
    ///
    /// 生产函数不会被立即调用，每次解析都重新调用并返回新值，
    /// 注册表不保留工厂产出
    fn register_factory<T, F>(&self, key: K, producer: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> LocatorResult<T> + Send + Sync + 'static;

    /// 注册单例
    ///
    /// 立即同步调用一次生产函数并保留结果；
    /// 生产函数失败时不产生任何注册，原有注册保持不变
    fn register_singleton<T, F>(&self, key: K, producer: F) -> LocatorResult<()>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> LocatorResult<T>;

    /// 注册可释放单例
    ///
    /// 与 [`register_singleton`] 相同，另在注册时捕获清理钩子，
    /// 释放时调用值的 [`Disposable::dispose`]
    ///
    /// [`register_singleton`]: ServiceLocator::register_singleton
    fn register_disposable_singleton<T, F>(&self, key: K, producer: F) -> LocatorResult<()>
    where
        T: Disposable + Send + Sync + 'static,
        F: FnOnce() -> LocatorResult<T>;

    /// 注册实例
    ///
    /// 直接保留调用方提供的值，不发生任何调用
    fn register_instance<T>(&self, key: K, value: T)
    where
        T: Send + Sync + 'static;

    /// 注册可释放实例
    fn register_disposable_instance<T>(&self, key: K, value: T)
    where
        T: Disposable + Send + Sync + 'static;

    /// 解析服务
    ///
    /// 查找顺序: 单例 > 实例 > 工厂。
    /// 单例与实例返回保留值本身（跨调用保持同一 `Arc` 身份），
    /// 工厂每次调用返回新产出；任何分区都未命中时返回
    /// [`LocatorError::ServiceNotRegistered`]
    ///
    /// [`LocatorError::ServiceNotRegistered`]: crate::errors::LocatorError::ServiceNotRegistered
    fn resolve<T>(&self, key: &K) -> LocatorResult<Arc<T>>
    where
        T: Send + Sync + 'static;

    /// 释放单例或实例
    ///
    /// 依次查找单例、实例分区，命中后移除条目并调用其清理钩子（如有）；
    /// 工厂条目不保留值因而不可释放，与未注册标识符一样返回
    /// [`LocatorError::ReleasableNotFound`]
    ///
    /// [`LocatorError::ReleasableNotFound`]: crate::errors::LocatorError::ReleasableNotFound
    fn release(&self, key: &K) -> LocatorResult<()>;

    /// 检查标识符在任一分区是否有有效注册
    ///
    /// 纯查询，无副作用
    fn is_registered(&self, key: &K) -> bool;

    /// 向已构造的值注入依赖
    ///
    /// 当前契约只要求原样返回输入，作为后续实现字段注入的扩展点保留
    fn build_up<T>(&self, instance: T) -> T {
        instance
    }

    /// 获取所有当前有效注册的描述符
    fn registered_services(&self) -> Vec<ServiceDescriptor>;

    /// 清空所有注册
    ///
    /// 不调用任何清理钩子，需要清理的条目应先逐个 `release`
    fn clear(&self);
}
