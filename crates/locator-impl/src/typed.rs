//! 类型键服务定位器门面
//!
//! 以类型令牌为标识符的定位器变体，与字符串键变体是同一套算法，
//! 仅标识符域不同，所有调用都委托给内部的 [`ServiceLocatorImpl`]

use crate::locator::ServiceLocatorImpl;
use locator_abstractions::{
    Disposable, LocatorResult, ServiceDescriptor, ServiceLocator, TypeToken,
};
use std::sync::Arc;

/// 类型键服务定位器
///
/// 每个声明类型一一映射到一个 [`TypeToken`]，注册与解析都以类型本身定位
pub struct TypedLocator {
    inner: ServiceLocatorImpl<TypeToken>,
}

impl TypedLocator {
    /// 创建新的类型键定位器
    pub fn new() -> Self {
        Self {
            inner: ServiceLocatorImpl::new(),
        }
    }

    /// 为类型注册工厂
    pub fn register_factory<T, F>(&self, producer: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> LocatorResult<T> + Send + Sync + 'static,
    {
        self.inner.register_factory(TypeToken::of::<T>(), producer);
    }

    /// 为类型注册单例，立即构造一次
    pub fn register_singleton<T, F>(&self, producer: F) -> LocatorResult<()>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> LocatorResult<T>,
    {
        self.inner.register_singleton(TypeToken::of::<T>(), producer)
    }

    /// 为类型注册可释放单例
    pub fn register_disposable_singleton<T, F>(&self, producer: F) -> LocatorResult<()>
    where
        T: Disposable + Send + Sync + 'static,
        F: FnOnce() -> LocatorResult<T>,
    {
        self.inner
            .register_disposable_singleton(TypeToken::of::<T>(), producer)
    }

    /// 为类型注册已构造的实例
    pub fn register_instance<T>(&self, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.inner.register_instance(TypeToken::of::<T>(), value);
    }

    /// 为类型注册可释放实例
    pub fn register_disposable_instance<T>(&self, value: T)
    where
        T: Disposable + Send + Sync + 'static,
    {
        self.inner
            .register_disposable_instance(TypeToken::of::<T>(), value);
    }

    /// 按类型解析服务
    pub fn resolve<T>(&self) -> LocatorResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.inner.resolve(&TypeToken::of::<T>())
    }

    /// 释放类型对应的单例或实例
    pub fn release<T: 'static>(&self) -> LocatorResult<()> {
        self.inner.release(&TypeToken::of::<T>())
    }

    /// 检查类型是否已注册
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.inner.is_registered(&TypeToken::of::<T>())
    }

    /// 向已构造的值注入依赖（恒等扩展点）
    pub fn build_up<T>(&self, instance: T) -> T {
        instance
    }

    /// 获取所有当前有效注册的描述符
    pub fn registered_services(&self) -> Vec<ServiceDescriptor> {
        self.inner.registered_services()
    }

    /// 清空所有注册
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl Default for TypedLocator {
    fn default() -> Self {
        Self::new()
    }
}
