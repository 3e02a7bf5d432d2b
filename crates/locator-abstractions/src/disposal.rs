//! 可释放能力定义

use crate::errors::LocatorResult;

/// 可释放能力 trait
///
/// 被保留的单例或实例可以选择实现此 trait，
/// 通过 `register_disposable_*` 注册后，释放时注册表会调用 [`dispose`]
/// 执行清理。清理失败会原样传播给 `release` 的调用方。
///
/// [`dispose`]: Disposable::dispose
pub trait Disposable: Send + Sync {
    /// 执行清理操作
    fn dispose(&self) -> LocatorResult<()>;
}
