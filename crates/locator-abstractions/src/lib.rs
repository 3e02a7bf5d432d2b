//! # Locator Abstractions
//!
//! 服务定位器抽象层，定义服务注册、解析与释放的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceLocator`] - 服务定位器接口
//! - [`ServiceKey`] - 服务标识符约束
//! - [`TypeToken`] - 类型派生标识符
//! - [`Disposable`] - 可释放能力接口
//!
//! ## 设计原则
//!
//! - 标识符域泛型化，字符串键与类型令牌键共用同一套逻辑
//! - 可释放能力为编译期显式声明，而非运行时结构探测
//! - 定位器实例显式构造并按引用传递，不依赖全局可变状态

pub mod disposal;
pub mod errors;
pub mod key;
pub mod locator;
pub mod strategy;

pub use disposal::*;
pub use errors::*;
pub use key::*;
pub use locator::*;
pub use strategy::*;
