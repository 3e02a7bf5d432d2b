//! # 服务定位器具体实现
//!
//! 提供具体的服务定位器实现与类型键门面
//!
//! ## 核心类型
//!
//! - [`ServiceLocatorImpl`] - 按标识符泛型化的服务定位器
//! - [`TypedLocator`] - 以类型令牌为标识符的门面

pub mod locator;
pub mod typed;

pub use locator::ServiceLocatorImpl;
pub use typed::TypedLocator;
