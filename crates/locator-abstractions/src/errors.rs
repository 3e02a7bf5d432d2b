//! 错误类型定义

use thiserror::Error;

/// 服务定位器错误类型
#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("服务未注册: {key}")]
    ServiceNotRegistered { key: String },

    #[error("没有可释放的单例或实例: {key}")]
    ReleasableNotFound { key: String },

    #[error("服务构造失败: {message}")]
    ProducerFailed { message: String },

    #[error("服务释放失败: {message}")]
    DisposalFailed { message: String },

    #[error("服务类型不匹配: {key}, 期望类型: {expected}")]
    TypeMismatch { key: String, expected: String },
}

impl LocatorError {
    /// 创建服务未注册错误
    pub fn not_registered(key: impl ToString) -> Self {
        Self::ServiceNotRegistered {
            key: key.to_string(),
        }
    }

    /// 创建没有可释放条目错误
    pub fn releasable_not_found(key: impl ToString) -> Self {
        Self::ReleasableNotFound {
            key: key.to_string(),
        }
    }

    /// 创建生产函数失败错误
    ///
    /// 供生产函数自行构造，注册表原样向调用方传播
    pub fn producer_failed(message: impl Into<String>) -> Self {
        Self::ProducerFailed {
            message: message.into(),
        }
    }

    /// 创建释放失败错误
    ///
    /// 供清理实现自行构造，注册表原样向调用方传播
    pub fn disposal_failed(message: impl Into<String>) -> Self {
        Self::DisposalFailed {
            message: message.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(key: impl ToString, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected: expected.into(),
        }
    }
}

/// 结果类型别名
pub type LocatorResult<T> = Result<T, LocatorError>;
