//! 注册策略与服务描述符

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 注册策略类型
///
/// 一个标识符同一时刻至多持有一种策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 工厂模式 - 每次解析都重新调用生产函数
    Factory,
    /// 单例模式 - 注册时构造一次并保留
    Singleton,
    /// 实例模式 - 直接保留调用方提供的值
    Instance,
}

/// 服务描述符
///
/// 描述一项当前有效的注册，用于诊断输出
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    /// 标识符的显示形式
    pub key: String,
    /// 注册策略
    pub strategy: StrategyKind,
    /// 注册时间
    pub registered_at: DateTime<Utc>,
}

impl ServiceDescriptor {
    /// 创建新的服务描述符
    pub fn new(key: impl Into<String>, strategy: StrategyKind) -> Self {
        Self {
            key: key.into(),
            strategy,
            registered_at: Utc::now(),
        }
    }
}
