//! 服务标识符定义
//!
//! 注册表对标识符域保持泛型，由集成方选择字符串键或类型令牌键

use std::any::TypeId;
use std::fmt;
use std::hash::Hash;

/// 服务标识符 trait
///
/// 任何可比较、可克隆且可显示的类型都可以作为标识符；
/// 不同逻辑服务使用冲突的标识符属于调用方错误，注册表不做检测
pub trait ServiceKey:
    Eq + Hash + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl<K> ServiceKey for K where
    K: Eq + Hash + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// 类型令牌
///
/// 从声明类型一一派生的标识符，同一类型在注册表生命周期内始终得到相同令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// 从类型派生令牌
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 类型ID
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称（包含模块路径）
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
