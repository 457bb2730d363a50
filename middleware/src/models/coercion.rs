//! 分类字段校验与纠正
//!
//! 三个分类字段 (stack / level / package) 都遵循同一恢复策略:
//! 输入在取值域内则原样保留,否则替换为文档约定的默认值并产生一条本地警告。
//! 纠正不是失败,因此这里不返回 `Result`。

use std::fmt;

/// 分类字段的公共约束
///
/// 每个实现者声明自己的字段名、默认值和全部合法取值。
pub trait Categorical: Copy + Sized + 'static {
    /// 字段名,用于警告信息 (如 `stack`)
    const FIELD: &'static str;

    /// 输入非法时使用的默认值
    const DEFAULT: Self;

    /// 全部合法取值
    const ALL: &'static [Self];

    /// 传输格式中的名称
    fn as_str(&self) -> &'static str;

    /// 精确匹配 (区分大小写)
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }
}

/// 一次默认值替换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// 被替换的字段
    pub field: &'static str,
    /// 被拒绝的原始输入
    pub rejected: String,
    /// 替换后的默认值
    pub default: &'static str,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {}: {}. Using '{}' as default.",
            self.field, self.rejected, self.default
        )
    }
}

/// 纠正结果: 最终取值 + 可选的替换记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced<T> {
    pub value: T,
    pub substitution: Option<Substitution>,
}

impl<T> Coerced<T> {
    /// 是否发生了默认值替换
    pub fn was_substituted(&self) -> bool {
        self.substitution.is_some()
    }
}

/// 校验并纠正一个分类输入
///
/// # 示例
/// ```
/// use logging_middleware::models::{coerce, Stack};
///
/// let ok = coerce::<Stack>("backend");
/// assert_eq!(ok.value, Stack::Backend);
/// assert!(!ok.was_substituted());
///
/// let fixed = coerce::<Stack>("xyz");
/// assert_eq!(fixed.value, Stack::Frontend);
/// assert!(fixed.was_substituted());
/// ```
pub fn coerce<T: Categorical>(raw: &str) -> Coerced<T> {
    match T::parse(raw) {
        Some(value) => Coerced {
            value,
            substitution: None,
        },
        None => Coerced {
            value: T::DEFAULT,
            substitution: Some(Substitution {
                field: T::FIELD,
                rejected: raw.to_string(),
                default: T::DEFAULT.as_str(),
            }),
        },
    }
}
