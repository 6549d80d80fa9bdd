//! 语言区域注册表
//!
//! 定义应用支持的固定语言集合（en/es/de/ar）及其元数据：
//! 显示名称、书写方向和货币代码。所有查询都是纯函数，
//! 不支持的语言代码由调用方负责处理。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 默认语言区域（同时也是请求中省略语言字段时的回退值）
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// 应用支持的语言区域
///
/// 这是一个封闭集合：运行时不允许注册新语言。
/// 序列化格式为小写语言代码（"en"、"es"、"de"、"ar"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
    De,
    Ar,
}

/// 文字书写方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl Locale {
    /// 全部支持的语言区域，顺序固定
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Es, Locale::De, Locale::Ar];

    /// 解析语言代码，大小写敏感，精确匹配
    ///
    /// 不在集合中的代码返回 `None`，验证错误留给调用方决定。
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            "de" => Some(Locale::De),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }

    /// 检查代码是否为受支持的语言区域
    pub fn is_supported(code: &str) -> bool {
        Locale::from_code(code).is_some()
    }

    /// 语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::De => "de",
            Locale::Ar => "ar",
        }
    }

    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Espanol",
            Locale::De => "Deutsch",
            Locale::Ar => "Arabic",
        }
    }

    /// 书写方向，仅阿拉伯语为 RTL
    pub fn direction(&self) -> Direction {
        match self {
            Locale::Ar => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    /// 是否为从右到左书写
    pub fn is_rtl(&self) -> bool {
        self.direction() == Direction::Rtl
    }

    /// 该区域使用的货币代码
    pub fn currency(&self) -> &'static str {
        match self {
            Locale::Es | Locale::De => "EUR",
            Locale::Ar => "AED",
            Locale::En => "USD",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s).ok_or(())
    }
}
