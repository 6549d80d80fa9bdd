//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。每个变量都是一个实现了
//! `EnvVar` 的零大小类型，集中声明名称、默认值和说明文字。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment variable '{}': {}",
            self.variable, self.message
        )
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

fn parse_u64(value: &str, name: &str) -> EnvResult<u64> {
    value.parse::<u64>().map_err(|_| EnvError {
        variable: name.to_string(),
        message: format!("Invalid number '{}'", value),
    })
}

fn parse_u16(value: &str, name: &str) -> EnvResult<u16> {
    value.parse::<u16>().map_err(|_| EnvError {
        variable: name.to_string(),
        message: format!("Invalid port '{}'", value),
    })
}

fn parse_usize(value: &str, name: &str) -> EnvResult<usize> {
    value.parse::<usize>().map_err(|_| EnvError {
        variable: name.to_string(),
        message: format!("Invalid size '{}'", value),
    })
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 应用运行模式
    pub struct Mode;
    impl EnvVar<String> for Mode {
        const NAME: &'static str = "LANGOS_MODE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Application mode: development, staging, production";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("production".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "development" | "dev" => Ok("development".to_string()),
                "staging" | "stage" => Ok("staging".to_string()),
                "production" | "prod" => Ok("production".to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid mode '{}'. Use: development, staging, production",
                        value
                    ),
                }),
            }
        }
    }

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "LANGOS_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译服务相关环境变量
pub mod translation {
    use super::*;

    /// 外部翻译引擎的 API 密钥
    ///
    /// 未配置时不报错：凭证缺失在请求处理阶段映射为 503，
    /// 而不是启动失败。
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "LINGO_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Credential for the external translation engine";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.to_string())
        }
    }

    /// 外部翻译引擎地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "LINGO_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Endpoint of the external translation engine";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::config::constants::DEFAULT_API_URL.to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(value.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid URL '{}'", value),
                })
            }
        }
    }

    /// 引擎调用超时（秒）
    pub struct EngineTimeoutSecs;
    impl EnvVar<u64> for EngineTimeoutSecs {
        const NAME: &'static str = "LANGOS_ENGINE_TIMEOUT_SECS";
        const DEFAULT: Option<u64> = Some(15);
        const DESCRIPTION: &'static str = "Server-side timeout for one engine call, in seconds";

        fn parse(value: &str) -> EnvResult<u64> {
            parse_u64(value, Self::NAME)
        }
    }

    /// 缓存容量上限
    pub struct CacheSize;
    impl EnvVar<usize> for CacheSize {
        const NAME: &'static str = "LANGOS_CACHE_SIZE";
        const DEFAULT: Option<usize> = Some(1024);
        const DESCRIPTION: &'static str = "Maximum number of cached translations";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_usize(value, Self::NAME)
        }
    }

    /// 缓存条目存活时间（秒）
    pub struct CacheTtlSecs;
    impl EnvVar<u64> for CacheTtlSecs {
        const NAME: &'static str = "LANGOS_CACHE_TTL_SECS";
        const DEFAULT: Option<u64> = Some(3600);
        const DESCRIPTION: &'static str = "Time-to-live of cached translations, in seconds";

        fn parse(value: &str) -> EnvResult<u64> {
            parse_u64(value, Self::NAME)
        }
    }

    /// 默认语言区域
    pub struct DefaultLocale;
    impl EnvVar<String> for DefaultLocale {
        const NAME: &'static str = "LANGOS_DEFAULT_LOCALE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Fallback locale for requests that omit one";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::locales::DEFAULT_LOCALE.code().to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            if crate::locales::Locale::is_supported(value) {
                Ok(value.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Unsupported locale '{}'", value),
                })
            }
        }
    }
}

/// Web 服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "LANGOS_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Address the web server binds to";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            if value.is_empty() {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Bind address cannot be empty".to_string(),
                })
            } else {
                Ok(value.to_string())
            }
        }
    }

    /// 监听端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "LANGOS_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Port the web server listens on";

        fn parse(value: &str) -> EnvResult<u16> {
            parse_u16(value, Self::NAME)
        }
    }
}

/// 客户端调度器相关环境变量
pub mod client {
    use super::*;

    /// 翻译接口地址
    pub struct Endpoint;
    impl EnvVar<String> for Endpoint {
        const NAME: &'static str = "LANGOS_API_ENDPOINT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "URL of the translation request handler";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("http://127.0.0.1:7080/api/translate".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(value.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid URL '{}'", value),
                })
            }
        }
    }

    /// 客户端整体超时（秒）
    ///
    /// 必须大于服务端的引擎超时，保证服务端的超时错误
    /// 能在客户端放弃之前送达。
    pub struct TimeoutSecs;
    impl EnvVar<u64> for TimeoutSecs {
        const NAME: &'static str = "LANGOS_CLIENT_TIMEOUT_SECS";
        const DEFAULT: Option<u64> = Some(20);
        const DESCRIPTION: &'static str = "Client-side round-trip timeout, in seconds";

        fn parse(value: &str) -> EnvResult<u64> {
            parse_u64(value, Self::NAME)
        }
    }

    /// 历史记录存储目录
    pub struct HistoryDir;
    impl EnvVar<String> for HistoryDir {
        const NAME: &'static str = "LANGOS_HISTORY_DIR";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Directory holding the persisted translation history";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(".langos".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            if value.is_empty() {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "History directory cannot be empty".to_string(),
                })
            } else {
                Ok(value.to_string())
            }
        }
    }
}
