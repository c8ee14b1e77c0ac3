//! 错误类型
//!
//! - `RemoteError`：三种远程操作（以及提交前校验）的统一错误分类
//! - `TransitionError`：非法的页面跳转
//! - `AppError`：应用层错误（配置、文件、远程）

use std::fmt;
use thiserror::Error;

/// 远程操作错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    /// 请求没有到达服务端，或者没有收到响应
    Network,
    /// 客户端校验失败（发送之前）
    Validation,
    /// 服务端返回失败状态码，或者成功响应无法解析
    Server,
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemoteErrorKind::Network => "network",
            RemoteErrorKind::Validation => "validation",
            RemoteErrorKind::Server => "server",
        };
        f.write_str(name)
    }
}

/// 远程操作错误
///
/// 只携带分类和可读消息，不保存任何重试信息
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind}] {message}")]
pub struct RemoteError {
    kind: RemoteErrorKind,
    message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// 创建网络错误
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Network, message)
    }

    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Validation, message)
    }

    /// 创建服务端错误
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Server, message)
    }

    pub fn kind(&self) -> RemoteErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_validation(&self) -> bool {
        self.kind == RemoteErrorKind::Validation
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        // 请求没有发出或没有收到响应算网络错误，其余（解码、状态码）算服务端错误
        if err.is_builder() {
            RemoteError::network(format!("无法构造请求（请检查服务地址）: {}", err))
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            RemoteError::network(format!("无法连接到提取服务: {}", err))
        } else if let Some(status) = err.status() {
            RemoteError::server(format!("提取服务返回错误状态 {}", status))
        } else {
            RemoteError::server(format!("提取服务响应异常: {}", err))
        }
    }
}

/// 非法的页面跳转
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("当前页面 {from} 不允许执行 {action}")]
    NotAllowed {
        from: &'static str,
        action: &'static str,
    },
    #[error("首页没有上一页")]
    NoPreviousPage,
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 远程操作错误
    #[error("远程操作错误: {0}")]
    Remote(#[from] RemoteError),

    /// 页面跳转错误
    #[error("页面跳转错误: {0}")]
    Transition(#[from] TransitionError),

    /// 配置错误
    #[error("配置错误 ({path}): {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File {
            path: String::new(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config {
            path: String::new(), // TOML错误通常不包含路径信息
            source: err,
        }
    }
}

impl AppError {
    /// 创建文件操作错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }

    /// 创建配置解析错误
    pub fn config(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::Config {
            path: path.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_carries_kind_tag() {
        let err = RemoteError::validation("empty input");
        assert_eq!(err.to_string(), "[validation] empty input");
        assert!(err.is_validation());
    }

    #[test]
    fn app_error_wraps_remote_error() {
        let err: AppError = RemoteError::server("HTTP 500").into();
        assert!(matches!(err, AppError::Remote(ref e) if e.kind() == RemoteErrorKind::Server));
    }
}
