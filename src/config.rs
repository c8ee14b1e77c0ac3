use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// 提取服务地址
    pub api_base_url: String,
    /// 文本提取接口路径
    pub text_endpoint: String,
    /// 图片提取接口路径
    pub image_endpoint: String,
    /// Excel 导出接口路径
    pub export_endpoint: String,
    /// 下载时使用的固定文件名
    pub export_file_name: String,
    /// 下载文件保存目录
    pub download_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            text_endpoint: "/extract_from_text".to_string(),
            image_endpoint: "/extract_from_image".to_string(),
            export_endpoint: "/download_excel".to_string(),
            export_file_name: "OrderIQ_Output.xlsx".to_string(),
            download_dir: ".".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量读取配置，未设置的字段使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件（不存在时使用默认值），再应用环境变量覆盖
    ///
    /// # 参数
    /// - `path`: 配置文件路径
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::from_env());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file(path.display().to_string(), e))?;
        let base = toml::from_str::<Config>(&content)
            .map_err(|e| AppError::config(path.display().to_string(), e))?;
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("ORDER_API_BASE_URL").unwrap_or(self.api_base_url),
            text_endpoint: std::env::var("ORDER_TEXT_ENDPOINT").unwrap_or(self.text_endpoint),
            image_endpoint: std::env::var("ORDER_IMAGE_ENDPOINT").unwrap_or(self.image_endpoint),
            export_endpoint: std::env::var("ORDER_EXPORT_ENDPOINT").unwrap_or(self.export_endpoint),
            export_file_name: std::env::var("ORDER_EXPORT_FILE_NAME").unwrap_or(self.export_file_name),
            download_dir: std::env::var("ORDER_DOWNLOAD_DIR").unwrap_or(self.download_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    /// 拼接完整的接口地址
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
