//! HTTP 传输 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"发请求、拿字节"的能力

use crate::config::Config;
use crate::error::RemoteError;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

/// 成功（2xx）响应
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// 响应是否声明为 JSON
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false)
    }
}

/// 上传的文件部分
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub field: &'static str,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP 传输
///
/// 职责：
/// - 持有 `reqwest::Client` 和服务地址
/// - 把传输失败和非 2xx 状态统一转换为 `RemoteError`
/// - 不认识订单，不处理流程
pub struct HttpTransport {
    client: Client,
    config: Config,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    ///
    /// 不设置超时：远程调用挂起时界面保持禁用
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 发送 JSON 请求体的 POST
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<RawResponse, RemoteError> {
        let url = self.config.endpoint_url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        finish(&url, response).await
    }

    /// 发送 multipart 的 POST
    pub async fn post_multipart(
        &self,
        path: &str,
        upload: UploadPart,
    ) -> Result<RawResponse, RemoteError> {
        let url = self.config.endpoint_url(path);
        debug!(
            "POST {} (multipart, {} = {}, {} 字节)",
            url,
            upload.field,
            upload.file_name,
            upload.bytes.len()
        );
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)?;
        let form = Form::new().part(upload.field, part);
        let response = self.client.post(&url).multipart(form).send().await?;
        finish(&url, response).await
    }

    /// 发送 GET
    pub async fn get(&self, path: &str) -> Result<RawResponse, RemoteError> {
        let url = self.config.endpoint_url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        finish(&url, response).await
    }
}

async fn finish(url: &str, response: Response) -> Result<RawResponse, RemoteError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // 先看状态码：失败响应的正文只用于日志，读不到也仍是服务端错误
    if !status.is_success() {
        let preview: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();
        warn!("提取服务返回错误状态 {} ({}): {}", status, url, preview);
        return Err(RemoteError::server(format!(
            "提取服务返回错误状态 {}",
            status.as_u16()
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| RemoteError::network(format!("读取响应失败 ({}): {}", url, e)))?;

    Ok(RawResponse {
        content_type,
        body: body.to_vec(),
    })
}
