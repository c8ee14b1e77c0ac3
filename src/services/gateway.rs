//! 远程操作网关 - 业务能力层
//!
//! 三个远程操作：文本提取、图片提取、Excel 导出。
//! 网关本身不做并发控制，"同一时间只允许一个请求"由流程层的 in-flight 标志保证。

use crate::error::RemoteError;
use crate::infrastructure::{HttpTransport, UploadPart};
use crate::models::LoadedFile;
use crate::services::projection::{self, Extraction};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

/// 导出得到的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 订单提取服务
#[async_trait]
pub trait ExtractionGateway: Send + Sync {
    /// 文本提取：所有段落作为一个批次发送
    async fn extract_from_text(&self, lines: &[String]) -> Result<Extraction, RemoteError>;

    /// 图片提取：以 multipart 的 `file` 字段上传（文件已由流程层读入）
    async fn extract_from_image(&self, file: &LoadedFile) -> Result<Extraction, RemoteError>;

    /// 导出服务端最近一次处理的批次（不是本地结果）
    async fn export_current_results(&self) -> Result<ExportFile, RemoteError>;
}

#[derive(Serialize)]
struct TextBatchRequest<'a> {
    input_texts: &'a [String],
}

/// 基于 HTTP 的网关实现
pub struct RemoteGateway {
    transport: HttpTransport,
}

impl RemoteGateway {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ExtractionGateway for RemoteGateway {
    async fn extract_from_text(&self, lines: &[String]) -> Result<Extraction, RemoteError> {
        info!("📤 正在提交文本，共 {} 段", lines.len());
        let config = self.transport.config();
        let response = self
            .transport
            .post_json(&config.text_endpoint, &TextBatchRequest { input_texts: lines })
            .await?;
        let extraction = projection::parse_extraction_body(&response.body)?;
        log_extraction(&extraction);
        Ok(extraction)
    }

    async fn extract_from_image(&self, file: &LoadedFile) -> Result<Extraction, RemoteError> {
        info!("📤 正在上传图片: {} ({} 字节)", file.name, file.bytes.len());

        let upload = UploadPart {
            field: "file",
            file_name: file.name.clone(),
            mime_type: file.mime_type(),
            bytes: file.bytes.clone(),
        };
        let config = self.transport.config();
        let response = self
            .transport
            .post_multipart(&config.image_endpoint, upload)
            .await?;
        let extraction = projection::parse_extraction_body(&response.body)?;
        log_extraction(&extraction);
        Ok(extraction)
    }

    async fn export_current_results(&self) -> Result<ExportFile, RemoteError> {
        info!("📥 正在请求 Excel 导出...");
        let config = self.transport.config();
        let response = self.transport.get(&config.export_endpoint).await?;

        // 没有可下载文件时服务端返回 200 + JSON 错误说明
        if response.is_json() {
            let reason = serde_json::from_slice::<serde_json::Value>(&response.body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| "导出接口返回的不是表格文件".to_string());
            warn!("⚠️ 导出失败: {}", reason);
            return Err(RemoteError::server(reason));
        }

        debug!("导出文件大小: {} 字节", response.body.len());
        Ok(ExportFile {
            file_name: config.export_file_name.clone(),
            bytes: response.body,
        })
    }
}

fn log_extraction(extraction: &Extraction) {
    match &extraction.notice {
        Some(notice) => warn!("⚠️ 提取服务报告: {}", notice),
        None => info!("✓ 提取完成，共 {} 条订单", extraction.results.len()),
    }
}
