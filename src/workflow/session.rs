//! 会话状态
//!
//! 一次操作员访问的全部瞬时状态，只由 `OrderWorkflow` 修改，不做持久化

use crate::error::RemoteError;
use crate::models::{ExtractionMode, Page, ResultSet};
use crate::services::InputCapture;

/// 会话
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// 当前页面
    pub page: Page,

    /// 选择的提取方式
    pub mode: Option<ExtractionMode>,

    /// 待提交的文本和文件
    pub input: InputCapture,

    /// 最近一次错误（单槽位，新错误覆盖旧错误）
    pub last_error: Option<RemoteError>,

    /// 服务端在成功响应里附带的失败说明
    pub notice: Option<String>,

    /// 是否有远程操作在进行
    pub in_flight: bool,

    /// 最近一次成功的结果；`None` 表示尚未处理过
    pub last_results: Option<ResultSet>,

    /// 页面版本号，每次跳转递增
    pub view_epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        self.page == Page::Extraction && !self.in_flight
    }

    /// 跳转页面并使之前页面上发起的请求失效
    pub(crate) fn navigate(&mut self, page: Page) {
        self.page = page;
        self.view_epoch = self.view_epoch.wrapping_add(1);
    }
}
