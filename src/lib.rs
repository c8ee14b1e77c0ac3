//! # Order Extract Client
//!
//! 订单提取客户端：把文本或扫描图片提交给远程提取服务，查看并导出结构化的订单结果
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端），只暴露能力
//! - `HttpTransport` - 唯一的 client owner，提供 post_json / post_multipart / get
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `InputCapture` - 输入采集与提交前校验
//! - `ExtractionGateway` - 文本提取 / 图片提取 / Excel 导出
//! - `projection` - 原始响应 → 订单行
//! - `DownloadSink` - 另存为
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 页面状态机
//! - `Session` - 一次访问的全部瞬时状态
//! - `OrderWorkflow` - 跳转函数、单请求闸门、过期响应保护
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 终端前端：命令循环与页面渲染
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, RemoteError, RemoteErrorKind, TransitionError};
pub use infrastructure::HttpTransport;
pub use models::{
    ExtractionMode, LoadedFile, OrderRecord, Page, PickedFile, RawOrder, ResultSet, PLACEHOLDER,
};
pub use orchestrator::App;
pub use services::{DownloadSink, ExtractionGateway, FileDownloadSink, RemoteGateway};
pub use workflow::{ExportOutcome, OrderWorkflow, Session, SubmitOutcome};
