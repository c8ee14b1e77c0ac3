//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 终端前端
//! - 管理应用生命周期（初始化、命令循环、退出统计）
//! - 把提交和导出放到后台任务，完成后重新渲染
//!
//! ### `console` - 命令解析
//!
//! ### `render` - 页面渲染
//! - 只读会话快照，不修改状态
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (命令 → 跳转函数，渲染)
//!     ↓
//! workflow::OrderWorkflow (页面状态机，单请求闸门)
//!     ↓
//! services (能力层：输入采集 / 网关 / 投影 / 下载)
//!     ↓
//! infrastructure (基础设施：HttpTransport)
//! ```

pub mod app;
pub mod console;
pub mod render;

pub use app::App;
