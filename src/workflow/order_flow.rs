//! 订单提取流程 - 流程层
//!
//! 核心职责：页面状态机
//!
//! ```text
//! home ⇄ selection ⇄ extraction ⇄ results
//!                        │  submit（成功）  ↑
//!                        └─────────────────┘
//! ```
//!
//! - 所有状态修改都经过具名的跳转函数
//! - 任一远程操作进行中时拒绝新的提交（不排队）
//! - 请求返回时如果页面已经离开，丢弃结果，只释放 in-flight 标志
//! - 不自动重试

use crate::error::{AppResult, RemoteError, TransitionError};
use crate::models::{ExtractionMode, Page, PickedFile};
use crate::services::{DownloadSink, ExtractionGateway, Submission};
use crate::workflow::session::Session;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 提取成功，已跳转到结果页
    Completed { rows: usize },
    /// 提取失败（校验、网络或服务端），停留在提取页
    Failed(RemoteError),
    /// 已有请求在进行，本次提交被忽略
    Busy,
    /// 响应返回时页面已经离开，结果被丢弃
    Stale,
}

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// 已保存到本地
    Saved(PathBuf),
    Failed(RemoteError),
    Busy,
}

/// 订单提取流程
///
/// - 持有会话（唯一可变共享资源）
/// - 决定何时校验、何时调用网关、何时跳转
/// - 克隆得到的是同一个会话的句柄
#[derive(Clone)]
pub struct OrderWorkflow {
    session: Arc<Mutex<Session>>,
    gateway: Arc<dyn ExtractionGateway>,
    sink: Arc<dyn DownloadSink>,
}

impl OrderWorkflow {
    /// 创建新的流程，初始页面为 home
    pub fn new(gateway: Arc<dyn ExtractionGateway>, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            gateway,
            sink,
        }
    }

    /// 当前会话的快照（用于展示）
    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// home → selection
    pub async fn open_selection(&self) -> Result<(), TransitionError> {
        let mut session = self.session.lock().await;
        require_page(&session, Page::Home, "open_selection")?;
        session.navigate(Page::Selection);
        Ok(())
    }

    /// selection → extraction，清空上一轮遗留的输入
    pub async fn choose_mode(&self, mode: ExtractionMode) -> Result<(), TransitionError> {
        let mut session = self.session.lock().await;
        require_page(&session, Page::Selection, "choose_mode")?;
        session.mode = Some(mode);
        session.input.clear();
        session.navigate(Page::Extraction);
        info!("📝 提取方式: {}", mode);
        Ok(())
    }

    /// 返回上一页
    ///
    /// results → extraction 时保留当前结果，直到新的提取成功
    pub async fn back(&self) -> Result<Page, TransitionError> {
        let mut session = self.session.lock().await;
        let target = match session.page {
            Page::Home => return Err(TransitionError::NoPreviousPage),
            Page::Selection => Page::Home,
            Page::Extraction => Page::Selection,
            Page::Results => Page::Extraction,
        };
        session.navigate(target);
        debug!("返回到 {}", target);
        Ok(target)
    }

    /// 替换待提交文本
    pub async fn set_text(&self, text: impl Into<String>) -> Result<(), TransitionError> {
        let mut session = self.session.lock().await;
        require_page(&session, Page::Extraction, "set_text")?;
        session.input.set_text(text);
        Ok(())
    }

    /// 替换待提交文件，`None` 清空选择
    pub async fn set_file(&self, file: Option<PickedFile>) -> Result<(), TransitionError> {
        let mut session = self.session.lock().await;
        require_page(&session, Page::Extraction, "set_file")?;
        session.input.set_file(file);
        Ok(())
    }

    /// 接收拖放的文件（只采用第一个）
    pub async fn accept_drop(&self, files: Vec<PickedFile>) -> Result<(), TransitionError> {
        let mut session = self.session.lock().await;
        require_page(&session, Page::Extraction, "accept_drop")?;
        session.input.accept_drop(files);
        Ok(())
    }

    /// 提交当前输入
    ///
    /// # 返回
    /// - 不在提取页时返回 `TransitionError`
    /// - 其余情况见 `SubmitOutcome`
    pub async fn submit(&self) -> Result<SubmitOutcome, TransitionError> {
        // 校验并占用 in-flight 标志；锁不跨越网络请求
        let (submission, epoch) = {
            let mut session = self.session.lock().await;
            require_page(&session, Page::Extraction, "submit")?;

            if session.in_flight {
                debug!("已有请求在进行，忽略本次提交");
                return Ok(SubmitOutcome::Busy);
            }

            let Some(mode) = session.mode else {
                return Err(TransitionError::NotAllowed {
                    from: Page::Extraction.name(),
                    action: "submit",
                });
            };

            match session.input.validate_for_submit(mode) {
                Ok(submission) => {
                    session.in_flight = true;
                    (submission, session.view_epoch)
                }
                Err(e) => {
                    warn!("⚠️ {}", e);
                    session.last_error = Some(e.clone());
                    return Ok(SubmitOutcome::Failed(e));
                }
            }
        };

        // 图片在这里读入；读取失败属于校验错误，不会到达网关
        let result = match &submission {
            Submission::Text(lines) => self.gateway.extract_from_text(lines).await,
            Submission::Image(file) => match file.load().await {
                Ok(loaded) => self.gateway.extract_from_image(&loaded).await,
                Err(e) => Err(RemoteError::validation(format!(
                    "无法读取文件 {}: {}",
                    file.name(),
                    e
                ))),
            },
        };

        let mut session = self.session.lock().await;
        session.in_flight = false;

        if session.view_epoch != epoch {
            warn!("⚠️ 页面已切换，丢弃过期的提取结果");
            return Ok(SubmitOutcome::Stale);
        }

        match result {
            Ok(extraction) => {
                let rows = extraction.results.len();
                session.last_results = Some(extraction.results);
                session.notice = extraction.notice;
                session.last_error = None;
                session.input.clear();
                session.navigate(Page::Results);
                info!("✓ 提取成功，共 {} 条订单", rows);
                Ok(SubmitOutcome::Completed { rows })
            }
            Err(e) => {
                error!("❌ 提取失败: {}", e);
                session.last_error = Some(e.clone());
                Ok(SubmitOutcome::Failed(e))
            }
        }
    }

    /// 导出服务端最近一次处理的批次并另存为
    ///
    /// 导出内容与本地结果无关；本地保存失败作为 `AppError` 返回
    pub async fn export(&self) -> AppResult<ExportOutcome> {
        let epoch = {
            let mut session = self.session.lock().await;
            require_page(&session, Page::Results, "export")?;
            if session.in_flight {
                debug!("已有请求在进行，忽略本次导出");
                return Ok(ExportOutcome::Busy);
            }
            session.in_flight = true;
            session.view_epoch
        };

        let outcome = match self.gateway.export_current_results().await {
            Ok(file) => self
                .sink
                .save(&file.file_name, &file.bytes)
                .await
                .map(ExportOutcome::Saved),
            Err(e) => Ok(ExportOutcome::Failed(e)),
        };

        let mut session = self.session.lock().await;
        session.in_flight = false;
        if session.view_epoch == epoch {
            match &outcome {
                Ok(ExportOutcome::Saved(_)) => session.last_error = None,
                Ok(ExportOutcome::Failed(e)) => {
                    error!("❌ 导出失败: {}", e);
                    session.last_error = Some(e.clone());
                }
                _ => {}
            }
        }
        outcome
    }
}

fn require_page(
    session: &Session,
    expected: Page,
    action: &'static str,
) -> Result<(), TransitionError> {
    if session.page == expected {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed {
            from: session.page.name(),
            action,
        })
    }
}
