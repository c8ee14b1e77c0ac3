//! 终端前端 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建 HTTP 传输、网关、下载目录和流程
//! 2. **命令循环**：读取操作员命令，调用流程的跳转函数
//! 3. **异步提交**：提交和导出在后台任务中进行，期间仍可输入其他命令
//! 4. **页面渲染**：每次状态变化后重新渲染当前页面

use crate::config::Config;
use crate::error::{AppResult, TransitionError};
use crate::infrastructure::HttpTransport;
use crate::models::{ExtractionMode, PickedFile};
use crate::orchestrator::console::{self, Command, PASTE_TERMINATOR};
use crate::orchestrator::render;
use crate::services::{FileDownloadSink, RemoteGateway};
use crate::utils::logging;
use crate::workflow::{ExportOutcome, OrderWorkflow, SubmitOutcome};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// 后台任务的完成通知
enum TaskReport {
    Submitted(Result<SubmitOutcome, TransitionError>),
    Exported(AppResult<ExportOutcome>),
}

/// 会话统计
#[derive(Debug, Default)]
struct SessionStats {
    submissions: usize,
    succeeded: usize,
    exports: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    workflow: OrderWorkflow,
    stats: SessionStats,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config);

        let gateway = RemoteGateway::new(HttpTransport::new(&config));
        let sink = FileDownloadSink::new(&config.download_dir);
        let workflow = OrderWorkflow::new(Arc::new(gateway), Arc::new(sink));

        Self {
            config,
            workflow,
            stats: SessionStats::default(),
        }
    }

    /// 运行命令循环，直到 quit 或输入结束
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let (report_tx, mut report_rx) = mpsc::unbounded_channel::<TaskReport>();
        let mut paste: Option<Vec<String>> = None;

        self.show().await;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };

                    if let Some(buffer) = paste.as_mut() {
                        if line.trim() == PASTE_TERMINATOR {
                            let text = buffer.join("\n");
                            paste = None;
                            self.report_transition(self.workflow.set_text(text).await);
                            self.show().await;
                        } else {
                            buffer.push(line);
                        }
                        continue;
                    }

                    match console::parse(&line) {
                        Ok(Command::Quit) => break,
                        Ok(Command::Paste) => {
                            println!("粘贴文本，单独一行 {} 结束：", PASTE_TERMINATOR);
                            paste = Some(Vec::new());
                        }
                        Ok(command) => self.dispatch(command, &report_tx).await,
                        Err(message) if message.is_empty() => {}
                        Err(message) => println!("{}", message),
                    }
                }
                Some(report) = report_rx.recv() => {
                    self.on_report(report);
                    self.show().await;
                }
            }
        }

        logging::log_session_summary(
            self.stats.submissions,
            self.stats.succeeded,
            self.stats.exports,
        );
        Ok(())
    }

    async fn dispatch(&mut self, command: Command, report_tx: &mpsc::UnboundedSender<TaskReport>) {
        let workflow = self.workflow.clone();
        match command {
            Command::Start => self.report_transition(workflow.open_selection().await),
            Command::Text => self.report_transition(workflow.choose_mode(ExtractionMode::Text).await),
            Command::Image => self.report_transition(workflow.choose_mode(ExtractionMode::Image).await),
            Command::Back => self.report_transition(workflow.back().await.map(|_| ())),
            Command::Type(text) => self.report_transition(workflow.set_text(text).await),
            Command::File(path) => {
                if !path.exists() {
                    warn!("⚠️ 文件不存在: {}", path.display());
                }
                self.report_transition(workflow.set_file(Some(PickedFile::from_path(&path))).await)
            }
            Command::Drop(paths) => {
                let files = paths.iter().map(|p| PickedFile::from_path(p)).collect();
                self.report_transition(workflow.accept_drop(files).await)
            }
            Command::Clear => {
                let cleared = match workflow.set_text(String::new()).await {
                    Ok(()) => workflow.set_file(None).await,
                    Err(e) => Err(e),
                };
                self.report_transition(cleared)
            }
            Command::Submit => {
                let snapshot = workflow.snapshot().await;
                if snapshot.in_flight {
                    println!("⏳ 上一个请求尚未完成，请稍候");
                    return;
                }
                self.stats.submissions += 1;
                let tx = report_tx.clone();
                tokio::spawn(async move {
                    let outcome = workflow.submit().await;
                    let _ = tx.send(TaskReport::Submitted(outcome));
                });
            }
            Command::Export => {
                let tx = report_tx.clone();
                tokio::spawn(async move {
                    let outcome = workflow.export().await;
                    let _ = tx.send(TaskReport::Exported(outcome));
                });
            }
            Command::Show => {}
            Command::Status => {
                let snapshot = workflow.snapshot().await;
                println!(
                    "页面: {} | 方式: {} | 处理中: {} | 服务: {}",
                    snapshot.page,
                    snapshot.mode.map(|m| m.name()).unwrap_or("-"),
                    snapshot.in_flight,
                    self.config.api_base_url
                );
                return;
            }
            Command::Help => {
                println!("{}", HELP);
                return;
            }
            Command::Paste | Command::Quit => return,
        }
        self.show().await;
    }

    fn on_report(&mut self, report: TaskReport) {
        match report {
            TaskReport::Submitted(Ok(SubmitOutcome::Completed { rows })) => {
                self.stats.succeeded += 1;
                info!("✓ 提取完成: {} 条订单", rows);
            }
            TaskReport::Submitted(Ok(SubmitOutcome::Failed(_))) => {}
            TaskReport::Submitted(Ok(SubmitOutcome::Busy)) => {
                println!("⏳ 上一个请求尚未完成，请稍候");
            }
            TaskReport::Submitted(Ok(SubmitOutcome::Stale)) => {
                info!("页面已切换，提取结果未显示");
            }
            TaskReport::Submitted(Err(e)) => println!("{}", e),
            TaskReport::Exported(Ok(ExportOutcome::Saved(path))) => {
                self.stats.exports += 1;
                println!("💾 已下载: {}", path.display());
            }
            TaskReport::Exported(Ok(ExportOutcome::Failed(_))) => {}
            TaskReport::Exported(Ok(ExportOutcome::Busy)) => {
                println!("⏳ 上一个请求尚未完成，请稍候");
            }
            TaskReport::Exported(Err(e)) => error!("❌ 导出保存失败: {}", e),
        }
    }

    fn report_transition(&self, result: Result<(), TransitionError>) {
        if let Err(e) = result {
            println!("{}", e);
        }
    }

    async fn show(&self) {
        let snapshot = self.workflow.snapshot().await;
        print!("{}", render::render_page(&snapshot));
    }
}

const HELP: &str = "\
命令:
  start                 开始（首页）
  text | image          选择提取方式（选择页）
  type <文本>           输入单行文本
  paste                 粘贴多行文本，单独一行 . 结束
  file <路径>           选择文件
  drop <路径>...        拖放文件（只采用第一个）
  clear                 清空输入
  submit                提交提取
  export                下载 Excel（结果页）
  back                  返回上一页
  show | status | help | quit";
