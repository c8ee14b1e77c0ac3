//! 输入采集 - 业务能力层
//!
//! 持有操作员的原始输入（粘贴的文本、选择或拖入的文件），负责提交前的校验。
//! 不访问网络。

use crate::error::RemoteError;
use crate::models::{ExtractionMode, PickedFile};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// 校验通过后交给网关的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// 按空行切分、去掉首尾空白后的非空段落
    Text(Vec<String>),
    Image(PickedFile),
}

/// 输入采集
#[derive(Debug, Clone, Default)]
pub struct InputCapture {
    text: String,
    file: Option<PickedFile>,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换待提交文本（原样保存）
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// 替换待提交文件，传入 `None` 清空选择
    pub fn set_file(&mut self, file: Option<PickedFile>) {
        match &file {
            Some(f) => debug!("已选择文件: {}", f.name()),
            None => debug!("已清空文件选择"),
        }
        self.file = file;
    }

    /// 接收拖放的文件
    ///
    /// 只采用第一个文件，其余静默丢弃；空拖放不改变当前选择
    pub fn accept_drop(&mut self, files: impl IntoIterator<Item = PickedFile>) {
        let mut files = files.into_iter();
        let Some(first) = files.next() else {
            return;
        };
        let discarded = files.count();
        if discarded > 0 {
            debug!("拖放了多个文件，忽略其余 {} 个", discarded);
        }
        self.set_file(Some(first));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file(&self) -> Option<&PickedFile> {
        self.file.as_ref()
    }

    /// 文件显示名
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name())
    }

    /// 清空文本和文件
    pub fn clear(&mut self) {
        self.text.clear();
        self.file = None;
    }

    /// 提交前校验
    ///
    /// # 返回
    /// 校验通过返回对应的 `Submission`，否则返回 validation 错误
    pub fn validate_for_submit(&self, mode: ExtractionMode) -> Result<Submission, RemoteError> {
        match mode {
            ExtractionMode::Text => {
                let lines = segment(&self.text);
                if lines.is_empty() {
                    return Err(RemoteError::validation("empty input: 请输入要提取的文本"));
                }
                Ok(Submission::Text(lines))
            }
            ExtractionMode::Image => match &self.file {
                Some(file) => Ok(Submission::Image(file.clone())),
                None => Err(RemoteError::validation("no file: 请先选择文件")),
            },
        }
    }
}

fn paragraph_break() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").ok()).as_ref()
}

/// 按空行切分文本，去掉每段首尾空白并丢弃空段
pub fn segment(text: &str) -> Vec<String> {
    let paragraphs: Vec<&str> = match paragraph_break() {
        Some(re) => re.split(text).collect(),
        None => vec![text],
    };
    paragraphs
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
