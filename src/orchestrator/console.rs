//! 终端命令解析

use std::path::PathBuf;

/// 操作员命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// home → selection
    Start,
    /// 选择文本提取
    Text,
    /// 选择图片提取
    Image,
    Back,
    /// 单行文本输入
    Type(String),
    /// 多行粘贴，单独一行 `.` 结束
    Paste,
    /// 选择文件
    File(PathBuf),
    /// 拖放文件（只采用第一个）
    Drop(Vec<PathBuf>),
    /// 清空文本和文件
    Clear,
    Submit,
    Export,
    Show,
    Status,
    Help,
    Quit,
}

/// 多行粘贴的结束标记
pub const PASTE_TERMINATOR: &str = ".";

/// 解析一行输入
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "text" => Command::Text,
        "image" => Command::Image,
        "back" => Command::Back,
        "type" => Command::Type(rest.to_string()),
        "paste" => Command::Paste,
        "file" if !rest.is_empty() => Command::File(PathBuf::from(rest)),
        "file" => return Err("用法: file <路径>".to_string()),
        "drop" => Command::Drop(rest.split_whitespace().map(PathBuf::from).collect()),
        "clear" => Command::Clear,
        "submit" => Command::Submit,
        "export" | "download" => Command::Export,
        "show" => Command::Show,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err(String::new()),
        other => return Err(format!("未知命令: {}（输入 help 查看帮助）", other)),
    };
    Ok(command)
}
