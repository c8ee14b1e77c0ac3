//! 页面与提取方式

use std::fmt;

/// 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Selection,
    Extraction,
    Results,
}

impl Page {
    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Selection => "selection",
            Page::Extraction => "extraction",
            Page::Results => "results",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionMode {
    Text,
    Image,
}

impl ExtractionMode {
    pub fn name(self) -> &'static str {
        match self {
            ExtractionMode::Text => "text",
            ExtractionMode::Image => "image",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
