//! 结果投影 - 业务能力层
//!
//! 把服务端的原始响应整理成固定形状的订单行。
//! 投影是全函数：任何输入都能得到完整的 `OrderRecord`，缺失字段用占位符代替。

use crate::error::RemoteError;
use crate::models::{OrderRecord, RawOrder, ResultSet, CASH_ON_DELIVERY, PLACEHOLDER};
use serde_json::Value;

/// 提取响应的形状
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    /// `data` 是数组（可能为空）
    Rows(Vec<Value>),
    /// `data` 缺失、为 null 或不是数组
    Missing,
    /// 服务端在 200 响应里报告了失败：`{ "error": ..., "details": ... }`
    ServiceReported { error: String, details: Option<String> },
}

/// 归一化后的提取结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub results: ResultSet,
    /// 服务端附带的失败说明，仅用于提示
    pub notice: Option<String>,
}

/// 识别响应的形状
pub fn classify(body: &Value) -> PayloadShape {
    match body.get("data") {
        Some(Value::Array(items)) => PayloadShape::Rows(items.clone()),
        Some(Value::Null) | None => match body.get("error") {
            Some(error) => PayloadShape::ServiceReported {
                error: display_value(error).unwrap_or_else(|| PLACEHOLDER.to_string()),
                details: body.get("details").and_then(display_value),
            },
            None => PayloadShape::Missing,
        },
        Some(_) => PayloadShape::Missing,
    }
}

/// 解析提取接口的成功响应体
///
/// `{}`、`{data: null}`、`{data: []}` 都得到空结果；只有无法解析的 JSON 才算错误
pub fn parse_extraction_body(bytes: &[u8]) -> Result<Extraction, RemoteError> {
    let body: Value = serde_json::from_slice(bytes)
        .map_err(|e| RemoteError::server(format!("无法解析提取服务的响应: {}", e)))?;

    let extraction = match classify(&body) {
        PayloadShape::Rows(items) => Extraction {
            results: items
                .into_iter()
                .map(|item| project(&RawOrder::from_value(item)))
                .collect(),
            notice: None,
        },
        PayloadShape::Missing => Extraction::default(),
        PayloadShape::ServiceReported { error, details } => Extraction {
            results: ResultSet::default(),
            notice: Some(match details {
                Some(details) => format!("{}: {}", error, details),
                None => error,
            }),
        },
    };
    Ok(extraction)
}

/// 投影单个订单
pub fn project(raw: &RawOrder) -> OrderRecord {
    let payment_terms = field(raw.payment_terms.as_ref());
    OrderRecord {
        product: field(raw.product.as_ref()),
        quantity: quantity(raw.quantity.as_ref()),
        shipping_address: field(raw.shipping_address.as_ref()),
        customer_name: field(raw.customer_name.as_ref()),
        phone: field(raw.phone.as_ref()),
        company: field(raw.company.as_ref()),
        delivery_date: field(raw.delivery_date.as_ref()),
        cash_on_delivery: payment_terms == CASH_ON_DELIVERY,
        payment_terms,
        remarks: field(raw.remarks.as_ref()),
    }
}

fn field(value: Option<&Value>) -> String {
    value
        .and_then(display_value)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

// 没有数量为 0 的订单，0 按缺失处理
fn quantity(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) if s.trim().parse::<f64>().ok() == Some(0.0) => {
            PLACEHOLDER.to_string()
        }
        other => field(other),
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}
