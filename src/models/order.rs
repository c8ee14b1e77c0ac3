//! 订单数据模型
//!
//! - `RawOrder`：服务端返回的原始字段（全部可缺省，类型松散）
//! - `OrderRecord`：投影后的展示行，每个字段都有值
//! - `ResultSet`：一次提取得到的有序结果

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 缺失字段的占位符
pub const PLACEHOLDER: &str = "unknown";

/// 触发货到付款标记的付款方式字面量（区分大小写）
pub const CASH_ON_DELIVERY: &str = "COD";

/// 服务端返回的原始订单
///
/// 字段类型保持为 `Value`，数量等字段既可能是数字也可能是 "10 packs" 这样的字符串
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<Value>,
}

impl RawOrder {
    /// 从任意 JSON 值构造；非对象（或字段类型完全不符）时得到全空订单
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// 投影后的订单行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub product: String,
    pub quantity: String,
    pub shipping_address: String,
    pub customer_name: String,
    pub phone: String,
    pub company: String,
    pub delivery_date: String,
    pub payment_terms: String,
    pub remarks: String,
    /// 付款方式恰好为 `COD`，仅供展示层使用
    pub cash_on_delivery: bool,
}

impl OrderRecord {
    /// 表头顺序与 `cells()` 一致
    pub const COLUMNS: [&'static str; 9] = [
        "Product",
        "Quantity",
        "Address",
        "Customer",
        "Phone",
        "Company",
        "Delivery",
        "Payment",
        "Remarks",
    ];

    pub fn cells(&self) -> [&str; 9] {
        [
            &self.product,
            &self.quantity,
            &self.shipping_address,
            &self.customer_name,
            &self.phone,
            &self.company,
            &self.delivery_date,
            &self.payment_terms,
            &self.remarks,
        ]
    }
}

impl From<&OrderRecord> for RawOrder {
    fn from(record: &OrderRecord) -> Self {
        let text = |s: &str| Some(Value::String(s.to_string()));
        RawOrder {
            product: text(&record.product),
            quantity: text(&record.quantity),
            shipping_address: text(&record.shipping_address),
            customer_name: text(&record.customer_name),
            phone: text(&record.phone),
            company: text(&record.company),
            delivery_date: text(&record.delivery_date),
            payment_terms: text(&record.payment_terms),
            remarks: text(&record.remarks),
        }
    }
}

/// 一次提取的结果集合，顺序与服务端响应一致
///
/// 空集合表示"已处理但没有提取到订单"，与"尚未处理"（`Option::None`）不同
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<OrderRecord>,
}

impl ResultSet {
    pub fn rows(&self) -> &[OrderRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.rows.iter()
    }
}

impl FromIterator<OrderRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = OrderRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a OrderRecord;
    type IntoIter = std::slice::Iter<'a, OrderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
