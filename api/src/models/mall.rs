//! Points mall: products, categories, redemptions and their statistics.
//!
//! Product and redemption states travel as integers on the wire.

use serde::Deserialize;
use serde::Serialize;

use super::common::DEFAULT_PAGE_SIZE;
use super::common::UnknownCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ProductStatus {
    Offline,
    Online,
}

impl TryFrom<i32> for ProductStatus {
    type Error = UnknownCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProductStatus::Offline),
            1 => Ok(ProductStatus::Online),
            code => Err(UnknownCode {
                kind: "product status",
                code,
            }),
        }
    }
}

impl From<ProductStatus> for i32 {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::Offline => 0,
            ProductStatus::Online => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum RedemptionStatus {
    Pending,
    Verified,
    Cancelled,
}

impl TryFrom<i32> for RedemptionStatus {
    type Error = UnknownCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RedemptionStatus::Pending),
            1 => Ok(RedemptionStatus::Verified),
            2 => Ok(RedemptionStatus::Cancelled),
            code => Err(UnknownCode {
                kind: "redemption status",
                code,
            }),
        }
    }
}

impl From<RedemptionStatus> for i32 {
    fn from(status: RedemptionStatus) -> Self {
        match status {
            RedemptionStatus::Pending => 0,
            RedemptionStatus::Verified => 1,
            RedemptionStatus::Cancelled => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub points_required: i64,
    #[serde(default)]
    pub stock: u32,
    pub image_url: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub status: ProductStatus,
    pub status_text: Option<String>,
    pub stock_warning: Option<u32>,
    #[serde(default)]
    pub can_redeem: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Product {
    pub fn low_on_stock(&self) -> bool {
        self.stock_warning.is_some_and(|warning| self.stock <= warning)
    }
}

/// Product listing filters. Unlike the other searches the page fields sit
/// next to the filters instead of wrapping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub page_num: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<i64>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: DEFAULT_PAGE_SIZE,
            keyword: None,
            category_id: None,
            status: None,
            min_points: None,
            max_points: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub points_required: i64,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_warning: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_required: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_warning: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub user_username: Option<String>,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub product_image_url: Option<String>,
    #[serde(default)]
    pub points_spent: i64,
    pub voucher_code: String,
    pub status: RedemptionStatus,
    pub status_text: Option<String>,
    pub verified_by: Option<i64>,
    pub verified_by_name: Option<String>,
    pub verified_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub can_cancel: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RedemptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRequest {
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRedemptionRequest {
    pub voucher_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// Optional `yyyy-MM-dd` bounds of the mall statistics and export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn between(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedemptionStatistics {
    pub total_redemptions: u64,
    pub total_points_spent: i64,
    pub pending_redemptions: u64,
    pub verified_redemptions: u64,
    pub cancelled_redemptions: u64,
    pub today_redemptions: u64,
    pub week_redemptions: u64,
    pub month_redemptions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRanking {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub product_image_url: Option<String>,
    pub category_name: Option<String>,
    #[serde(default)]
    pub redemption_count: u64,
    #[serde(default)]
    pub total_points_spent: i64,
    #[serde(default)]
    pub current_stock: u32,
    pub rank: u32,
}
