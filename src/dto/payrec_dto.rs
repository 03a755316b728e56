use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::payrec::{PayRec, PayRecMode, PayRecStatus, PayRecType};
use crate::utils::validation::validate_non_negative_decimal;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayRecRequest {
    pub date: Option<DateTime<Utc>>,
    pub tr_type: PayRecType,
    #[validate(length(min = 1))]
    pub party_code: String,
    pub party_name: Option<String>,
    pub for_party_code: Option<String>,
    pub for_party_name: Option<String>,
    pub mode: PayRecMode,
    pub ref_no: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub amount: Decimal,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
    #[validate(length(max = 100))]
    pub mgr: Option<String>,
    pub status: Option<PayRecStatus>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayRecRequest {
    pub date: Option<DateTime<Utc>>,
    pub tr_type: Option<PayRecType>,
    #[validate(length(min = 1))]
    pub party_code: Option<String>,
    pub party_name: Option<String>,
    pub for_party_code: Option<String>,
    pub for_party_name: Option<String>,
    pub mode: Option<PayRecMode>,
    pub ref_no: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub amount: Option<Decimal>,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
    #[validate(length(max = 100))]
    pub mgr: Option<String>,
    pub status: Option<PayRecStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePayRecStatusRequest {
    pub status: Option<PayRecStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRecListQuery {
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub tr_type: Option<String>,
    pub mode: Option<String>,
    pub party_code: Option<String>,
    pub for_party_code: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `{page, limit, total, items}`
#[derive(Debug, Serialize)]
pub struct PayRecListResponse {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub items: Vec<PayRec>,
}

#[derive(Debug, Serialize)]
pub struct PayRecDeletedResponse {
    pub deleted: bool,
    pub soft: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PayRecRestoredResponse {
    pub restored: bool,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_code_is_required() {
        let req: CreatePayRecRequest = serde_json::from_str(
            r#"{"trType":"RECEIPT","partyCode":"","mode":"BANK","amount":"10"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn third_party_types_parse() {
        let req: CreatePayRecRequest = serde_json::from_str(
            r#"{"trType":"3P_RECEIPT","partyCode":"P01","forPartyCode":"P02","mode":"ADJ_DR","amount":"10"}"#,
        )
        .unwrap();
        assert!(req.tr_type.is_third_party());
        assert_eq!(req.mode, PayRecMode::AdjDr);
        assert!(req.validate().is_ok());
    }
}
