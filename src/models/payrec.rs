//! Modelo de PayRec
//!
//! Libro de cobros/pagos de contabilidad, incluidas operaciones por cuenta
//! de terceros (3P).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payrec_tr_type")]
pub enum PayRecType {
    #[sqlx(rename = "RECEIPT")]
    #[serde(rename = "RECEIPT")]
    Receipt,
    #[sqlx(rename = "PAYMENT")]
    #[serde(rename = "PAYMENT")]
    Payment,
    #[sqlx(rename = "DR")]
    #[serde(rename = "DR")]
    Debit,
    #[sqlx(rename = "CR")]
    #[serde(rename = "CR")]
    Credit,
    #[sqlx(rename = "3P_RECEIPT")]
    #[serde(rename = "3P_RECEIPT")]
    ThirdPartyReceipt,
    #[sqlx(rename = "3P_PAYMENT")]
    #[serde(rename = "3P_PAYMENT")]
    ThirdPartyPayment,
}

impl PayRecType {
    pub fn is_third_party(self) -> bool {
        matches!(self, PayRecType::ThirdPartyReceipt | PayRecType::ThirdPartyPayment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payrec_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayRecMode {
    Bank,
    Cash,
    AdjDr,
    AdjCr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payrec_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayRecStatus {
    Active,
    Posted,
    Deleted,
}

/// Parte por cuya cuenta se registra el movimiento
#[derive(Debug, Clone, PartialEq)]
pub struct ForParty {
    pub code: String,
    pub name: Option<String>,
}

/// En operaciones 3P la parte destinataria es obligatoria; en el resto es la
/// propia parte.
pub fn resolve_for_party(
    tr_type: PayRecType,
    party_code: &str,
    party_name: Option<&str>,
    for_party_code: Option<&str>,
    for_party_name: Option<&str>,
) -> AppResult<ForParty> {
    let for_code = for_party_code.map(str::trim).filter(|c| !c.is_empty());

    if tr_type.is_third_party() {
        let code = for_code.ok_or_else(|| {
            AppError::BadRequest("forPartyCode is required for 3P transactions".to_string())
        })?;
        let name = match for_party_name {
            Some(n) => Some(n.to_string()),
            None if code == party_code => party_name.map(str::to_string),
            None => None,
        };
        return Ok(ForParty {
            code: code.to_string(),
            name,
        });
    }

    Ok(ForParty {
        code: party_code.to_string(),
        name: for_party_name.or(party_name).map(str::to_string),
    })
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayRec {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub tr_type: PayRecType,
    pub party_code: String,
    pub party_name: Option<String>,
    pub for_party_code: String,
    pub for_party_name: Option<String>,
    pub mode: PayRecMode,
    pub ref_no: Option<String>,
    pub amount: Decimal,
    pub remarks: Option<String>,
    pub mgr: Option<String>,
    pub status: PayRecStatus,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_party_requires_for_party_code() {
        let err = resolve_for_party(PayRecType::ThirdPartyReceipt, "P01", None, None, None);
        assert!(matches!(err, Err(AppError::BadRequest(_))));

        let blank = resolve_for_party(PayRecType::ThirdPartyPayment, "P01", None, Some("  "), None);
        assert!(blank.is_err());

        let ok = resolve_for_party(
            PayRecType::ThirdPartyReceipt,
            "P01",
            Some("Party"),
            Some("P02"),
            Some("Other"),
        )
        .unwrap();
        assert_eq!(ok.code, "P02");
        assert_eq!(ok.name.as_deref(), Some("Other"));
    }

    #[test]
    fn regular_types_default_to_the_party() {
        let fp = resolve_for_party(PayRecType::Receipt, "P01", Some("Party"), Some("P99"), None)
            .unwrap();
        assert_eq!(fp.code, "P01");
        assert_eq!(fp.name.as_deref(), Some("Party"));
    }

    #[test]
    fn tr_type_wire_names() {
        let t: PayRecType = serde_json::from_str("\"3P_PAYMENT\"").unwrap();
        assert!(t.is_third_party());
        assert_eq!(serde_json::to_string(&PayRecType::Debit).unwrap(), "\"DR\"");
    }
}
