use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::customer::CustomerStatus;
use crate::utils::validation::{validate_depot_cd, validate_gstin, validate_mobile};

/// Alta de cliente
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: String,
    #[validate(length(min = 1, max = 20))]
    pub cust_name: String,
    #[validate(length(min = 1, max = 8))]
    pub cust_cd: String,
    pub emp_cd_mapped: Option<String>,
    pub route_cd_mapped: Option<String>,
    pub bill_add1: Option<String>,
    pub bill_add2: Option<String>,
    pub bill_add3: Option<String>,
    pub bill_area: Option<String>,
    pub bill_city: Option<String>,
    pub bill_pin: Option<String>,
    #[validate(length(max = 2))]
    pub bill_state_cd: Option<String>,
    pub ship_to1_add1: Option<String>,
    pub ship_to1_add2: Option<String>,
    pub ship_to1_add3: Option<String>,
    pub ship_to1_area: Option<String>,
    pub ship_to1_city: Option<String>,
    pub ship_to1_pin: Option<String>,
    #[validate(length(max = 2))]
    pub ship_to1_state_cd: Option<String>,
    pub ship_to2_add1: Option<String>,
    pub ship_to2_add2: Option<String>,
    pub ship_to2_add3: Option<String>,
    pub ship_to2_area: Option<String>,
    pub ship_to2_city: Option<String>,
    pub ship_to2_pin: Option<String>,
    #[validate(length(max = 2))]
    pub ship_to2_state_cd: Option<String>,
    #[validate(custom = "validate_gstin")]
    pub gst_no: Option<String>,
    #[validate(length(equal = 10))]
    pub pan_no: Option<String>,
    pub peso_lic_no: Option<String>,
    pub trade_lic_no: Option<String>,
    pub status: Option<CustomerStatus>,
    #[serde(default)]
    pub agreement: bool,
    pub validity: Option<NaiveDate>,
    pub contact_person: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub mobile_no: Option<String>,
    pub outstanding_amount: Option<Decimal>,
}

/// Cambios parciales; `custCd` no es editable y no aparece aquí
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(custom = "validate_depot_cd")]
    pub depot_cd: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub cust_name: Option<String>,
    pub emp_cd_mapped: Option<String>,
    pub route_cd_mapped: Option<String>,
    pub bill_add1: Option<String>,
    pub bill_add2: Option<String>,
    pub bill_add3: Option<String>,
    pub bill_area: Option<String>,
    pub bill_city: Option<String>,
    pub bill_pin: Option<String>,
    #[validate(length(max = 2))]
    pub bill_state_cd: Option<String>,
    pub ship_to1_add1: Option<String>,
    pub ship_to1_add2: Option<String>,
    pub ship_to1_add3: Option<String>,
    pub ship_to1_area: Option<String>,
    pub ship_to1_city: Option<String>,
    pub ship_to1_pin: Option<String>,
    #[validate(length(max = 2))]
    pub ship_to1_state_cd: Option<String>,
    pub ship_to2_add1: Option<String>,
    pub ship_to2_add2: Option<String>,
    pub ship_to2_add3: Option<String>,
    pub ship_to2_area: Option<String>,
    pub ship_to2_city: Option<String>,
    pub ship_to2_pin: Option<String>,
    #[validate(length(max = 2))]
    pub ship_to2_state_cd: Option<String>,
    #[validate(custom = "validate_gstin")]
    pub gst_no: Option<String>,
    #[validate(length(equal = 10))]
    pub pan_no: Option<String>,
    pub peso_lic_no: Option<String>,
    pub trade_lic_no: Option<String>,
    pub status: Option<CustomerStatus>,
    pub agreement: Option<bool>,
    pub validity: Option<NaiveDate>,
    pub contact_person: Option<String>,
    #[validate(custom = "validate_mobile")]
    pub mobile_no: Option<String>,
    pub outstanding_amount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListQuery {
    pub q: Option<String>,
    pub depot_cd: Option<String>,
    pub status: Option<CustomerStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cust_cd_is_not_part_of_updates() {
        let req: UpdateCustomerRequest =
            serde_json::from_str(r#"{"custCd":"HACK","status":"Suspended"}"#).unwrap();
        assert_eq!(req.status, Some(CustomerStatus::Suspended));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_requires_three_digit_depot() {
        let req: CreateCustomerRequest = serde_json::from_str(
            r#"{"depotCd":"1","custName":"Shree","custCd":"C0001"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
