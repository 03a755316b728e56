//! Modelo de Customer
//!
//! Maestro de clientes: dirección de facturación, dos direcciones de entrega,
//! datos fiscales y estado comercial.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del cliente - mapea al ENUM customer_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "customer_status")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub depot_cd: String,
    pub cust_name: String,
    pub cust_cd: String,
    pub emp_cd_mapped: Option<String>,
    pub route_cd_mapped: Option<String>,
    pub bill_add1: Option<String>,
    pub bill_add2: Option<String>,
    pub bill_add3: Option<String>,
    pub bill_area: Option<String>,
    pub bill_city: Option<String>,
    pub bill_pin: Option<String>,
    pub bill_state_cd: Option<String>,
    pub ship_to1_add1: Option<String>,
    pub ship_to1_add2: Option<String>,
    pub ship_to1_add3: Option<String>,
    pub ship_to1_area: Option<String>,
    pub ship_to1_city: Option<String>,
    pub ship_to1_pin: Option<String>,
    pub ship_to1_state_cd: Option<String>,
    pub ship_to2_add1: Option<String>,
    pub ship_to2_add2: Option<String>,
    pub ship_to2_add3: Option<String>,
    pub ship_to2_area: Option<String>,
    pub ship_to2_city: Option<String>,
    pub ship_to2_pin: Option<String>,
    pub ship_to2_state_cd: Option<String>,
    pub gst_no: Option<String>,
    pub pan_no: Option<String>,
    pub peso_lic_no: Option<String>,
    pub trade_lic_no: Option<String>,
    pub status: CustomerStatus,
    pub agreement: bool,
    pub validity: Option<NaiveDate>,
    pub contact_person: Option<String>,
    pub mobile_no: Option<String>,
    pub outstanding_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dirección postal desglosada
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub add1: Option<String>,
    pub add2: Option<String>,
    pub add3: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub pin: Option<String>,
    pub state_cd: Option<String>,
}

fn join_present(parts: &[&Option<String>]) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Address {
    /// Texto imprimible en varias líneas, o `None` si la dirección está vacía
    pub fn formatted(&self) -> Option<String> {
        let lines: Vec<String> = [
            join_present(&[&self.add1, &self.add2, &self.add3]),
            join_present(&[&self.area, &self.city]),
            join_present(&[&self.pin, &self.state_cd]),
        ]
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect();

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// Texto en una sola línea, usado por las facturas
    pub fn single_line(&self) -> String {
        self.formatted().unwrap_or_default().replace('\n', ", ")
    }
}

impl Customer {
    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }

    pub fn bill_address(&self) -> Address {
        Address {
            add1: self.bill_add1.clone(),
            add2: self.bill_add2.clone(),
            add3: self.bill_add3.clone(),
            area: self.bill_area.clone(),
            city: self.bill_city.clone(),
            pin: self.bill_pin.clone(),
            state_cd: self.bill_state_cd.clone(),
        }
    }

    /// Dirección de entrega 1 o 2
    pub fn ship_to(&self, n: u8) -> Address {
        match n {
            1 => Address {
                add1: self.ship_to1_add1.clone(),
                add2: self.ship_to1_add2.clone(),
                add3: self.ship_to1_add3.clone(),
                area: self.ship_to1_area.clone(),
                city: self.ship_to1_city.clone(),
                pin: self.ship_to1_pin.clone(),
                state_cd: self.ship_to1_state_cd.clone(),
            },
            _ => Address {
                add1: self.ship_to2_add1.clone(),
                add2: self.ship_to2_add2.clone(),
                add3: self.ship_to2_add3.clone(),
                area: self.ship_to2_area.clone(),
                city: self.ship_to2_city.clone(),
                pin: self.ship_to2_pin.clone(),
                state_cd: self.ship_to2_state_cd.clone(),
            },
        }
    }

    /// Direcciones de entrega con contenido, ya formateadas
    pub fn ship_to_addresses(&self) -> Vec<String> {
        [1u8, 2]
            .iter()
            .filter_map(|n| self.ship_to(*n).formatted())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn customer() -> Customer {
        Customer {
            id: Uuid::new_v4(),
            depot_cd: "101".to_string(),
            cust_name: "Shree Transport".to_string(),
            cust_cd: "C0001".to_string(),
            emp_cd_mapped: Some("E001".to_string()),
            route_cd_mapped: None,
            bill_add1: Some("12 MG Road".to_string()),
            bill_add2: None,
            bill_add3: None,
            bill_area: Some("Fort".to_string()),
            bill_city: Some("Mumbai".to_string()),
            bill_pin: Some("400001".to_string()),
            bill_state_cd: Some("27".to_string()),
            ship_to1_add1: Some("Plot 7 MIDC".to_string()),
            ship_to1_add2: None,
            ship_to1_add3: None,
            ship_to1_area: Some("Taloja".to_string()),
            ship_to1_city: Some("Navi Mumbai".to_string()),
            ship_to1_pin: Some("410208".to_string()),
            ship_to1_state_cd: Some("27".to_string()),
            ship_to2_add1: Some("Survey 44".to_string()),
            ship_to2_add2: None,
            ship_to2_add3: None,
            ship_to2_area: Some("Vapi GIDC".to_string()),
            ship_to2_city: Some("Vapi".to_string()),
            ship_to2_pin: Some("396195".to_string()),
            ship_to2_state_cd: Some("24".to_string()),
            gst_no: None,
            pan_no: None,
            peso_lic_no: None,
            trade_lic_no: None,
            status: CustomerStatus::Active,
            agreement: true,
            validity: None,
            contact_person: Some("Ravi".to_string()),
            mobile_no: Some("9876543210".to_string()),
            outstanding_amount: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_address_groups_lines() {
        let c = fixtures::customer();
        assert_eq!(
            c.ship_to(1).formatted().unwrap(),
            "Plot 7 MIDC\nTaloja, Navi Mumbai\n410208, 27"
        );
        assert_eq!(c.ship_to_addresses().len(), 2);
    }

    #[test]
    fn empty_address_is_none() {
        assert_eq!(Address::default().formatted(), None);
        assert_eq!(Address::default().single_line(), "");
    }
}
