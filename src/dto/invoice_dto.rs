use serde::{Deserialize, Serialize};

use crate::models::invoice::NewInvoice;

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListQuery {
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Notas opcionales al generar la factura agregada
#[derive(Debug, Default, Deserialize)]
pub struct FromTripRequest {
    pub notes: Option<String>,
}

/// Borrador de factura agregada con el importe en letras
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePrefill {
    #[serde(flatten)]
    pub invoice: NewInvoice,
    pub amount_in_words: String,
}
