//! Renderizado de facturas en PDF
//!
//! Formato A4 fijo: cabecera con la marca de la empresa, rejilla de la
//! parte, tabla de líneas con fila de total, importe en letras, datos
//! bancarios, firmas y nota de jurisdicción.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};
use rust_decimal::Decimal;

use crate::config::{BankDetails, CompanyBranding};
use crate::models::invoice::Invoice;
use crate::services::invoice_builder::amount_in_words;
use crate::utils::errors::{AppError, AppResult};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 12.0;
const ROW_H: f32 = 7.0;

/// Contexto de impresión independiente de la factura
pub struct PdfBranding<'a> {
    pub company: &'a CompanyBranding,
    pub bank: &'a BankDetails,
    pub note: &'a str,
}

struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas {
    fn text(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.regular);
    }

    fn bold(&self, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.bold);
    }

    /// Rectángulo con la esquina inferior izquierda en (x, y)
    fn rect(&self, x: f32, y: f32, w: f32, h: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(y)), false),
                (Point::new(Mm(x + w), Mm(y)), false),
                (Point::new(Mm(x + w), Mm(y + h)), false),
                (Point::new(Mm(x), Mm(y + h)), false),
            ],
            is_closed: true,
        });
    }

    fn hline(&self, x1: f32, x2: f32, y: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn vline(&self, x: f32, y1: f32, y2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(y1)), false),
                (Point::new(Mm(x), Mm(y2)), false),
            ],
            is_closed: false,
        });
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn qty(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Cortar texto largo para que quepa en una celda
fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        clipped.push_str("...");
        clipped
    }
}

/// Renderizar una factura almacenada a bytes PDF
pub fn render_invoice(invoice: &Invoice, branding: &PdfBranding<'_>) -> AppResult<Vec<u8>> {
    let title = format!("Invoice {}", invoice.invoice_no);
    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Pdf(format!("{:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Pdf(format!("{:?}", e)))?;

    let canvas = Canvas {
        layer: doc.get_page(page).get_layer(layer),
        regular,
        bold,
    };
    canvas.layer.set_outline_thickness(0.6);

    let right = PAGE_W - MARGIN;
    let width = right - MARGIN;
    let mut y = PAGE_H - MARGIN;

    // Cabecera
    canvas.bold("Delivery cum Sales Invoice", 11.0, 75.0, y - 4.0);
    y -= 12.0;
    let company_line = format!("{} {}", branding.company.name, branding.company.suffix);
    canvas.bold(company_line.trim(), 16.0, MARGIN, y);
    y -= 6.0;
    if !branding.company.address.is_empty() {
        canvas.text(&clip(&branding.company.address, 110), 8.5, MARGIN, y);
        y -= 4.5;
    }
    let contact = [
        ("Ph", &branding.company.phone),
        ("Email", &branding.company.email),
        ("Web", &branding.company.web),
    ]
    .iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(k, v)| format!("{}: {}", k, v))
    .collect::<Vec<_>>()
    .join("   ");
    if !contact.is_empty() {
        canvas.text(&contact, 8.5, MARGIN, y);
        y -= 4.5;
    }
    y -= 2.0;
    canvas.hline(MARGIN, right, y);

    // Rejilla de la parte
    let customer = &invoice.customer_snap;
    let vehicle = &invoice.vehicle_snap;
    let grid_h = 5.0 * ROW_H;
    let mid = MARGIN + width * 0.6;
    y -= grid_h + 2.0;
    canvas.rect(MARGIN, y, width, grid_h);
    canvas.vline(mid, y, y + grid_h);

    let left_rows = [
        ("Party", customer.cust_name.clone()),
        ("Address", clip(&customer.address, 60)),
        ("Ship To", clip(&customer.ship_to.replace('\n', ", "), 60)),
        ("Party Code", customer.cust_cd.clone()),
        ("GSTIN", customer.gst_no.clone().unwrap_or_default()),
    ];
    let right_rows = [
        ("DC No", invoice.dc_number.clone().unwrap_or_default()),
        ("Invoice No", invoice.invoice_no.clone()),
        ("Date", invoice.invoice_date.format("%d-%m-%Y").to_string()),
        ("Depot", customer.depot_cd.clone()),
        ("Vehicle", vehicle.vehicle_no.clone()),
    ];
    for (i, ((lk, lv), (rk, rv))) in left_rows.iter().zip(right_rows.iter()).enumerate() {
        let row_y = y + grid_h - (i as f32 + 1.0) * ROW_H + 2.2;
        canvas.bold(lk, 8.0, MARGIN + 2.0, row_y);
        canvas.text(lv, 8.0, MARGIN + 24.0, row_y);
        canvas.bold(rk, 8.0, mid + 2.0, row_y);
        canvas.text(rv, 8.0, mid + 22.0, row_y);
    }

    // Tabla de líneas
    let cols = [MARGIN, MARGIN + 70.0, MARGIN + 100.0, MARGIN + 120.0, MARGIN + 150.0, right];
    let headers = ["Description", "Quantity", "Per", "Unit Rate", "Amount"];
    let rows = invoice.items.len() + 2;
    let table_h = rows as f32 * ROW_H;
    y -= table_h + 4.0;
    canvas.rect(MARGIN, y, width, table_h);
    for x in &cols[1..cols.len() - 1] {
        canvas.vline(*x, y, y + table_h);
    }
    let header_y = y + table_h - ROW_H;
    canvas.hline(MARGIN, right, header_y);
    for (i, header) in headers.iter().enumerate() {
        canvas.bold(header, 8.5, cols[i] + 2.0, header_y + 2.2);
    }

    let mut row_y = header_y;
    for item in invoice.items.iter() {
        row_y -= ROW_H;
        let cells = [
            clip(&item.product_name, 38),
            qty(item.qty),
            item.uom.clone(),
            money(item.rate),
            money(item.amount),
        ];
        for (i, cell) in cells.iter().enumerate() {
            canvas.text(cell, 8.5, cols[i] + 2.0, row_y + 2.2);
        }
    }
    canvas.hline(MARGIN, right, y + ROW_H);
    let total_qty: Decimal = invoice.items.iter().map(|i| i.qty).sum();
    canvas.bold("Total", 8.5, cols[0] + 2.0, y + 2.2);
    canvas.bold(&qty(total_qty), 8.5, cols[1] + 2.0, y + 2.2);
    canvas.bold(&money(invoice.total_amount), 8.5, cols[4] + 2.0, y + 2.2);

    // Importe en letras
    y -= 8.0;
    canvas.bold("Amount in words:", 8.5, MARGIN, y);
    canvas.text(&amount_in_words(invoice.total_amount), 8.5, MARGIN + 28.0, y);

    // Datos bancarios
    let bank = branding.bank;
    let bank_rows = [
        ("Bank", bank.bank_name.as_str()),
        ("A/c Name", bank.account_name.as_str()),
        ("A/c No", bank.account_no.as_str()),
        ("IFSC", bank.ifsc.as_str()),
        ("Branch", bank.branch.as_str()),
    ];
    let bank_h = bank_rows.len() as f32 * 5.5 + 3.0;
    y -= bank_h + 4.0;
    canvas.rect(MARGIN, y, width * 0.5, bank_h);
    for (i, (k, v)) in bank_rows.iter().enumerate() {
        let line_y = y + bank_h - (i as f32 + 1.0) * 5.5;
        canvas.bold(k, 8.0, MARGIN + 2.0, line_y);
        canvas.text(v, 8.0, MARGIN + 22.0, line_y);
    }

    // Firmas
    y -= 24.0;
    canvas.text("Customer's Signature", 8.5, MARGIN, y);
    let signatory = format!("For {}", branding.company.name);
    canvas.bold(&signatory, 8.5, right - 60.0, y + 12.0);
    canvas.text("Authorised Signatory", 8.5, right - 60.0, y);
    if let Some(driver) = vehicle.driver_name.as_deref() {
        canvas.text(&format!("Driver: {}", driver), 8.0, MARGIN + 70.0, y);
    }

    y -= 10.0;
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.is_empty()) {
        canvas.text(&clip(notes, 120), 8.0, MARGIN, y);
        y -= 5.0;
    }
    canvas.text(branding.note, 8.0, MARGIN, y);

    doc.save_to_bytes()
        .map_err(|e| AppError::Pdf(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::{CustomerSnapshot, InvoiceItem, OrderSnapshot, VehicleSnapshot};
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn invoice() -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            invoice_no: "INV000007-01".to_string(),
            invoice_date: Utc::now(),
            trip_id: None,
            delivery_id: None,
            customer_id: None,
            order_id: None,
            customer_snap: Json(CustomerSnapshot {
                cust_cd: "C0001".to_string(),
                cust_name: "Shree Transport".to_string(),
                address: "12 MG Road, Fort, Mumbai".to_string(),
                ship_to: "Plot 7 MIDC\nTaloja".to_string(),
                depot_cd: "101".to_string(),
                ..CustomerSnapshot::default()
            }),
            order_snap: Json(OrderSnapshot::default()),
            vehicle_snap: Json(VehicleSnapshot {
                vehicle_no: "MH04AB1234".to_string(),
                trip_no: "TRIP-007".to_string(),
                driver_name: Some("Sunil".to_string()),
            }),
            items: Json(vec![InvoiceItem {
                product_name: "diesel".to_string(),
                uom: "Liter".to_string(),
                qty: Decimal::new(1000, 0),
                rate: Decimal::new(9250, 2),
                amount: Decimal::new(92500, 0),
            }]),
            sub_total: Decimal::new(92500, 0),
            total_amount: Decimal::new(92500, 0),
            dc_number: Some("DC-1700000000000".to_string()),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn renders_pdf_bytes() {
        let company = CompanyBranding {
            name: "Fuel Logistics".to_string(),
            suffix: "Pvt Ltd".to_string(),
            ..CompanyBranding::default()
        };
        let bank = BankDetails::default();
        let branding = PdfBranding {
            company: &company,
            bank: &bank,
            note: "Subject to Mumbai Jurisdiction",
        };

        let bytes = render_invoice(&invoice(), &branding).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn clip_shortens_long_text() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long address line", 10), "a very ...");
    }
}
