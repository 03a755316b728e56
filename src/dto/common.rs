use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

/// Página y tamaño ya acotados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Página mínima 1 y tamaño entre 1 y 200
    pub fn resolve(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Número de páginas, al menos 1
    pub fn pages(&self, total: i64) -> i64 {
        ((total + self.limit - 1) / self.limit).max(1)
    }
}

/// Respuesta paginada `{data, page, pages, total}`
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub page: i64,
    pub pages: i64,
    pub total: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, page: Page, total: i64) -> Self {
        Self {
            data,
            page: page.page,
            pages: page.pages(total),
            total,
        }
    }
}

/// Respuesta de los borrados físicos
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub ok: bool,
    pub id: uuid::Uuid,
}

impl DeletedResponse {
    pub fn new(id: uuid::Uuid) -> Self {
        Self { ok: true, id }
    }
}

/// Interpretar un filtro de enum de la query string
///
/// Vacío o `ALL` significa sin filtro; un valor desconocido es un 400.
pub fn parse_enum_filter<T: DeserializeOwned>(raw: Option<&str>, field: &str) -> AppResult<Option<T>> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(v) if v.eq_ignore_ascii_case("ALL") => return Ok(None),
        Some(v) => v.to_ascii_uppercase(),
    };

    serde_json::from_value(serde_json::Value::String(value.clone()))
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid {} '{}'", field, value)))
}

/// Filtro de fecha ISO opcional; un valor mal formado es un 400
pub fn parse_date_filter(raw: Option<&str>, field: &str) -> AppResult<Option<chrono::NaiveDate>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => crate::utils::validation::validate_date(v)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be an ISO date (YYYY-MM-DD)", field))),
        None => Ok(None),
    }
}

/// Id opcional tolerante: un valor vacío o mal formado se descarta
pub fn lenient_id(raw: Option<&str>) -> Option<uuid::Uuid> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| uuid::Uuid::parse_str(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment::PaymentStatus;

    #[test]
    fn paging_is_clamped() {
        let p = Page::resolve(Some(0), Some(1000), DEFAULT_PAGE_SIZE);
        assert_eq!(p, Page { page: 1, limit: 200 });
        assert_eq!(p.offset(), 0);

        let p = Page::resolve(Some(3), Some(20), DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.pages(41), 3);
        assert_eq!(p.pages(0), 1);
    }

    #[test]
    fn enum_filters() {
        let s: Option<PaymentStatus> = parse_enum_filter(Some("submitted"), "status").unwrap();
        assert_eq!(s, Some(PaymentStatus::Submitted));
        let s: Option<PaymentStatus> = parse_enum_filter(Some("ALL"), "status").unwrap();
        assert_eq!(s, None);
        let bad: AppResult<Option<PaymentStatus>> = parse_enum_filter(Some("nope"), "status");
        assert!(matches!(bad, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn date_filters() {
        assert_eq!(parse_date_filter(None, "from").unwrap(), None);
        assert_eq!(
            parse_date_filter(Some("2025-03-01"), "from").unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert!(matches!(
            parse_date_filter(Some("01/03/2025"), "from"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn lenient_ids_drop_garbage() {
        assert!(lenient_id(Some("not-an-id")).is_none());
        assert!(lenient_id(Some("")).is_none());
        let id = uuid::Uuid::new_v4();
        assert_eq!(lenient_id(Some(&id.to_string())), Some(id));
    }
}
