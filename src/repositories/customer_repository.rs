use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::customer_dto::{CreateCustomerRequest, CustomerListQuery, UpdateCustomerRequest};
use crate::models::customer::{Customer, CustomerStatus};
use crate::utils::errors::{AppError, AppResult};

/// Cliente dentro de una transacción (pedidos, entregas, facturas)
pub async fn find_in_tx(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(customer)
}

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado con filtros; `depot_scope` restringe a un depósito
    pub async fn list(
        &self,
        query: &CustomerListQuery,
        depot_scope: Option<&str>,
    ) -> AppResult<Vec<Customer>> {
        let pattern = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE ($1::text IS NULL OR depot_cd = $1)
              AND ($2::text IS NULL OR depot_cd = $2)
              AND ($3::customer_status IS NULL OR status = $3)
              AND ($4::text IS NULL OR cust_name ILIKE $4 OR cust_cd ILIKE $4)
            ORDER BY cust_name
            "#,
        )
        .bind(depot_scope)
        .bind(query.depot_cd.as_deref())
        .bind(query.status)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Clientes asignados a un empleado (todos si `emp_cd` es `None`)
    pub async fn list_mapped(
        &self,
        emp_cd: Option<&str>,
        depot_scope: Option<&str>,
    ) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE ($1::text IS NULL OR emp_cd_mapped = $1)
              AND ($2::text IS NULL OR depot_cd = $2)
            ORDER BY cust_name
            "#,
        )
        .bind(emp_cd)
        .bind(depot_scope)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn create(&self, req: CreateCustomerRequest) -> AppResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                id, depot_cd, cust_name, cust_cd, emp_cd_mapped, route_cd_mapped,
                bill_add1, bill_add2, bill_add3, bill_area, bill_city, bill_pin, bill_state_cd,
                ship_to1_add1, ship_to1_add2, ship_to1_add3, ship_to1_area, ship_to1_city,
                ship_to1_pin, ship_to1_state_cd,
                ship_to2_add1, ship_to2_add2, ship_to2_add3, ship_to2_area, ship_to2_city,
                ship_to2_pin, ship_to2_state_cd,
                gst_no, pan_no, peso_lic_no, trade_lic_no, status, agreement, validity,
                contact_person, mobile_no, outstanding_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32,
                    $33, $34, $35, $36, $37)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.depot_cd)
        .bind(req.cust_name.trim().to_string())
        .bind(req.cust_cd.trim().to_uppercase())
        .bind(req.emp_cd_mapped)
        .bind(req.route_cd_mapped)
        .bind(req.bill_add1)
        .bind(req.bill_add2)
        .bind(req.bill_add3)
        .bind(req.bill_area)
        .bind(req.bill_city)
        .bind(req.bill_pin)
        .bind(req.bill_state_cd)
        .bind(req.ship_to1_add1)
        .bind(req.ship_to1_add2)
        .bind(req.ship_to1_add3)
        .bind(req.ship_to1_area)
        .bind(req.ship_to1_city)
        .bind(req.ship_to1_pin)
        .bind(req.ship_to1_state_cd)
        .bind(req.ship_to2_add1)
        .bind(req.ship_to2_add2)
        .bind(req.ship_to2_add3)
        .bind(req.ship_to2_area)
        .bind(req.ship_to2_city)
        .bind(req.ship_to2_pin)
        .bind(req.ship_to2_state_cd)
        .bind(req.gst_no.map(|g| g.to_uppercase()))
        .bind(req.pan_no.map(|p| p.to_uppercase()))
        .bind(req.peso_lic_no)
        .bind(req.trade_lic_no)
        .bind(req.status.unwrap_or(CustomerStatus::Active))
        .bind(req.agreement)
        .bind(req.validity)
        .bind(req.contact_person)
        .bind(req.mobile_no)
        .bind(req.outstanding_amount.unwrap_or(Decimal::ZERO))
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Fusión parcial de campos; `cust_cd` nunca se reescribe
    pub async fn update(&self, id: Uuid, req: UpdateCustomerRequest) -> AppResult<Customer> {
        let c = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                depot_cd = $2, cust_name = $3, emp_cd_mapped = $4, route_cd_mapped = $5,
                bill_add1 = $6, bill_add2 = $7, bill_add3 = $8, bill_area = $9, bill_city = $10,
                bill_pin = $11, bill_state_cd = $12,
                ship_to1_add1 = $13, ship_to1_add2 = $14, ship_to1_add3 = $15,
                ship_to1_area = $16, ship_to1_city = $17, ship_to1_pin = $18,
                ship_to1_state_cd = $19,
                ship_to2_add1 = $20, ship_to2_add2 = $21, ship_to2_add3 = $22,
                ship_to2_area = $23, ship_to2_city = $24, ship_to2_pin = $25,
                ship_to2_state_cd = $26,
                gst_no = $27, pan_no = $28, peso_lic_no = $29, trade_lic_no = $30,
                status = $31, agreement = $32, validity = $33, contact_person = $34,
                mobile_no = $35, outstanding_amount = $36, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.depot_cd.unwrap_or(c.depot_cd))
        .bind(req.cust_name.unwrap_or(c.cust_name))
        .bind(req.emp_cd_mapped.or(c.emp_cd_mapped))
        .bind(req.route_cd_mapped.or(c.route_cd_mapped))
        .bind(req.bill_add1.or(c.bill_add1))
        .bind(req.bill_add2.or(c.bill_add2))
        .bind(req.bill_add3.or(c.bill_add3))
        .bind(req.bill_area.or(c.bill_area))
        .bind(req.bill_city.or(c.bill_city))
        .bind(req.bill_pin.or(c.bill_pin))
        .bind(req.bill_state_cd.or(c.bill_state_cd))
        .bind(req.ship_to1_add1.or(c.ship_to1_add1))
        .bind(req.ship_to1_add2.or(c.ship_to1_add2))
        .bind(req.ship_to1_add3.or(c.ship_to1_add3))
        .bind(req.ship_to1_area.or(c.ship_to1_area))
        .bind(req.ship_to1_city.or(c.ship_to1_city))
        .bind(req.ship_to1_pin.or(c.ship_to1_pin))
        .bind(req.ship_to1_state_cd.or(c.ship_to1_state_cd))
        .bind(req.ship_to2_add1.or(c.ship_to2_add1))
        .bind(req.ship_to2_add2.or(c.ship_to2_add2))
        .bind(req.ship_to2_add3.or(c.ship_to2_add3))
        .bind(req.ship_to2_area.or(c.ship_to2_area))
        .bind(req.ship_to2_city.or(c.ship_to2_city))
        .bind(req.ship_to2_pin.or(c.ship_to2_pin))
        .bind(req.ship_to2_state_cd.or(c.ship_to2_state_cd))
        .bind(req.gst_no.map(|g| g.to_uppercase()).or(c.gst_no))
        .bind(req.pan_no.map(|p| p.to_uppercase()).or(c.pan_no))
        .bind(req.peso_lic_no.or(c.peso_lic_no))
        .bind(req.trade_lic_no.or(c.trade_lic_no))
        .bind(req.status.unwrap_or(c.status))
        .bind(req.agreement.unwrap_or(c.agreement))
        .bind(req.validity.or(c.validity))
        .bind(req.contact_person.or(c.contact_person))
        .bind(req.mobile_no.or(c.mobile_no))
        .bind(req.outstanding_amount.unwrap_or(c.outstanding_amount))
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
