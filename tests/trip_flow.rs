//! Flujos completos contra PostgreSQL
//!
//! Necesitan `DATABASE_URL` apuntando a una base desechable:
//! `DATABASE_URL=postgres://... cargo test --test trip_flow -- --ignored`

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use lazy_static::lazy_static;
use rand::Rng;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use fuel_logistics::config::EnvironmentConfig;
use fuel_logistics::database::{create_pool, run_migrations};
use fuel_logistics::models::user::UserType;
use fuel_logistics::services::Metrics;
use fuel_logistics::utils::jwt::{encode_claims, JwtClaims, JwtConfig};
use fuel_logistics::{create_app, AppState};

lazy_static! {
    /// Todos los escenarios comparten el contador `tripSerial`
    static ref TRIP_SERIAL: Mutex<()> = Mutex::new(());
}

/// Prefijo propio por escenario; la `X` final evita que se recorten sus dígitos
fn trip_no_hint() -> String {
    format!("IT{:06}X", rand::thread_rng().gen_range(0..1_000_000))
}

struct Harness {
    app: Router,
    pool: PgPool,
    config: EnvironmentConfig,
}

/// Datos sembrados para un escenario: cliente, cisterna, conductor y flota
struct Seed {
    depot_cd: String,
    customer_id: Uuid,
    vehicle_no: String,
    driver_id: Uuid,
    fleet_id: Uuid,
}

async fn harness() -> Harness {
    let config = EnvironmentConfig {
        database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        ..EnvironmentConfig::default()
    };
    let pool = create_pool(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let app = create_app(AppState::new(pool.clone(), config.clone(), Metrics::new().unwrap()));
    Harness { app, pool, config }
}

impl Harness {
    fn token(&self, user_type: UserType, is_admin: bool, driver_id: Option<Uuid>) -> String {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            user_id: "it-user".to_string(),
            user_type,
            emp_cd: Some("IT01".to_string()),
            depot_cd: None,
            is_admin,
            access_level: if is_admin { 3 } else { 1 },
            driver_id,
            exp: now + 3600,
            iat: now,
        };
        encode_claims(&claims, &JwtConfig::from(&self.config)).unwrap()
    }

    fn admin(&self) -> String {
        self.token(UserType::Admin, true, None)
    }

    async fn call(&self, method: Method, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token));
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn seed(&self, vehicle_capacity: i64) -> Seed {
        let mut rng = rand::thread_rng();
        let depot_cd = format!("{}", rng.gen_range(100..1000));
        let cust_cd = format!("T{:07}", rng.gen_range(0..10_000_000));
        let vehicle_no = format!("MH{:08}", rng.gen_range(0..100_000_000));

        let customer_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO customers (id, depot_cd, cust_name, cust_cd, ship_to1_add1, ship_to1_state_cd, mobile_no)
             VALUES ($1, $2, 'Flow Customer', $3, 'Plot 4 MIDC Bhosari', '27', '9876543210')",
        )
        .bind(customer_id)
        .bind(&depot_cd)
        .bind(&cust_cd)
        .execute(&self.pool)
        .await
        .unwrap();

        let vehicle_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO vehicles (id, vehicle_no, depot_cd, capacity) VALUES ($1, $2, $3, $4)",
        )
        .bind(vehicle_id)
        .bind(&vehicle_no)
        .bind(&depot_cd)
        .bind(rust_decimal::Decimal::from(vehicle_capacity))
        .execute(&self.pool)
        .await
        .unwrap();

        let driver_id = Uuid::new_v4();
        sqlx::query("INSERT INTO drivers (id, driver_name, depot_cd) VALUES ($1, 'Flow Driver', $2)")
            .bind(driver_id)
            .bind(&depot_cd)
            .execute(&self.pool)
            .await
            .unwrap();

        let fleet_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO fleets (id, vehicle_id, driver_id, depot_cd, assigned_at) VALUES ($1, $2, $3, $4, now())",
        )
        .bind(fleet_id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(&depot_cd)
        .execute(&self.pool)
        .await
        .unwrap();

        Seed {
            depot_cd,
            customer_id,
            vehicle_no,
            driver_id,
            fleet_id,
        }
    }

    async fn assign(&self, seed: &Seed, order_id: &str, trip_no: &str) -> (StatusCode, Value) {
        let _serial = TRIP_SERIAL.lock().await;
        self.assign_unlocked(seed, order_id, trip_no).await
    }

    async fn assign_unlocked(&self, seed: &Seed, order_id: &str, trip_no: &str) -> (StatusCode, Value) {
        self.call(
            Method::POST,
            "/api/trips/assign",
            &self.admin(),
            Some(json!({"fleetId": seed.fleet_id, "orderId": order_id, "tripNo": trip_no})),
        )
        .await
    }

    async fn count(&self, sql: &str, id: &str) -> i64 {
        sqlx::query_scalar(sql).bind(id).fetch_one(&self.pool).await.unwrap()
    }

    async fn create_order(&self, seed: &Seed, qty: i64, delivery_date: &str) -> Value {
        let (status, order) = self
            .call(
                Method::POST,
                "/api/orders",
                &self.admin(),
                Some(json!({
                    "customerId": seed.customer_id,
                    "shipToAddress": "Plot 4 MIDC Bhosari",
                    "items": [{"productName": "diesel", "quantity": qty.to_string(), "rate": "92.50"}],
                    "deliveryDate": delivery_date,
                    "deliveryTimeSlot": "09:00 - 12:00"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "order creation failed: {}", order);
        order
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn oversized_order_is_rejected_without_side_effects() {
    let h = harness().await;
    let seed = h.seed(5000).await;
    let order = h.create_order(&seed, 6000, "2025-07-01").await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, body) = h.assign(&seed, &order_id, &trip_no_hint()).await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let trips: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips WHERE fleet_id = $1")
        .bind(seed.fleet_id)
        .fetch_one(&h.pool)
        .await
        .unwrap();
    let plans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM delivery_plans WHERE order_id = $1::uuid")
        .bind(&order_id)
        .fetch_one(&h.pool)
        .await
        .unwrap();
    assert_eq!(trips, 0);
    assert_eq!(plans, 0);

    let (_, reloaded) = h
        .call(Method::GET, &format!("/api/orders/{}", order_id), &h.admin(), None)
        .await;
    assert_eq!(reloaded["orderStatus"], "PENDING");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn assign_login_deliver_logout_issues_invoices() {
    let h = harness().await;
    let seed = h.seed(8000).await;
    let order = h.create_order(&seed, 4000, "2025-07-01").await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, assigned) = h.assign(&seed, &order_id, &trip_no_hint()).await;
    assert_eq!(status, StatusCode::OK, "{}", assigned);
    let trip_id = assigned["tripId"].as_str().unwrap().to_string();
    let trip_no = assigned["tripNo"].as_str().unwrap().to_string();
    assert_eq!(assigned["seededDeliveriesCount"], 1);

    // Stock para la entrega
    let (status, receipt) = h
        .call(
            Method::POST,
            &format!("/api/bowser-inventory/{}/receipt", seed.vehicle_no),
            &h.admin(),
            Some(json!({"qty": "6000", "depotCd": seed.depot_cd})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", receipt);

    let driver = h.token(UserType::Driver, false, Some(seed.driver_id));
    let (status, login) = h
        .call(
            Method::POST,
            "/api/trips/login",
            &driver,
            Some(json!({"tripId": trip_id, "startKm": "1200", "totalizerStart": "5000"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", login);
    assert_eq!(login["trip"]["status"], "ACTIVE");

    let (status, delivered) = h
        .call(
            Method::POST,
            "/api/deliveries",
            &driver,
            Some(json!({
                "tripId": trip_id,
                "orderId": order_id,
                "customerId": seed.customer_id,
                "qty": "3900"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", delivered);
    assert!(delivered["dcNo"].as_str().unwrap().starts_with("DC"));

    let (status, logout) = h
        .call(
            Method::POST,
            "/api/trips/logout",
            &driver,
            Some(json!({"tripId": trip_id, "endKm": "1260", "totalizerEnd": "8900"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", logout);
    assert_eq!(logout["trip"]["status"], "COMPLETED");

    let invoices = logout["invoices"].as_array().unwrap();
    let delivery_rows = h
        .count("SELECT COUNT(*) FROM deliveries WHERE trip_id = $1::uuid", &trip_id)
        .await;
    assert_eq!(invoices.len() as i64, delivery_rows);
    let digits: String = trip_no.chars().filter(char::is_ascii_digit).collect();
    assert_eq!(
        invoices[0]["invoiceNo"].as_str().unwrap(),
        format!("INV{:0>6}-01", digits)
    );

    let (_, reloaded) = h
        .call(Method::GET, &format!("/api/orders/{}", order_id), &h.admin(), None)
        .await;
    assert_eq!(reloaded["orderStatus"], "COMPLETED");

    // Facturas: visibles para su conductor, ocultas para otro conductor o sin depósito
    let invoice_id = invoices[0]["id"].as_str().unwrap().to_string();
    let (status, _) = h
        .call(Method::GET, &format!("/api/invoices/{}", invoice_id), &driver, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let stranger = h.token(UserType::Driver, false, Some(Uuid::new_v4()));
    let (status, _) = h
        .call(Method::GET, &format!("/api/invoices/{}", invoice_id), &stranger, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let no_depot = h.token(UserType::Employee, false, None);
    let invoice_no = invoices[0]["invoiceNo"].as_str().unwrap();
    let (status, page) = h
        .call(Method::GET, &format!("/api/invoices?q={}", invoice_no), &no_depot, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
    let (status, _) = h
        .call(Method::GET, &format!("/api/invoices/{}/pdf", invoice_id), &no_depot, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Un segundo logout ya no es una transición válida
    let (status, _) = h
        .call(
            Method::POST,
            "/api/trips/logout",
            &driver,
            Some(json!({"tripId": trip_id, "endKm": "1300", "totalizerEnd": "9000"})),
        )
        .await;
    assert!(status.is_client_error());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn order_numbers_are_sequential_per_prefix() {
    let h = harness().await;
    let seed = h.seed(5000).await;

    // Fecha propia para no compartir contador con otros escenarios
    let day = rand::thread_rng().gen_range(1..=28);
    let date = format!("2031-02-{:02}", day);
    let first = h.create_order(&seed, 100, &date).await;
    let second = h.create_order(&seed, 100, &date).await;

    let first_no = first["orderNo"].as_str().unwrap();
    let second_no = second["orderNo"].as_str().unwrap();
    assert_eq!(first_no.len(), 13);
    assert_eq!(first_no[..10], second_no[..10]);

    let first_seq: u32 = first_no[10..].parse().unwrap();
    let second_seq: u32 = second_no[10..].parse().unwrap();
    assert_eq!(second_seq, first_seq + 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn duplicate_trip_number_does_not_block_the_serial() {
    let h = harness().await;
    let first = h.seed(5000).await;
    let second = h.seed(5000).await;
    let prefix = trip_no_hint();
    let _serial = TRIP_SERIAL.lock().await;

    let (status, reset) = h
        .call(Method::POST, "/api/trips/reset-serial", &h.admin(), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", reset);
    assert_eq!(reset["nextWillBe"], "000");

    let order = h.create_order(&first, 100, "2025-07-01").await;
    let (status, assigned) = h
        .assign_unlocked(&first, order["id"].as_str().unwrap(), &prefix)
        .await;
    assert_eq!(status, StatusCode::OK, "{}", assigned);
    assert_eq!(assigned["tripNo"], format!("{}000", prefix));

    // Tras un reset el mismo prefijo repite número
    let (status, _) = h
        .call(Method::POST, "/api/trips/reset-serial", &h.admin(), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let order = h.create_order(&second, 100, "2025-07-01").await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let (status, body) = h.assign_unlocked(&second, &order_id, &prefix).await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let (_, reloaded) = h
        .call(Method::GET, &format!("/api/orders/{}", order_id), &h.admin(), None)
        .await;
    assert_eq!(reloaded["orderStatus"], "PENDING");

    // La serie avanzó aunque la asignación fallara
    let (status, assigned) = h.assign_unlocked(&second, &order_id, &prefix).await;
    assert_eq!(status, StatusCode::OK, "{}", assigned);
    assert_eq!(assigned["tripNo"], format!("{}001", prefix));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn order_on_an_open_trip_cannot_be_reopened() {
    let h = harness().await;
    let seed = h.seed(5000).await;
    let other = h.seed(5000).await;
    let order = h.create_order(&seed, 1000, "2025-07-01").await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, assigned) = h.assign(&seed, &order_id, &trip_no_hint()).await;
    assert_eq!(status, StatusCode::OK, "{}", assigned);

    let (status, body) = h
        .call(
            Method::POST,
            &format!("/api/fleets/{}/release", seed.fleet_id),
            &h.admin(),
            Some(json!({"orderId": order_id})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let (status, body) = h
        .call(
            Method::PATCH,
            &format!("/api/orders/{}/status", order_id),
            &h.admin(),
            Some(json!({"orderStatus": "PENDING"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let (status, _) = h.assign(&other, &order_id, &trip_no_hint()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let plans = h
        .count("SELECT COUNT(*) FROM delivery_plans WHERE order_id = $1::uuid", &order_id)
        .await;
    assert_eq!(plans, 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn added_orders_must_fit_the_remaining_capacity() {
    let h = harness().await;
    let seed = h.seed(5000).await;
    let first = h.create_order(&seed, 3000, "2025-07-01").await;

    let (status, assigned) = h
        .assign(&seed, first["id"].as_str().unwrap(), &trip_no_hint())
        .await;
    assert_eq!(status, StatusCode::OK, "{}", assigned);
    let trip_id = assigned["tripId"].as_str().unwrap().to_string();

    let too_big = h.create_order(&seed, 2500, "2025-07-01").await;
    let (status, body) = h
        .call(
            Method::POST,
            &format!("/api/trips/{}/orders", trip_id),
            &h.admin(),
            Some(json!({"orderId": too_big["id"]})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let fits = h.create_order(&seed, 2000, "2025-07-01").await;
    let (status, body) = h
        .call(
            Method::POST,
            &format!("/api/trips/{}/orders", trip_id),
            &h.admin(),
            Some(json!({"orderId": fits["id"]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let plans = h
        .count("SELECT COUNT(*) FROM delivery_plans WHERE trip_id = $1::uuid", &trip_id)
        .await;
    assert_eq!(plans, 2);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres"]
async fn loading_code_cannot_be_reused() {
    let h = harness().await;
    let seed = h.seed(8000).await;
    let order = h.create_order(&seed, 1000, "2025-07-01").await;
    let (status, assigned) = h
        .assign(&seed, order["id"].as_str().unwrap(), &trip_no_hint())
        .await;
    assert_eq!(status, StatusCode::OK, "{}", assigned);
    let trip_id = assigned["tripId"].as_str().unwrap().to_string();

    // Saldo por debajo de la capacidad: la carga necesita código
    let (status, receipt) = h
        .call(
            Method::POST,
            &format!("/api/bowser-inventory/{}/receipt", seed.vehicle_no),
            &h.admin(),
            Some(json!({"qty": "1000", "depotCd": seed.depot_cd})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", receipt);

    let driver = h.token(UserType::Driver, false, Some(seed.driver_id));
    let (status, login) = h
        .call(
            Method::POST,
            "/api/trips/login",
            &driver,
            Some(json!({"tripId": trip_id, "startKm": "100", "totalizerStart": "10"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", login);

    let (status, issued) = h
        .call(Method::POST, "/api/loadings/generate-code", &driver, Some(json!({"tripId": trip_id})))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", issued);
    assert_eq!(issued["codeRequired"], true);
    let code = issued["code"].as_str().unwrap().to_string();

    let verify = json!({"tripId": trip_id, "code": code});
    let (status, verified) = h
        .call(Method::POST, "/api/loadings/verify-code", &driver, Some(verify.clone()))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", verified);
    assert_eq!(verified["verified"], true);

    let (status, body) = h
        .call(Method::POST, "/api/loadings/verify-code", &driver, Some(verify))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{}", body);
}
