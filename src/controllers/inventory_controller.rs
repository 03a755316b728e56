use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::inventory_dto::{InventoryListQuery, LedgerQuery, ReceiptRequest, ReceiptResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::inventory::{tr_type, BowserInventory, BowserLedgerEntry};
use crate::repositories::inventory_repository::{self, InventoryRepository, LedgerMovement};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

const DEFAULT_LEDGER_LIMIT: i64 = 100;
const MAX_LEDGER_LIMIT: i64 = 500;

pub struct InventoryController {
    pool: PgPool,
    repository: InventoryRepository,
    vehicles: VehicleRepository,
}

impl InventoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InventoryRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: InventoryListQuery,
    ) -> AppResult<Vec<BowserInventory>> {
        let depot = user.depot_scope().map(str::to_string).or(query.depot_cd);
        self.repository.list(depot.as_deref()).await
    }

    pub async fn get(&self, user: &AuthenticatedUser, vehicle_no: &str) -> AppResult<BowserInventory> {
        let vehicle_no = vehicle_no.trim().to_uppercase();
        let inventory = self
            .repository
            .find(&vehicle_no)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No inventory for bowser {}", vehicle_no)))?;
        user.ensure_depot(&inventory.depot_cd)?;
        Ok(inventory)
    }

    pub async fn ledger(
        &self,
        user: &AuthenticatedUser,
        vehicle_no: &str,
        query: LedgerQuery,
    ) -> AppResult<Vec<BowserLedgerEntry>> {
        let inventory = self.get(user, vehicle_no).await?;
        let limit = query.limit.unwrap_or(DEFAULT_LEDGER_LIMIT).clamp(1, MAX_LEDGER_LIMIT);
        self.repository.ledger(&inventory.vehicle_no, limit).await
    }

    /// Entrada de combustible (solo administradores)
    pub async fn receipt(
        &self,
        user: &AuthenticatedUser,
        vehicle_no: &str,
        request: ReceiptRequest,
    ) -> AppResult<ReceiptResponse> {
        user.ensure_admin()?;
        request.validate()?;
        let vehicle_no = vehicle_no.trim().to_uppercase();

        let depot_cd = match request.depot_cd {
            Some(depot) => depot,
            None => match self.repository.find(&vehicle_no).await? {
                Some(inv) => inv.depot_cd,
                None => self
                    .vehicles
                    .find_by_vehicle_no(&vehicle_no)
                    .await?
                    .map(|v| v.depot_cd)
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "depotCd is required for unknown bowser {}",
                            vehicle_no
                        ))
                    })?,
            },
        };

        let mut tx = self.pool.begin().await?;
        let inventory = inventory_repository::add_receipt(&mut *tx, &vehicle_no, &depot_cd, request.qty).await?;
        let ledger = inventory_repository::append_ledger(
            &mut *tx,
            LedgerMovement {
                vehicle_no: &vehicle_no,
                depot_cd: &inventory.depot_cd,
                tr_type: tr_type::RECEIPT,
                tr_ref: request.tr_ref,
                op_bal: inventory.balance_liters - request.qty,
                tr_qty: request.qty,
                cl_stock: inventory.balance_liters,
            },
        )
        .await?;
        tx.commit().await?;

        info!("📥 Recepción de {} L en {} (saldo {})", request.qty, vehicle_no, inventory.balance_liters);
        Ok(ReceiptResponse { inventory, ledger })
    }
}
