//! Payment generation: one PENDING due record per (tenant, period).

use sqlx::PgPool;
use tracing::{debug, info};

use crate::middleware::metrics::record_payments_generated;
use domain::models::BillingPeriod;
use persistence::repositories::{PaymentRepository, TenantRepository};

/// Summary of one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GenerationSummary {
    /// Rows created this pass.
    pub created: usize,
    /// Tenants whose payment for the period already existed.
    pub existing: usize,
}

/// Service creating billing-period due records for active tenants.
pub struct PaymentGeneratorService {
    tenants: TenantRepository,
    payments: PaymentRepository,
}

impl PaymentGeneratorService {
    /// Create a new payment generator service.
    pub fn new(pool: PgPool) -> Self {
        Self {
            tenants: TenantRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool),
        }
    }

    /// Ensure every active tenant has a payment row for `period`,
    /// snapshotting rent and maintenance amounts as of now. Idempotent: the
    /// (tenant_id, period) uniqueness constraint absorbs repeat calls, so a
    /// second invocation creates zero rows.
    pub async fn generate_for_period(
        &self,
        period: BillingPeriod,
    ) -> Result<GenerationSummary, sqlx::Error> {
        let tenants = self.tenants.list_active().await?;
        let period_key = period.to_string();

        let mut summary = GenerationSummary {
            created: 0,
            existing: 0,
        };

        for tenant in tenants {
            // Clamp the due date to the period's month length; the stored
            // due_day is untouched.
            let due_date = period.due_date(tenant.due_day as u32);

            let created = self
                .payments
                .insert_pending(
                    tenant.id,
                    &period_key,
                    tenant.rent_amount,
                    tenant.maintenance_amount,
                    due_date,
                )
                .await?;

            if created {
                debug!(
                    tenant_id = %tenant.id,
                    period = %period_key,
                    due_date = %due_date,
                    "Created pending payment"
                );
                summary.created += 1;
            } else {
                summary.existing += 1;
            }
        }

        record_payments_generated(summary.created as u64);
        info!(
            period = %period_key,
            created = summary.created,
            existing = summary.existing,
            "Payment generation pass complete"
        );

        Ok(summary)
    }
}
