//! `DistributionRecordRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait, QueryOrder};

use tenant_cdn_core::error::{CoreError, CoreResult};
use tenant_cdn_core::traits::DistributionRecordRepository;
use tenant_cdn_core::types::{DistributionStatus, TenantDistributionRecord};

use super::SqliteStore;
use super::entity::tenant_distribution;

impl tenant_distribution::Model {
    /// Convert a `SeaORM` row model into a `TenantDistributionRecord`.
    fn into_record(self) -> CoreResult<TenantDistributionRecord> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| CoreError::SerializationError(format!("Invalid created_at: {e}")))?
            .with_timezone(&chrono::Utc);

        Ok(TenantDistributionRecord {
            tenant_id: self.tenant_id,
            distribution_id: self.distribution_id,
            cdn_domain: self.cdn_domain,
            custom_alias: self.custom_alias,
            status: DistributionStatus::parse(&self.status),
            unique_token: self.unique_token,
            dns_change_ref: self.dns_change_ref,
            created_at,
        })
    }
}

fn record_to_active_model(record: &TenantDistributionRecord) -> tenant_distribution::ActiveModel {
    tenant_distribution::ActiveModel {
        tenant_id: Set(record.tenant_id.clone()),
        distribution_id: Set(record.distribution_id.clone()),
        cdn_domain: Set(record.cdn_domain.clone()),
        custom_alias: Set(record.custom_alias.clone()),
        status: Set(record.status.as_str().to_string()),
        unique_token: Set(record.unique_token.clone()),
        dns_change_ref: Set(record.dns_change_ref.clone()),
        created_at: Set(record.created_at.to_rfc3339()),
    }
}

#[async_trait]
impl DistributionRecordRepository for SqliteStore {
    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Option<TenantDistributionRecord>> {
        tenant_distribution::Entity::find_by_id(tenant_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query record: {e}")))?
            .map(tenant_distribution::Model::into_record)
            .transpose()
    }

    async fn find_all(&self) -> CoreResult<Vec<TenantDistributionRecord>> {
        let rows = tenant_distribution::Entity::find()
            .order_by_asc(tenant_distribution::Column::TenantId)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query records: {e}")))?;

        rows.into_iter()
            .map(tenant_distribution::Model::into_record)
            .collect()
    }

    async fn save(&self, record: &TenantDistributionRecord) -> CoreResult<()> {
        tenant_distribution::Entity::insert(record_to_active_model(record))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(tenant_distribution::Column::TenantId)
                    .update_columns([
                        tenant_distribution::Column::DistributionId,
                        tenant_distribution::Column::CdnDomain,
                        tenant_distribution::Column::CustomAlias,
                        tenant_distribution::Column::Status,
                        tenant_distribution::Column::UniqueToken,
                        tenant_distribution::Column::DnsChangeRef,
                        tenant_distribution::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save record: {e}")))?;

        log::debug!("Saved record for tenant {}", record.tenant_id);
        Ok(())
    }

    async fn delete(&self, tenant_id: &str) -> CoreResult<()> {
        tenant_distribution::Entity::delete_by_id(tenant_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete record: {e}")))?;

        Ok(())
    }
}
