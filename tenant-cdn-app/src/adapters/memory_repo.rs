//! 进程内记录仓库

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tenant_cdn_core::error::CoreResult;
use tenant_cdn_core::traits::DistributionRecordRepository;
use tenant_cdn_core::types::TenantDistributionRecord;

/// 基于 `HashMap` 的记录仓库，进程退出即丢失
#[derive(Default)]
pub struct InMemoryDistributionRepository {
    records: RwLock<HashMap<String, TenantDistributionRecord>>,
}

impl InMemoryDistributionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DistributionRecordRepository for InMemoryDistributionRepository {
    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Option<TenantDistributionRecord>> {
        Ok(self.records.read().await.get(tenant_id).cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<TenantDistributionRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn save(&self, record: &TenantDistributionRecord) -> CoreResult<()> {
        self.records
            .write()
            .await
            .insert(record.tenant_id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, tenant_id: &str) -> CoreResult<()> {
        self.records.write().await.remove(tenant_id);
        Ok(())
    }
}
