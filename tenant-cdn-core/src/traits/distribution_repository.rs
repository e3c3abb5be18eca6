//! 租户分发记录持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::TenantDistributionRecord;

/// 租户分发记录仓库 Trait
///
/// 平台实现:
/// - CLI / 服务端: `SqliteStore` (`SeaORM`)
/// - 测试与单进程: `InMemoryDistributionRepository`
#[async_trait]
pub trait DistributionRecordRepository: Send + Sync {
    /// 按租户 ID 查找记录
    ///
    /// # Returns
    /// * `Some(record)` - 找到记录
    /// * `None` - 租户尚未开通
    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Option<TenantDistributionRecord>>;

    /// 列出全部记录
    async fn find_all(&self) -> CoreResult<Vec<TenantDistributionRecord>>;

    /// 保存记录（按 `tenant_id` 插入或覆盖）
    async fn save(&self, record: &TenantDistributionRecord) -> CoreResult<()>;

    /// 删除记录，记录不存在时不报错
    async fn delete(&self, tenant_id: &str) -> CoreResult<()>;
}
