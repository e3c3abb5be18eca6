use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TenantDistribution::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TenantDistribution::TenantId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TenantDistribution::DistributionId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TenantDistribution::CdnDomain).string().not_null())
                    .col(ColumnDef::new(TenantDistribution::CustomAlias).string().null())
                    .col(
                        ColumnDef::new(TenantDistribution::Status)
                            .string()
                            .not_null()
                            .default("Provisioning"),
                    )
                    .col(ColumnDef::new(TenantDistribution::UniqueToken).string().not_null())
                    .col(ColumnDef::new(TenantDistribution::DnsChangeRef).string().null())
                    .col(ColumnDef::new(TenantDistribution::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TenantDistribution::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TenantDistribution {
    #[sea_orm(iden = "tenant_distributions")]
    Table,
    TenantId,
    DistributionId,
    CdnDomain,
    CustomAlias,
    Status,
    UniqueToken,
    DnsChangeRef,
    CreatedAt,
}
