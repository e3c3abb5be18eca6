//! `SeaORM` entity for the `tenant_distributions` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tenant_distributions")]
/// One row per tenant.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tenant_id: String,
    pub distribution_id: String,
    pub cdn_domain: String,
    pub custom_alias: Option<String>,
    pub status: String,
    pub unique_token: String,
    pub dns_change_ref: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
