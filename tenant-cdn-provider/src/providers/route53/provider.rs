//! Route 53 `DnsProvider` trait 实现

use async_trait::async_trait;
use aws_sdk_route53::types as r53;
use chrono::Utc;

use crate::error::Result;
use crate::providers::common::{bare_change_id, bare_zone_id, normalize_domain_name, to_fqdn};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    ChangeAction, ChangeInfo, ChangeStatus, DnsRecordSet, DnsRecordType, HostedZone,
    RecordChange, RecordSetQuery,
};

use super::Route53Provider;

fn record_type_from_sdk(record_type: &r53::RrType) -> Option<DnsRecordType> {
    match record_type.as_str() {
        "CNAME" => Some(DnsRecordType::Cname),
        "A" => Some(DnsRecordType::A),
        "AAAA" => Some(DnsRecordType::Aaaa),
        "TXT" => Some(DnsRecordType::Txt),
        _ => None,
    }
}

fn change_status_from_sdk(status: &r53::ChangeStatus) -> ChangeStatus {
    if status.as_str() == "INSYNC" {
        ChangeStatus::InSync
    } else {
        ChangeStatus::Pending
    }
}

impl Route53Provider {
    fn zone_context(zone_id: &str) -> ErrorContext {
        ErrorContext {
            zone_id: Some(zone_id.to_string()),
            ..Default::default()
        }
    }

    /// 统一变更 -> SDK 变更
    fn change_to_sdk(&self, change: &RecordChange) -> Result<r53::Change> {
        let records = change
            .record
            .values
            .iter()
            .map(|v| r53::ResourceRecord::builder().value(v).build())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.build_error(e))?;

        let record_set = r53::ResourceRecordSet::builder()
            .name(to_fqdn(&change.record.name))
            .r#type(r53::RrType::from(change.record.record_type.as_str()))
            .ttl(change.record.ttl)
            .set_resource_records(Some(records))
            .build()
            .map_err(|e| self.build_error(e))?;

        let action = match change.action {
            ChangeAction::Upsert => r53::ChangeAction::from("UPSERT"),
            ChangeAction::Delete => r53::ChangeAction::from("DELETE"),
        };

        r53::Change::builder()
            .action(action)
            .resource_record_set(record_set)
            .build()
            .map_err(|e| self.build_error(e))
    }

    fn change_info_from_sdk(info: &r53::ChangeInfo) -> ChangeInfo {
        ChangeInfo {
            id: bare_change_id(info.id()).to_string(),
            status: change_status_from_sdk(info.status()),
            submitted_at: Some(Utc::now()),
        }
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone> {
        let zone_id = bare_zone_id(zone_id);
        log::debug!("[{}] GetHostedZone {zone_id}", self.provider_name());

        let output = self
            .client
            .get_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, Self::zone_context(zone_id)))?;

        let zone = output
            .hosted_zone()
            .ok_or_else(|| self.parse_error("响应中缺少 HostedZone 字段"))?;

        Ok(HostedZone {
            id: bare_zone_id(zone.id()).to_string(),
            name: normalize_domain_name(zone.name()),
            record_count: zone.resource_record_set_count(),
        })
    }

    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: &[RecordChange],
        comment: Option<&str>,
    ) -> Result<ChangeInfo> {
        let zone_id = bare_zone_id(zone_id);
        log::debug!(
            "[{}] ChangeResourceRecordSets {zone_id} ({} changes)",
            self.provider_name(),
            changes.len()
        );

        let sdk_changes = changes
            .iter()
            .map(|c| self.change_to_sdk(c))
            .collect::<Result<Vec<_>>>()?;

        let batch = r53::ChangeBatch::builder()
            .set_changes(Some(sdk_changes))
            .set_comment(comment.map(str::to_string))
            .build()
            .map_err(|e| self.build_error(e))?;

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, Self::zone_context(zone_id)))?;

        output
            .change_info()
            .map(Self::change_info_from_sdk)
            .ok_or_else(|| self.parse_error("响应中缺少 ChangeInfo 字段"))
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo> {
        let change_id = bare_change_id(change_id);

        let output = self
            .client
            .get_change()
            .id(change_id)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, ErrorContext::default()))?;

        output
            .change_info()
            .map(Self::change_info_from_sdk)
            .ok_or_else(|| self.parse_error("响应中缺少 ChangeInfo 字段"))
    }

    async fn list_record_sets(
        &self,
        zone_id: &str,
        query: &RecordSetQuery,
    ) -> Result<Vec<DnsRecordSet>> {
        let zone_id = bare_zone_id(zone_id);

        let mut request = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .max_items(query.max_items);

        // StartRecordType 只有在提供 StartRecordName 时才有效
        if let Some(name) = &query.start_name {
            request = request.start_record_name(to_fqdn(name));
            if let Some(record_type) = query.record_type {
                request = request.start_record_type(r53::RrType::from(record_type.as_str()));
            }
        }

        let output = request
            .send()
            .await
            .map_err(|e| self.sdk_error(e, Self::zone_context(zone_id)))?;

        Ok(output
            .resource_record_sets()
            .iter()
            .filter_map(|rrs| {
                let record_type = record_type_from_sdk(rrs.r#type())?;
                Some(DnsRecordSet {
                    name: normalize_domain_name(rrs.name()),
                    record_type,
                    ttl: rrs.ttl().unwrap_or_default(),
                    values: rrs
                        .resource_records()
                        .iter()
                        .map(|r| normalize_domain_name(r.value()))
                        .collect(),
                })
            })
            .collect())
    }
}
