use serde::Serialize;

/// DNS 自动化配置检查结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsConfigurationReport {
    /// DNS 自动化是否处于可用状态（已开启且无错误）
    pub enabled: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl DnsConfigurationReport {
    /// 没有错误也没有警告
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
