//! Provider 公共工具函数

// ============ 域名名称处理 ============

/// 去掉域名末尾的点并转为小写
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// 转为带末尾点的完全限定名（Route 53 返回与接受的格式）
pub fn to_fqdn(name: &str) -> String {
    format!("{}.", normalize_domain_name(name))
}

/// 去掉托管区 ID 的 `/hostedzone/` 前缀
pub fn bare_zone_id(zone_id: &str) -> &str {
    zone_id.trim_start_matches("/hostedzone/")
}

/// 去掉变更 ID 的 `/change/` 前缀
pub fn bare_change_id(change_id: &str) -> &str {
    change_id.trim_start_matches("/change/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_dot_and_lowercases() {
        assert_eq!(normalize_domain_name("Acme.Example.COM."), "acme.example.com");
    }

    #[test]
    fn fqdn_has_single_trailing_dot() {
        assert_eq!(to_fqdn("acme.example.com"), "acme.example.com.");
        assert_eq!(to_fqdn("acme.example.com."), "acme.example.com.");
    }

    #[test]
    fn id_prefixes_are_stripped() {
        assert_eq!(bare_zone_id("/hostedzone/Z123"), "Z123");
        assert_eq!(bare_zone_id("Z123"), "Z123");
        assert_eq!(bare_change_id("/change/C9"), "C9");
    }
}
