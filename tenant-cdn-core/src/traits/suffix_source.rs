//! 随机别名后缀来源

use rand::Rng;

/// 随机后缀长度
pub const SUFFIX_LEN: usize = 6;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 随机别名后缀来源
///
/// 冲突处理阶梯中唯一的不确定步骤，测试时注入固定实现。
pub trait SuffixSource: Send + Sync {
    /// 返回 `SUFFIX_LEN` 个 `[a-z0-9]` 字符
    fn random_suffix(&self) -> String;
}

/// 基于线程本地 RNG 的默认实现
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuffixSource;

impl SuffixSource for RandomSuffixSource {
    fn random_suffix(&self) -> String {
        let mut rng = rand::rng();
        (0..SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())]))
            .collect()
    }
}
