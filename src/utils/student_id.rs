use std::sync::Arc;

use crate::errors::{Result, SRSystemError};
use crate::storage::Storage;
use rand::Rng;

pub const STUDENT_ID_PREFIX: &str = "CL";

// 随机学号池为 9e5 个，64 次碰撞重试足以覆盖现实规模
const MAX_ATTEMPTS: usize = 64;

/// 学号格式校验：CL 前缀加 6 位数字
pub fn is_valid_student_id(id: &str) -> bool {
    id.len() == STUDENT_ID_PREFIX.len() + 6
        && id.starts_with(STUDENT_ID_PREFIX)
        && id[STUDENT_ID_PREFIX.len()..]
            .bytes()
            .all(|b| b.is_ascii_digit())
}

/// 分配一个未被占用的学号，格式为 CL + 6 位数字
///
/// 随机生成候选学号并查询存储去重，连续 64 次碰撞视为号池耗尽。
pub async fn allocate_student_id(storage: &Arc<dyn Storage>) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = {
            let mut rng = rand::rng();
            format!(
                "{}{}",
                STUDENT_ID_PREFIX,
                rng.random_range(100000..=999999)
            )
        };
        if !storage.student_id_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(SRSystemError::allocation_exhausted(format!(
        "no unused student ID found after {MAX_ATTEMPTS} attempts"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_student_id() {
        assert!(is_valid_student_id("CL123456"));
        assert!(is_valid_student_id("CL000000"));
    }

    #[test]
    fn test_invalid_student_id() {
        assert!(!is_valid_student_id(""));
        assert!(!is_valid_student_id("CL12345"));
        assert!(!is_valid_student_id("CL1234567"));
        assert!(!is_valid_student_id("XX123456"));
        assert!(!is_valid_student_id("CL12345a"));
        assert!(!is_valid_student_id("cl123456"));
    }
}
