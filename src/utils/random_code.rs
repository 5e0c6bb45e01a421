use rand::Rng;

/// 生成指定位数的数字验证码，首位不为零
pub fn generate_numeric_code(width: u32) -> String {
    let width = width.clamp(1, 18);
    let lower = 10_i64.pow(width - 1);
    let upper = 10_i64.pow(width) - 1;
    let mut rng = rand::rng();
    rng.random_range(lower..=upper).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_width() {
        for _ in 0..32 {
            let code = generate_numeric_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn test_width_is_clamped() {
        assert_eq!(generate_numeric_code(0).len(), 1);
        assert_eq!(generate_numeric_code(18).len(), 18);
    }
}
