use crate::domain::model::OrderCode;
use crate::domain::port::OrderCodeGenerator;
use uuid::Uuid;

/// ランダム注文コード生成器
/// `PED-` に続く6桁の英数字大文字トークンを払い出す（例: PED-3FA9C1）
#[derive(Clone, Default)]
pub struct RandomOrderCodeGenerator;

impl RandomOrderCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl OrderCodeGenerator for RandomOrderCodeGenerator {
    fn next_code(&self) -> OrderCode {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .collect::<String>()
            .to_uppercase();
        OrderCode::new(format!("PED-{}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_has_expected_shape() {
        let generator = RandomOrderCodeGenerator::new();
        let code = generator.next_code();

        let code = code.as_str();
        assert!(code.starts_with("PED-"));
        assert_eq!(code.len(), 10);
        assert!(code[4..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_codes_are_unlikely_to_repeat() {
        let generator = RandomOrderCodeGenerator::new();
        let first = generator.next_code();
        let second = generator.next_code();
        assert_ne!(first, second);
    }
}
