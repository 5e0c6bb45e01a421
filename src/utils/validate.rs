use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::quizzes::entities::{OptionLabel, QuizQuestion};

// 邮箱结构校验：恰好一个 @，本地部分非空，域名至少包含一个 . 且各段非空
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@.]+(?:\.[^@.]+)+$").expect("Invalid email regex"));

static QUIZ_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid quiz id regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 纯语法检查，不做 DNS/MX 探测
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_student_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name must not be empty");
    }
    if name.chars().count() > 128 {
        return Err("Name must not exceed 128 characters");
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), &'static str> {
    // 年龄范围：5 <= x <= 100
    if !(5..=100).contains(&age) {
        return Err("Age must be between 5 and 100");
    }
    Ok(())
}

/// 课程名校验：非空白，长度不超过 128 字符
pub fn validate_course_name(course: &str) -> Result<(), &'static str> {
    if course.trim().is_empty() {
        return Err("Course name must not be empty");
    }
    if course.chars().count() > 128 {
        return Err("Course name must not exceed 128 characters");
    }
    Ok(())
}

/// 测验编号校验：只能包含字母、数字、下划线或连字符
pub fn validate_quiz_id(quiz_id: &str) -> Result<(), &'static str> {
    if quiz_id.is_empty() || quiz_id.len() > 64 {
        return Err("Quiz ID length must be between 1 and 64 characters");
    }
    if !QUIZ_ID_RE.is_match(quiz_id) {
        return Err("Quiz ID must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

/// 测验题目结构校验
///
/// 要求：至少一题；每题题干非空、选项 2..=4 个且均非空、
/// 正确选项必须落在实际选项范围内。
pub fn validate_quiz_questions(questions: &[QuizQuestion]) -> Result<(), String> {
    if questions.is_empty() {
        return Err("Quiz must contain at least one question".to_string());
    }
    for (index, question) in questions.iter().enumerate() {
        if question.prompt.trim().is_empty() {
            return Err(format!("Question {}: prompt must not be empty", index + 1));
        }
        if question.options.len() < 2 || question.options.len() > OptionLabel::MAX_OPTIONS {
            return Err(format!(
                "Question {}: must have between 2 and {} options",
                index + 1,
                OptionLabel::MAX_OPTIONS
            ));
        }
        if question.options.iter().any(|o| o.trim().is_empty()) {
            return Err(format!(
                "Question {}: options must not be empty",
                index + 1
            ));
        }
        if question.correct_option.index() >= question.options.len() {
            return Err(format!(
                "Question {}: correct option {} is out of range",
                index + 1,
                question.correct_option
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], correct: OptionLabel) -> QuizQuestion {
        QuizQuestion {
            prompt: "What is HTML?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_option: correct,
        }
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email("first.last@mail.example.co.uk").is_ok());
        assert!(validate_email("user+tag@example.org").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@example").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("user@example..com").is_err());
        assert!(validate_email("user@example.com@").is_err());
    }

    #[test]
    fn test_student_name() {
        assert!(validate_student_name("Ada Lovelace").is_ok());
        assert!(validate_student_name("").is_err());
        assert!(validate_student_name("   ").is_err());
        assert!(validate_student_name(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_age_bounds() {
        assert!(validate_age(5).is_ok());
        assert!(validate_age(100).is_ok());
        assert!(validate_age(4).is_err());
        assert!(validate_age(101).is_err());
        assert!(validate_age(-1).is_err());
    }

    #[test]
    fn test_quiz_id() {
        assert!(validate_quiz_id("QZ-2025_001").is_ok());
        assert!(validate_quiz_id("").is_err());
        assert!(validate_quiz_id("has space").is_err());
        assert!(validate_quiz_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_quiz_questions_valid() {
        let questions = vec![
            question(&["Markup", "Protocol"], OptionLabel::A),
            question(&["Yes", "No", "Maybe", "Unsure"], OptionLabel::D),
        ];
        assert!(validate_quiz_questions(&questions).is_ok());
    }

    #[test]
    fn test_quiz_questions_invalid() {
        assert!(validate_quiz_questions(&[]).is_err());
        // 单选项不足
        assert!(validate_quiz_questions(&[question(&["Only"], OptionLabel::A)]).is_err());
        // 选项过多
        assert!(
            validate_quiz_questions(&[question(&["1", "2", "3", "4", "5"], OptionLabel::A)])
                .is_err()
        );
        // 空白选项
        assert!(validate_quiz_questions(&[question(&["Markup", "  "], OptionLabel::A)]).is_err());
        // 正确选项越界：两个选项却指向 C
        assert!(
            validate_quiz_questions(&[question(&["Markup", "Protocol"], OptionLabel::C)]).is_err()
        );
    }
}
