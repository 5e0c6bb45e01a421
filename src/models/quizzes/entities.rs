use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选项标签，按位置对应 A-D，上限四个选项
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const MAX_OPTIONS: usize = 4;

    /// 标签在选项序列中的位置
    pub fn index(&self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(OptionLabel::A),
            1 => Some(OptionLabel::B),
            2 => Some(OptionLabel::C),
            3 => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for OptionLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(serde::de::Error::custom(format!(
                "无效的选项标签: '{s}'. 支持的标签: A, B, C, D"
            ))),
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionLabel::A => write!(f, "A"),
            OptionLabel::B => write!(f, "B"),
            OptionLabel::C => write!(f, "C"),
            OptionLabel::D => write!(f, "D"),
        }
    }
}

impl std::str::FromStr for OptionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(format!("Invalid option label: {s}")),
        }
    }
}

// 单道选择题，正确项唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: OptionLabel,
}

// 测验实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub quiz_id: String,
    pub title: String,
    pub course: String,
    /// 仅作展示提示，本层不按时长拒绝迟交
    pub duration_minutes: i32,
    pub questions: Vec<QuizQuestion>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 计分结果
#[derive(Debug, Clone, PartialEq)]
pub struct QuizGradeOutcome {
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
}

impl Quiz {
    /// 纯函数计分：逐题比对标签，未作答或越界的题号一律判错，从不报错。
    /// 同一 (quiz, answers) 输入永远得到同一分数。
    pub fn grade(&self, answers: &BTreeMap<usize, OptionLabel>) -> QuizGradeOutcome {
        let total = self.questions.len();
        if total == 0 {
            return QuizGradeOutcome {
                score: 0,
                total_questions: 0,
                percentage: 0.0,
            };
        }

        let score = self
            .questions
            .iter()
            .enumerate()
            .filter(|(index, question)| answers.get(index) == Some(&question.correct_option))
            .count();

        QuizGradeOutcome {
            score: score as i32,
            total_questions: total as i32,
            percentage: score as f64 / total as f64 * 100.0,
        }
    }
}

// 测验成绩实体，一次作答一行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizResult {
    pub id: i64,
    pub quiz_id: String,
    pub student_id: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub answers: BTreeMap<usize, OptionLabel>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quiz(correct: &[OptionLabel]) -> Quiz {
        Quiz {
            id: 1,
            quiz_id: "QZ-001".to_string(),
            title: "Unit test quiz".to_string(),
            course: "Data Science".to_string(),
            duration_minutes: 30,
            questions: correct
                .iter()
                .enumerate()
                .map(|(i, label)| QuizQuestion {
                    prompt: format!("Question {}", i + 1),
                    options: vec![
                        "option a".to_string(),
                        "option b".to_string(),
                        "option c".to_string(),
                    ],
                    correct_option: *label,
                })
                .collect(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_grade_counts_matching_labels() {
        let quiz = quiz(&[OptionLabel::A, OptionLabel::B, OptionLabel::A]);
        let answers = BTreeMap::from([
            (0, OptionLabel::A),
            (1, OptionLabel::B),
            (2, OptionLabel::C),
        ]);

        let outcome = quiz.grade(&answers);
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.total_questions, 3);
        assert!((outcome.percentage - 66.66666666666667).abs() < 1e-9);
    }

    #[test]
    fn test_grade_missing_answers_count_incorrect() {
        let quiz = quiz(&[OptionLabel::A, OptionLabel::B]);
        let answers = BTreeMap::from([(0, OptionLabel::A)]);

        let outcome = quiz.grade(&answers);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total_questions, 2);
        assert_eq!(outcome.percentage, 50.0);
    }

    #[test]
    fn test_grade_out_of_range_index_ignored() {
        let quiz = quiz(&[OptionLabel::A]);
        let answers = BTreeMap::from([(0, OptionLabel::A), (7, OptionLabel::D)]);

        let outcome = quiz.grade(&answers);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total_questions, 1);
    }

    #[test]
    fn test_grade_is_deterministic() {
        let quiz = quiz(&[OptionLabel::B, OptionLabel::C, OptionLabel::D, OptionLabel::A]);
        let answers = BTreeMap::from([
            (0, OptionLabel::B),
            (1, OptionLabel::A),
            (2, OptionLabel::D),
            (3, OptionLabel::A),
        ]);

        let first = quiz.grade(&answers);
        let second = quiz.grade(&answers);
        assert_eq!(first, second);
        assert_eq!(first.score, 3);
    }

    #[test]
    fn test_grade_empty_answer_map() {
        let quiz = quiz(&[OptionLabel::A, OptionLabel::B]);
        let outcome = quiz.grade(&BTreeMap::new());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.percentage, 0.0);
    }

    #[test]
    fn test_option_label_positions() {
        assert_eq!(OptionLabel::A.index(), 0);
        assert_eq!(OptionLabel::D.index(), 3);
        assert_eq!(OptionLabel::from_index(2), Some(OptionLabel::C));
        assert_eq!(OptionLabel::from_index(4), None);
    }

    #[test]
    fn test_answers_map_survives_json() {
        let answers = BTreeMap::from([(0, OptionLabel::A), (2, OptionLabel::D)]);
        let json = serde_json::to_string(&answers).unwrap();
        let back: BTreeMap<usize, OptionLabel> = serde_json::from_str(&json).unwrap();
        assert_eq!(answers, back);
    }
}
