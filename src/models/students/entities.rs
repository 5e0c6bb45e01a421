use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum StudentStatus {
    Active,    // 在读
    Inactive,  // 休学
    Completed, // 结业
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            "completed" => Ok(StudentStatus::Completed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的学生状态: '{s}'. 支持的状态: active, inactive, completed"
            ))),
        }
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::Active => write!(f, "active"),
            StudentStatus::Inactive => write!(f, "inactive"),
            StudentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            "completed" => Ok(StudentStatus::Completed),
            _ => Err(format!("Invalid student status: {s}")),
        }
    }
}

// 成绩等第，Not Assessed 为选课后的初始值
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum GradeLabel {
    #[serde(rename = "Not Assessed")]
    NotAssessed,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl GradeLabel {
    pub const NOT_ASSESSED: &'static str = "Not Assessed";

    const ALL: [(&'static str, GradeLabel); 9] = [
        (Self::NOT_ASSESSED, GradeLabel::NotAssessed),
        ("A+", GradeLabel::APlus),
        ("A", GradeLabel::A),
        ("B+", GradeLabel::BPlus),
        ("B", GradeLabel::B),
        ("C+", GradeLabel::CPlus),
        ("C", GradeLabel::C),
        ("D", GradeLabel::D),
        ("F", GradeLabel::F),
    ];

    pub fn as_str(&self) -> &'static str {
        match Self::ALL.iter().find(|(_, g)| g == self) {
            Some((label, _)) => label,
            None => Self::NOT_ASSESSED,
        }
    }
}

impl<'de> Deserialize<'de> for GradeLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<GradeLabel>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的成绩等第: '{s}'. 支持: Not Assessed, A+, A, B+, B, C+, C, D, F"
            ))
        })
    }
}

impl std::fmt::Display for GradeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GradeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(label, _)| *label == s)
            .map(|(_, g)| g.clone())
            .ok_or_else(|| format!("Invalid grade label: {s}"))
    }
}

// 课程进度，固定五档刻度
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum CourseProgress {
    #[serde(rename = "0%")]
    P0,
    #[serde(rename = "25%")]
    P25,
    #[serde(rename = "50%")]
    P50,
    #[serde(rename = "75%")]
    P75,
    #[serde(rename = "100%")]
    P100,
}

impl CourseProgress {
    pub fn percent(&self) -> u8 {
        match self {
            CourseProgress::P0 => 0,
            CourseProgress::P25 => 25,
            CourseProgress::P50 => 50,
            CourseProgress::P75 => 75,
            CourseProgress::P100 => 100,
        }
    }
}

impl<'de> Deserialize<'de> for CourseProgress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CourseProgress>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程进度: '{s}'. 支持: 0%, 25%, 50%, 75%, 100%"
            ))
        })
    }
}

impl std::fmt::Display for CourseProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl std::str::FromStr for CourseProgress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0%" => Ok(CourseProgress::P0),
            "25%" => Ok(CourseProgress::P25),
            "50%" => Ok(CourseProgress::P50),
            "75%" => Ok(CourseProgress::P75),
            "100%" => Ok(CourseProgress::P100),
            _ => Err(format!("Invalid course progress: {s}")),
        }
    }
}

// 选课状态，成绩/进度/缴费三态随行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CourseEnrollment {
    pub course: String,
    pub grade: GradeLabel,
    pub progress: CourseProgress,
    pub fee_paid: bool,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

impl CourseEnrollment {
    /// 选课即建整行，三态同时落默认值
    pub fn seeded(course: impl Into<String>, enrolled_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            course: course.into(),
            grade: GradeLabel::NotAssessed,
            progress: CourseProgress::P0,
            fee_paid: false,
            enrolled_at,
        }
    }
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub phone: Option<String>,
    pub status: StudentStatus,
    pub email_verified: bool,
    pub courses: Vec<CourseEnrollment>,
    pub registered_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn is_enrolled(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c.course == course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_label_round_trip() {
        for s in [
            "Not Assessed",
            "A+",
            "A",
            "B+",
            "B",
            "C+",
            "C",
            "D",
            "F",
        ] {
            let grade = s.parse::<GradeLabel>().unwrap();
            assert_eq!(grade.to_string(), s);
        }
        assert!("A-".parse::<GradeLabel>().is_err());
        assert!("not assessed".parse::<GradeLabel>().is_err());
    }

    #[test]
    fn test_course_progress_parse() {
        assert_eq!("0%".parse::<CourseProgress>(), Ok(CourseProgress::P0));
        assert_eq!("75%".parse::<CourseProgress>(), Ok(CourseProgress::P75));
        assert!("80%".parse::<CourseProgress>().is_err());
        assert_eq!(CourseProgress::P50.percent(), 50);
    }

    #[test]
    fn test_student_status_parse() {
        assert_eq!("active".parse::<StudentStatus>(), Ok(StudentStatus::Active));
        assert_eq!(
            "completed".parse::<StudentStatus>(),
            Ok(StudentStatus::Completed)
        );
        assert!("graduated".parse::<StudentStatus>().is_err());
    }

    #[test]
    fn test_seeded_enrollment_defaults() {
        let now = chrono::Utc::now();
        let enrollment = CourseEnrollment::seeded("Data Science", now);
        assert_eq!(enrollment.grade, GradeLabel::NotAssessed);
        assert_eq!(enrollment.progress, CourseProgress::P0);
        assert!(!enrollment.fee_paid);
    }

    #[test]
    fn test_grade_label_serde_uses_display_labels() {
        let json = serde_json::to_string(&GradeLabel::BPlus).unwrap();
        assert_eq!(json, "\"B+\"");
        let parsed: GradeLabel = serde_json::from_str("\"Not Assessed\"").unwrap();
        assert_eq!(parsed, GradeLabel::NotAssessed);
    }
}
