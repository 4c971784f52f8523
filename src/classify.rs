//! Per-line classification of the transcript text format.
//!
//! A transcript is indented text: category headers start at column 0,
//! subcategory headers are indented by five spaces and course lines by
//! thirteen. Course fields are separated by tabs and/or spaces.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::grade::Grade;
use crate::model::CourseResult;

/// What a single transcript line turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Category(&'a str),
    SubCategory(&'a str),
    Course(CourseResult),
    Noise,
}

macro_rules! line_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

line_pattern!(RE_CATEGORY, r"^(?P<category>\S+)$");

line_pattern!(RE_SUBCATEGORY, r"^ {5}(?P<subcategory>\S+)$");

// 選択 marks an elective course. Word boundaries are ASCII-only so kanji
// directly around the credit or the year still count as a boundary.
line_pattern!(
    RE_COURSE,
    concat!(
        r"^ {13}(?P<name>[^\t ][^\t]*)[\t ]*",
        r"(?P<teacher>[^\t]+?)[\t ]*",
        r"選択[\t ]*",
        r"(?P<credit>(?-u:\b)[0-9]+(?:\.[0-9]+)?(?-u:\b))[\t ]*",
        r"(?P<grade>AA|A|B|C|D|E)[\t ]*",
        r"(?P<term>(?-u:\b)[0-9]{4}(?-u:\b))[\t ]*",
        r"(?P<semester>.+)"
    )
);

/// Classifies one line. Patterns are tried as category, subcategory, then
/// course; the first match wins and anything else is [`Line::Noise`].
///
/// Expects text already folded by [`crate::normalize::to_half_width`].
pub fn classify(line: &str) -> Line<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if let Some(caps) = captures(&RE_CATEGORY, line) {
        if let Some(m) = caps.name("category") {
            return Line::Category(m.as_str());
        }
    } else if let Some(caps) = captures(&RE_SUBCATEGORY, line) {
        if let Some(m) = caps.name("subcategory") {
            return Line::SubCategory(m.as_str());
        }
    } else if let Some(caps) = captures(&RE_COURSE, line) {
        if let Some(course) = course_from_captures(&caps) {
            return Line::Course(course);
        }
    }

    Line::Noise
}

fn captures<'h>(regex: &LazyLock<Option<Regex>>, line: &'h str) -> Option<Captures<'h>> {
    regex.as_ref()?.captures(line)
}

/// Builds the course record, rejecting lines with an empty field, a
/// non-positive credit or a zero year.
fn course_from_captures(caps: &Captures<'_>) -> Option<CourseResult> {
    let field = |name: &str| caps.name(name).map(|m| m.as_str()).filter(|s| !s.is_empty());

    let credit: f64 = field("credit")?.parse().ok()?;
    if !credit.is_finite() || credit <= 0.0 {
        return None;
    }

    let term: u16 = field("term")?.parse().ok()?;
    if term == 0 {
        return None;
    }

    Some(CourseResult {
        name: field("name")?.to_string(),
        teacher: field("teacher")?.to_string(),
        credit,
        grade: field("grade")?.parse::<Grade>().ok()?,
        term,
        semester: field("semester")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE: &str = "             Linear Algebra I\t\tSmith\t選択\t2\tA\t2023\tSpring";

    fn course(line: &str) -> CourseResult {
        match classify(line) {
            Line::Course(c) => c,
            other => panic!("expected a course line, got {:?}", other),
        }
    }

    #[test]
    fn test_category_line() {
        assert_eq!(classify("Math"), Line::Category("Math"));
        assert_eq!(classify("基礎科目"), Line::Category("基礎科目"));
    }

    #[test]
    fn test_subcategory_line() {
        assert_eq!(classify("     Algebra"), Line::SubCategory("Algebra"));
    }

    #[test]
    fn test_headers_with_inner_space_are_noise() {
        assert_eq!(classify("Math Dept"), Line::Noise);
        assert_eq!(classify("     Linear Algebra"), Line::Noise);
    }

    #[test]
    fn test_wrong_indent_is_noise() {
        assert_eq!(classify("    Algebra"), Line::Noise);
        assert_eq!(classify("      Algebra"), Line::Noise);
        assert_eq!(classify(""), Line::Noise);
        assert_eq!(classify("   "), Line::Noise);
    }

    #[test]
    fn test_course_fields() {
        let c = course(COURSE);
        assert_eq!(c.name, "Linear Algebra I");
        assert_eq!(c.teacher, "Smith");
        assert_eq!(c.credit, 2.0);
        assert_eq!(c.grade, Grade::A);
        assert_eq!(c.term, 2023);
        assert_eq!(c.semester, "Spring");
    }

    #[test]
    fn test_course_decimal_credit_and_double_letter_grade() {
        let c = course("             Seminar\tTanaka\t選択\t1.5\tAA\t2022\t後期");
        assert_eq!(c.credit, 1.5);
        assert_eq!(c.grade, Grade::AA);
        assert_eq!(c.semester, "後期");
    }

    #[test]
    fn test_course_with_space_separators() {
        let c = course("             English\tJones  選択  2  B  2021  前期 集中");
        assert_eq!(c.teacher, "Jones");
        assert_eq!(c.grade, Grade::B);
        assert_eq!(c.semester, "前期 集中");
    }

    #[test]
    fn test_year_followed_directly_by_kanji_semester() {
        let c = course("             Seminar\tTanaka\t選択\t2\tA\t2023前期");
        assert_eq!(c.credit, 2.0);
        assert_eq!(c.term, 2023);
        assert_eq!(c.semester, "前期");
    }

    #[test]
    fn test_credit_directly_after_elective_marker() {
        let c = course("             Seminar\tTanaka\t選択2\tA\t2023\t前期");
        assert_eq!(c.teacher, "Tanaka");
        assert_eq!(c.credit, 2.0);
        assert_eq!(c.grade, Grade::A);
        assert_eq!(c.semester, "前期");
    }

    #[test]
    fn test_zero_credit_is_dropped() {
        let line = "             Linear Algebra I\t\tSmith\t選択\t0\tA\t2023\tSpring";
        assert_eq!(classify(line), Line::Noise);
        let line = "             Linear Algebra I\t\tSmith\t選択\t0.0\tA\t2023\tSpring";
        assert_eq!(classify(line), Line::Noise);
    }

    #[test]
    fn test_zero_year_is_dropped() {
        let line = "             Linear Algebra I\t\tSmith\t選択\t2\tA\t0000\tSpring";
        assert_eq!(classify(line), Line::Noise);
    }

    #[test]
    fn test_unknown_grade_is_dropped() {
        let line = "             Linear Algebra I\t\tSmith\t選択\t2\tF\t2023\tSpring";
        assert_eq!(classify(line), Line::Noise);
    }

    #[test]
    fn test_missing_elective_marker_is_dropped() {
        let line = "             Linear Algebra I\t\tSmith\t必修\t2\tA\t2023\tSpring";
        assert_eq!(classify(line), Line::Noise);
    }

    #[test]
    fn test_missing_semester_is_dropped() {
        let line = "             Linear Algebra I\t\tSmith\t選択\t2\tA\t2023";
        assert_eq!(classify(line), Line::Noise);
    }

    #[test]
    fn test_course_needs_exactly_thirteen_spaces() {
        assert_eq!(classify(&format!(" {}", COURSE)), Line::Noise);
        assert_eq!(classify(&COURSE[1..]), Line::Noise);
    }

    #[test]
    fn test_crlf_line_ending_is_ignored() {
        assert_eq!(classify("Math\r"), Line::Category("Math"));
        assert_eq!(course(&format!("{}\r", COURSE)).semester, "Spring");
    }
}
