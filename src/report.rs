//! Serializable summaries of a parsed transcript.
//!
//! These are what the front end prints: one row of numbers per category and
//! subcategory, plus the transcript-wide totals.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::grade::Grade;
use crate::model::{Category, Transcript};
use crate::stats::Gradable;

/// Credits earned at each grade, in report column order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GradeCredits {
    #[serde(rename = "AA")]
    pub aa: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
    #[serde(rename = "E")]
    pub e: f64,
}

impl GradeCredits {
    pub fn of(node: &impl Gradable) -> Self {
        GradeCredits {
            aa: node.credits_for_grade(Grade::AA),
            a: node.credits_for_grade(Grade::A),
            b: node.credits_for_grade(Grade::B),
            c: node.credits_for_grade(Grade::C),
            d: node.credits_for_grade(Grade::D),
            e: node.credits_for_grade(Grade::E),
        }
    }

    pub fn get(&self, grade: Grade) -> f64 {
        match grade {
            Grade::AA => self.aa,
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
            Grade::E => self.e,
        }
    }
}

/// Figures shared by categories and subcategories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub name: String,
    pub credits: GradeCredits,
    pub passed_credits: f64,
    pub registered_credits: f64,
    pub total_grade_points: f64,
    /// `None` (JSON `null`) when nothing was registered.
    pub gpa: Option<f64>,
}

impl NodeReport {
    pub fn of(node: &impl Gradable) -> Self {
        NodeReport {
            name: node.name().to_string(),
            credits: GradeCredits::of(node),
            passed_credits: node.passed_credits(),
            registered_credits: node.registered_credits(),
            total_grade_points: node.total_grade_points(),
            gpa: node.gpa(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    #[serde(flatten)]
    pub summary: NodeReport,
    pub subcategories: Vec<NodeReport>,
}

impl CategoryReport {
    pub fn of(category: &Category) -> Self {
        CategoryReport {
            summary: NodeReport::of(category),
            subcategories: category.subcategories().map(NodeReport::of).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptReport {
    pub generated_at: DateTime<Utc>,
    pub registered_credits: f64,
    pub passed_credits: f64,
    pub total_grade_points: f64,
    pub gpa: f64,
    pub categories: Vec<CategoryReport>,
}

impl TranscriptReport {
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let totals = transcript.totals();
        TranscriptReport {
            generated_at: Utc::now(),
            registered_credits: totals.registered_credits,
            passed_credits: totals.passed_credits,
            total_grade_points: totals.total_grade_points,
            gpa: totals.gpa,
            categories: transcript.categories().map(CategoryReport::of).collect(),
        }
    }
}

/// Flat CSV row. Category rows leave `subcategory` empty.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub generated_at: DateTime<Utc>,
    pub category: String,
    pub subcategory: Option<String>,
    #[serde(rename = "AA")]
    pub aa: f64,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
    #[serde(rename = "E")]
    pub e: f64,
    pub passed_credits: f64,
    pub registered_credits: f64,
    pub gpa: Option<f64>,
}

impl ReportRow {
    fn new(
        generated_at: DateTime<Utc>,
        category: &str,
        subcategory: Option<&str>,
        node: &NodeReport,
    ) -> Self {
        ReportRow {
            generated_at,
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
            aa: node.credits.aa,
            a: node.credits.a,
            b: node.credits.b,
            c: node.credits.c,
            d: node.credits.d,
            e: node.credits.e,
            passed_credits: node.passed_credits,
            registered_credits: node.registered_credits,
            gpa: node.gpa,
        }
    }

    /// Subcategory rows first, then the category row, as in the printed table.
    pub fn rows(report: &TranscriptReport) -> Vec<ReportRow> {
        let mut rows = Vec::new();

        for category in &report.categories {
            let name = category.summary.name.as_str();
            for sub in &category.subcategories {
                rows.push(ReportRow::new(report.generated_at, name, Some(sub.name.as_str()), sub));
            }
            rows.push(ReportRow::new(report.generated_at, name, None, &category.summary));
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_transcript;

    const RAW: &str = "Math
     Algebra
             Linear Algebra I\t\tSmith\t選択\t2\tA\t2023\tSpring
             Linear Algebra II\t\tSmith\t選択\t3\tD\t2023\tFall
     Failed
             Topology\t\tLee\t選択\t2\tE\t2024\tSpring
Language
     English
             English I\t\tJones\t選択\t1\tAA\t2023\tSpring";

    #[test]
    fn test_report_from_transcript() {
        let report = TranscriptReport::from_transcript(&parse_transcript(RAW));

        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.registered_credits, 6.0);
        assert_eq!(report.passed_credits, 3.0);
        assert_eq!(report.total_grade_points, 10.0);
        assert_eq!(report.gpa, 1.67);

        let math = &report.categories[0];
        assert_eq!(math.summary.name, "Math");
        assert_eq!(math.summary.credits.get(Grade::A), 2.0);
        assert_eq!(math.summary.credits.get(Grade::D), 3.0);
        assert_eq!(math.summary.credits.get(Grade::E), 2.0);
        assert_eq!(math.summary.gpa, Some(1.2));
        assert_eq!(math.subcategories[1].name, "Failed");
        assert_eq!(math.subcategories[1].gpa, None);
    }

    #[test]
    fn test_category_sums_match_totals() {
        let report = TranscriptReport::from_transcript(&parse_transcript(RAW));

        let registered: f64 = report.categories.iter().map(|c| c.summary.registered_credits).sum();
        let passed: f64 = report.categories.iter().map(|c| c.summary.passed_credits).sum();
        assert_eq!(registered, report.registered_credits);
        assert_eq!(passed, report.passed_credits);
    }

    #[test]
    fn test_json_shape() {
        let report = TranscriptReport::from_transcript(&parse_transcript(RAW));
        let value = serde_json::to_value(&report).unwrap();

        let math = &value["categories"][0];
        assert_eq!(math["name"], "Math");
        assert_eq!(math["credits"]["AA"], 0.0);
        assert_eq!(math["credits"]["A"], 2.0);
        assert_eq!(math["subcategories"][1]["gpa"], serde_json::Value::Null);
        assert_eq!(value["gpa"], 1.67);
    }

    #[test]
    fn test_rows_order() {
        let report = TranscriptReport::from_transcript(&parse_transcript(RAW));
        let rows = ReportRow::rows(&report);

        let labels: Vec<_> = rows
            .iter()
            .map(|r| (r.category.as_str(), r.subcategory.as_deref()))
            .collect();
        assert_eq!(
            labels,
            [
                ("Math", Some("Algebra")),
                ("Math", Some("Failed")),
                ("Math", None),
                ("Language", Some("English")),
                ("Language", None),
            ]
        );
    }
}
