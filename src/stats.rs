//! Credit and grade-point aggregation over categories and subcategories.

use std::rc::Rc;

use crate::grade::Grade;
use crate::model::{Category, CourseResult, SubCategory, Totals};

/// `points / registered` rounded to two decimal places.
///
/// The ratio is scaled before rounding so that e.g. `6 / 5` lands on `1.2`.
pub fn round_gpa(points: f64, registered: f64) -> f64 {
    (100.0 * points / registered).round() / 100.0
}

/// A node of the transcript tree that owns a list of course results.
///
/// All aggregation is derived from [`Gradable::results`], so categories and
/// subcategories share one implementation.
pub trait Gradable {
    fn name(&self) -> &str;

    fn results(&self) -> &[Rc<CourseResult>];

    fn results_with_grade(&self, grade: Grade) -> impl Iterator<Item = &CourseResult> {
        self.results()
            .iter()
            .map(Rc::as_ref)
            .filter(move |r| r.grade == grade)
    }

    /// Total credit earned at exactly `grade`.
    fn credits_for_grade(&self, grade: Grade) -> f64 {
        self.results_with_grade(grade).map(|r| r.credit).sum()
    }

    fn passed_results(&self) -> impl Iterator<Item = &CourseResult> {
        self.results()
            .iter()
            .map(Rc::as_ref)
            .filter(|r| r.grade.is_passed())
    }

    fn passed_credits(&self) -> f64 {
        self.passed_results().map(|r| r.credit).sum()
    }

    /// Credits counted toward the GPA denominator: everything but `E`.
    fn registered_credits(&self) -> f64 {
        self.results()
            .iter()
            .filter(|r| r.grade != Grade::E)
            .map(|r| r.credit)
            .sum()
    }

    fn total_grade_points(&self) -> f64 {
        self.results()
            .iter()
            .filter(|r| r.grade.point() > 0)
            .map(|r| f64::from(r.grade.point()) * r.credit)
            .sum()
    }

    /// `None` when no credits are registered.
    fn gpa(&self) -> Option<f64> {
        let registered = self.registered_credits();
        if registered == 0.0 {
            None
        } else {
            Some(round_gpa(self.total_grade_points(), registered))
        }
    }
}

impl Gradable for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn results(&self) -> &[Rc<CourseResult>] {
        &self.results
    }
}

impl Gradable for SubCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn results(&self) -> &[Rc<CourseResult>] {
        &self.results
    }
}

impl Totals {
    /// Sums the top-level categories. The GPA falls back to zero when nothing
    /// was registered.
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Self {
        let mut totals = Totals::default();

        for category in categories {
            totals.registered_credits += category.registered_credits();
            totals.passed_credits += category.passed_credits();
            totals.total_grade_points += category.total_grade_points();
        }

        totals.gpa = if totals.registered_credits == 0.0 {
            0.0
        } else {
            round_gpa(totals.total_grade_points, totals.registered_credits)
        };

        totals
    }
}
