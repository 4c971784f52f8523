//! The category / subcategory / course result tree built from a transcript.

use indexmap::IndexMap;
use serde::Serialize;
use std::rc::Rc;

use crate::grade::Grade;

/// One graded course, as read from a single transcript line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseResult {
    pub name: String,
    pub teacher: String,
    pub credit: f64,
    pub grade: Grade,
    /// Academic year, e.g. `2023`.
    pub term: u16,
    /// Free-form semester label following the year.
    pub semester: String,
}

/// Second level of the hierarchy. Owned by a [`Category`].
#[derive(Debug)]
pub struct SubCategory {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) results: Vec<Rc<CourseResult>>,
}

impl SubCategory {
    pub(crate) fn new(name: &str, category: &str) -> Self {
        SubCategory {
            name: name.to_string(),
            category: category.to_string(),
            results: Vec::new(),
        }
    }

    /// Name of the category this subcategory was declared under.
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Top level of the hierarchy.
///
/// `results` holds every course attached while this category was current,
/// which is not always the union of its own subcategories' results.
#[derive(Debug)]
pub struct Category {
    pub(crate) name: String,
    pub(crate) subcategories: IndexMap<String, SubCategory>,
    pub(crate) results: Vec<Rc<CourseResult>>,
}

impl Category {
    pub(crate) fn new(name: &str) -> Self {
        Category {
            name: name.to_string(),
            subcategories: IndexMap::new(),
            results: Vec::new(),
        }
    }

    /// Subcategories in first-seen order.
    pub fn subcategories(&self) -> impl Iterator<Item = &SubCategory> {
        self.subcategories.values()
    }

    pub fn subcategory(&self, name: &str) -> Option<&SubCategory> {
        self.subcategories.get(name)
    }
}

/// Whole-transcript totals, summed over the top-level categories.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub registered_credits: f64,
    pub passed_credits: f64,
    pub total_grade_points: f64,
    /// Zero when nothing was registered.
    pub gpa: f64,
}

/// Result of parsing one transcript dump.
#[derive(Debug)]
pub struct Transcript {
    pub(crate) categories: IndexMap<String, Category>,
    pub(crate) totals: Totals,
}

impl Transcript {
    /// Categories in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
