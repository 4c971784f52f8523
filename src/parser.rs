//! Builds the category tree from a transcript dump.

use indexmap::IndexMap;
use std::rc::Rc;
use tracing::{debug, info};

use crate::classify::{Line, classify};
use crate::model::{Category, CourseResult, SubCategory, Totals, Transcript};
use crate::normalize::to_half_width;

/// Parses a full transcript dump into a [`Transcript`].
///
/// Never fails: lines that cannot be used are skipped. Each call starts from
/// an empty tree.
#[tracing::instrument(skip_all, fields(bytes = raw.len()))]
pub fn parse_transcript(raw: &str) -> Transcript {
    let normalized = to_half_width(raw);
    let mut parser = TranscriptParser::new();

    for (index, line) in normalized.split('\n').enumerate() {
        parser.feed_line(index + 1, line);
    }

    let transcript = parser.finish();
    let totals = transcript.totals();
    info!(
        categories = transcript.categories.len(),
        registered = totals.registered_credits,
        passed = totals.passed_credits,
        gpa = totals.gpa,
        "Transcript parsed"
    );
    transcript
}

/// Line-at-a-time tree builder.
///
/// Keeps a cursor on the current category and the current subcategory. A new
/// category header moves only the category cursor, so course lines that
/// follow it without a subcategory header still land in the previous
/// subcategory.
#[derive(Debug, Default)]
pub struct TranscriptParser {
    categories: IndexMap<String, Category>,
    current_category: Option<usize>,
    // (category index, subcategory index)
    current_subcategory: Option<(usize, usize)>,
}

impl TranscriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one already-normalized line. `line_no` is only used for logging.
    pub fn feed_line(&mut self, line_no: usize, line: &str) {
        match classify(line) {
            Line::Category(name) => self.enter_category(name),
            Line::SubCategory(name) => self.enter_subcategory(line_no, name),
            Line::Course(course) => self.attach_course(line_no, course),
            Line::Noise => {
                if !line.trim().is_empty() {
                    debug!(line_no, "Skipping unrecognized line");
                }
            }
        }
    }

    fn enter_category(&mut self, name: &str) {
        let index = match self.categories.get_index_of(name) {
            Some(index) => index,
            None => {
                let (index, _) = self
                    .categories
                    .insert_full(name.to_string(), Category::new(name));
                index
            }
        };
        self.current_category = Some(index);
    }

    fn enter_subcategory(&mut self, line_no: usize, name: &str) {
        let Some(cat_index) = self.current_category else {
            debug!(line_no, subcategory = name, "Subcategory before any category, ignored");
            return;
        };
        let Some((_, category)) = self.categories.get_index_mut(cat_index) else {
            return;
        };

        let sub_index = match category.subcategories.get_index_of(name) {
            Some(index) => index,
            None => {
                let sub = SubCategory::new(name, &category.name);
                let (index, _) = category.subcategories.insert_full(name.to_string(), sub);
                index
            }
        };
        self.current_subcategory = Some((cat_index, sub_index));
    }

    fn attach_course(&mut self, line_no: usize, course: CourseResult) {
        let (Some(cat_index), Some((sub_cat_index, sub_index))) =
            (self.current_category, self.current_subcategory)
        else {
            debug!(line_no, course = %course.name, "Course outside any subcategory, ignored");
            return;
        };

        if sub_cat_index != cat_index {
            debug!(
                line_no,
                course = %course.name,
                "Course attached to a subcategory of an earlier category"
            );
        }

        let course = Rc::new(course);

        if let Some((_, category)) = self.categories.get_index_mut(cat_index) {
            category.results.push(Rc::clone(&course));
        }
        if let Some(sub) = self
            .categories
            .get_index_mut(sub_cat_index)
            .and_then(|(_, category)| category.subcategories.get_index_mut(sub_index))
            .map(|(_, sub)| sub)
        {
            sub.results.push(course);
        }
    }

    /// Consumes the builder and computes the global totals.
    pub fn finish(self) -> Transcript {
        let totals = Totals::from_categories(self.categories.values());
        Transcript {
            categories: self.categories,
            totals,
        }
    }
}
