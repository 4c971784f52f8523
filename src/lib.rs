pub mod classify;
pub mod grade;
pub mod model;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod report;
pub mod stats;
