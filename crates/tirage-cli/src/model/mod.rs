pub mod score_report;
pub mod strategy;
