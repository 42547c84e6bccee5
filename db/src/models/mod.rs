pub mod assignment;
pub mod plagiarism_report;
pub mod submission;
