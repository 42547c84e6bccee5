pub mod m202608150001_create_assignments;
pub mod m202608150002_create_submissions;
pub mod m202608150003_create_plagiarism_reports;
