mod plagiarism_report_tests;
