//! Production sheet layouts
//!
//! One constructor per backing sheet. The numeric offsets are the sheet's
//! wire contract as deployed today; header rules are declared only where the
//! live sheet actually carries usable headers. Versions are bumped whenever
//! the spreadsheet's column contract moves.

use super::{FieldRule, SheetSchema};

/// `ENQUIRY`: candidate enquiries. Five banner rows, headers at row 6.
pub fn enquiry() -> SheetSchema {
    SheetSchema::new("ENQUIRY", 3, 5, 6)
        .field("timestamp", FieldRule::exact("Timestamp", 0))
        .field("indent_no", FieldRule::exact("Indent Number", 1))
        .field("enquiry_no", FieldRule::exact("Candidate Enquiry Number", 2))
        .field("applying_for_post", FieldRule::exact("Applying For the Post", 3))
        .field("department", FieldRule::exact("Department", 4))
        .field("candidate_name", FieldRule::exact("Candidate Name", 5))
        .field("dob", FieldRule::exact("DOB", 6))
        .field("candidate_phone", FieldRule::exact("Candidate Phone Number", 7))
        .field("candidate_email", FieldRule::exact("Candidate Email", 8))
        .field("previous_company", FieldRule::exact("Previous Company Name", 9))
        .field("job_experience", FieldRule::exact("Job Experience", 10))
        .field("last_salary", FieldRule::exact("Last Salary Drawn", 11))
        .field("previous_position", FieldRule::exact("Previous Position", 12))
        .field(
            "reason_for_leaving",
            FieldRule::exact("Reason Of Leaving Previous Company", 13),
        )
        .field("marital_status", FieldRule::exact("Marital Status", 14))
        .field(
            "last_employer_mobile",
            FieldRule::exact("Last Employer Mobile Number", 15),
        )
        .field("candidate_photo", FieldRule::fixed(16))
        .field("reference_by", FieldRule::exact("Reference By", 17))
        .field("present_address", FieldRule::exact("Present Address", 18))
        .field("candidate_resume", FieldRule::fixed(19))
        .field("aadhar_no", FieldRule::exact("Aadhar Number", 20))
        // Call-tracker stamp pair; written 1-based as column 27.
        .field("call_actual", FieldRule::fixed(26))
        .field("call_planned", FieldRule::fixed(27))
        .field("actual_joining_date", FieldRule::fixed(28))
}

/// `Follow - Up`: one row per call outcome. Headers at row 1.
pub fn follow_up() -> SheetSchema {
    SheetSchema::new("Follow - Up", 2, 0, 1)
        .field("timestamp", FieldRule::fixed(0))
        .field("indent_no", FieldRule::fixed(1))
        .field("enquiry_no", FieldRule::fixed(2))
        .field("status", FieldRule::fixed(3))
        .field("candidate_says", FieldRule::fixed(4))
        .field("next_date", FieldRule::fixed(5))
}

/// `INDENT`: recruitment indents. Five banner rows, headers at row 6.
pub fn indent() -> SheetSchema {
    SheetSchema::new("INDENT", 3, 5, 6)
        .field("timestamp", FieldRule::contains("Timestamp", 0))
        .field("indent_number", FieldRule::contains("Indent Number", 1))
        .field("company", FieldRule::contains("Company", 2))
        .field("post", FieldRule::contains("Post", 3))
        .field("gender", FieldRule::contains("Gender", 4))
        .field("prefer", FieldRule::contains("Prefer", 5))
        .field("no_of_posts", FieldRule::fixed(6))
        .field("completion_date", FieldRule::fixed(7))
        .field("department", FieldRule::contains("Department", 8))
        .field("experience", FieldRule::fixed(9))
        .field("status", FieldRule::fixed(10))
        .field("planned", FieldRule::fixed(11))
        .field("enquiry_count", FieldRule::fixed(19))
        .field("pending_post", FieldRule::fixed(21))
        .field("total_joined", FieldRule::fixed(22))
}

/// `JOINING`: the widest sheet; one row per joined employee. Five banner
/// rows, headers at row 6. Most of the tail has no headers, only offsets.
pub fn joining() -> SheetSchema {
    SheetSchema::new("JOINING", 5, 5, 6)
        .field("timestamp", FieldRule::fixed(0))
        .field("joining_no", FieldRule::exact("SKA-Joining ID", 1))
        .field("candidate_name", FieldRule::exact("Name As Per Aadhar", 2))
        .field("father_name", FieldRule::exact("Father Name", 3))
        .field("date_of_joining", FieldRule::exact("Date Of Joining", 4))
        .field("designation", FieldRule::exact("Designation", 5))
        .field("aadhar_photo", FieldRule::fixed(6))
        .field("candidate_photo", FieldRule::fixed(7))
        .field("current_address", FieldRule::fixed(8))
        .field("dob_as_per_aadhar", FieldRule::fixed(9))
        .field("gender", FieldRule::fixed(10))
        .field("mobile_no", FieldRule::exact("Mobile No.", 11))
        .field("family_mobile_no", FieldRule::fixed(12))
        .field("relation_with_family", FieldRule::fixed(13))
        .field("account_no", FieldRule::fixed(14))
        .field("ifsc_code", FieldRule::fixed(15))
        .field("branch_name", FieldRule::fixed(16))
        .field("passbook_photo", FieldRule::fixed(17))
        .field("email", FieldRule::fixed(18))
        .field("qualification", FieldRule::fixed(19))
        .field("department", FieldRule::exact("Department", 20))
        .field("salary", FieldRule::fixed(21))
        .field("aadhar_no", FieldRule::fixed(22))
        .field("joining_company", FieldRule::exact("Joining Company Name", 35))
        .field("joining_place", FieldRule::exact("Joining Place", 39))
        // After-joining planned/actual pair.
        .field("planned_date", FieldRule::fixed(23))
        .field("actual", FieldRule::fixed(24))
        .field("leaving_date", FieldRule::fixed(24))
        .field("leaving_reason", FieldRule::fixed(25))
        .field("employee_code", FieldRule::fixed(26))
        .field("salary_confirmation", FieldRule::fixed(27))
        .field("reporting_officer", FieldRule::fixed(28))
        .field("base_address", FieldRule::fixed(29))
        .field("punch_code", FieldRule::fixed(30))
        .field("official_email", FieldRule::fixed(31))
        .field("email_password", FieldRule::fixed(32))
        .field("current_bank_account_no", FieldRule::fixed(33))
        .field("current_bank_ifsc", FieldRule::fixed(34))
        .field("pf_esic", FieldRule::fixed(36))
        .field("id_proof_copy", FieldRule::fixed(37))
        .field("joining_letter", FieldRule::fixed(38))
        .field("manual_image_url", FieldRule::fixed(39))
        // Issued assets block, columns 41-51 (1-based).
        .field("laptop_details", FieldRule::fixed(40))
        .field("laptop_image", FieldRule::fixed(41))
        .field("mobile_name", FieldRule::fixed(42))
        .field("mobile_image", FieldRule::fixed(43))
        .field("item1", FieldRule::fixed(44))
        .field("item1_image", FieldRule::fixed(45))
        .field("item2", FieldRule::fixed(46))
        .field("item2_image", FieldRule::fixed(47))
        .field("item3", FieldRule::fixed(49))
        .field("item3_image", FieldRule::fixed(50))
        // Leaving workflow pair + stamps.
        .field("leaving_planned", FieldRule::fixed(51))
        .field("leaving_actual", FieldRule::fixed(52))
        .field("leaving_workflow_date", FieldRule::fixed(55))
        // After-leaving department pairs.
        .field("admin_planned", FieldRule::fixed(70))
        .field("admin_actual", FieldRule::fixed(71))
        .field("admin_summary", FieldRule::fixed(73))
        .field("account_planned", FieldRule::fixed(74))
        .field("account_actual", FieldRule::fixed(75))
        .field("account_summary", FieldRule::fixed(77))
        .field("store_planned", FieldRule::fixed(78))
        .field("store_actual", FieldRule::fixed(79))
        .field("store_summary", FieldRule::fixed(81))
        // Previous-company block merged into joining history views.
        .field("previous_company_name", FieldRule::fixed(83))
        .field("previous_company_address", FieldRule::fixed(84))
        .field("offer_letter", FieldRule::fixed(85))
        .field("increment_letter", FieldRule::fixed(86))
        .field("pay_slip", FieldRule::fixed(87))
        .field("resignation_letter", FieldRule::fixed(88))
        .field("enquiry_no", FieldRule::fixed(89))
        // Written 1-based as column 91.
        .field("incentive_category", FieldRule::fixed(90))
        .field("blood_group", FieldRule::fixed(92))
        .field("identification_marks", FieldRule::fixed(93))
        .field("attendance_mode", FieldRule::fixed(94))
        .field("interview_assessment_sheet", FieldRule::fixed(107))
}

/// `LEAVING`: one row per departed employee. Five banner rows.
pub fn leaving() -> SheetSchema {
    SheetSchema::new("LEAVING", 2, 5, 6)
        .field("timestamp", FieldRule::fixed(0))
        .field("employee_id", FieldRule::fixed(1))
        .field("name", FieldRule::fixed(2))
        .field("date_of_leaving", FieldRule::fixed(3))
        .field("mobile_no", FieldRule::fixed(4))
        .field("reason_of_leaving", FieldRule::fixed(5))
        .field("firm_name", FieldRule::fixed(6))
        .field("father_name", FieldRule::fixed(7))
        .field("date_of_joining", FieldRule::fixed(8))
        .field("working_location", FieldRule::fixed(9))
        .field("designation", FieldRule::fixed(10))
        .field("department", FieldRule::fixed(11))
        .field("planned_date", FieldRule::fixed(12))
        .field("actual", FieldRule::fixed(13))
}

/// `Assets`: issued-asset register, keyed by employee id in column 2.
pub fn assets() -> SheetSchema {
    SheetSchema::new("Assets", 1, 0, 1)
        .field("timestamp", FieldRule::fixed(0))
        .field("employee_id", FieldRule::fixed(1))
        .field("employee_name", FieldRule::fixed(2))
        .field("email_id", FieldRule::fixed(3))
        .field("email_password", FieldRule::fixed(4))
        .field("laptop", FieldRule::fixed(5))
        .field("mobile", FieldRule::fixed(6))
        .field("manual_image_url", FieldRule::fixed(9))
        .field("punch_code", FieldRule::fixed(10))
        .field("salary_confirmation", FieldRule::fixed(11))
        .field("reporting_officer", FieldRule::fixed(12))
        .field("pf", FieldRule::fixed(13))
        .field("base_address", FieldRule::fixed(14))
        .field("id_proof_copy", FieldRule::fixed(15))
        .field("joining_letter", FieldRule::fixed(16))
        .field("incentive_category", FieldRule::fixed(17))
}

/// `Advance`: outstanding advance balances per employee.
pub fn advance() -> SheetSchema {
    SheetSchema::new("Advance", 1, 0, 1)
        .field("employee_code", FieldRule::fixed(0))
        .field("name", FieldRule::fixed(1))
        .field("closing_amount", FieldRule::fixed(6))
}

/// `SIES EMPLOYEES`: the plain employee registry. Header names drift on this
/// sheet, so everything resolves by substring with ordinal fallbacks.
pub fn sies_employees() -> SheetSchema {
    SheetSchema::new("SIES EMPLOYEES", 1, 0, 1)
        .field("serial_no", FieldRule::contains("S.No", 0))
        .field("employee_id", FieldRule::contains("Employee Id", 1))
        .field("name", FieldRule::contains("Name", 2))
        .field("designation", FieldRule::contains("Designation", 3))
        .field("salary", FieldRule::contains("Salary", 4))
        .field("aadhaar_card_no", FieldRule::contains("Aadhaar", 5))
        .field("pan_card_no", FieldRule::contains("PAN", 6))
        .field("address", FieldRule::contains("Address", 7))
        .field("join_date", FieldRule::contains("Join Date", 8))
        .field("mobile_no", FieldRule::contains("Mobile", 9))
        .field("status", FieldRule::contains("Status", 10))
}
