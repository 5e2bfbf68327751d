//! Generated artifacts: PDF reports and the case JSON export.

pub mod export;
pub mod pdf;

use tathya_db::models::case::Case;

/// Every field of a case as `(label, value)` pairs, in display order.
/// Missing values render as `N/A`.
pub fn case_fields(case: &Case) -> Vec<(&'static str, String)> {
    fn opt<T: ToString>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map(|v| v.to_string())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "N/A".to_string())
    }

    vec![
        ("Case ID", case.case_id.clone()),
        ("Status", case.status.clone()),
        ("Case Type", case.case_type.clone()),
        ("Category", opt(&case.category)),
        ("Referred By", opt(&case.referred_by)),
        ("Case Date", opt(&case.case_date)),
        ("Customer Name", opt(&case.customer_name)),
        ("LAN", opt(&case.lan)),
        (
            "Loan Amount",
            case.loan_amount
                .map(tathya_core::legal::format_inr)
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        ("Product", opt(&case.product)),
        ("Branch", opt(&case.branch_location)),
        ("Region", opt(&case.region)),
        ("PAN", opt(&case.pan)),
        ("Aadhaar", opt(&case.aadhaar)),
        ("Mobile", opt(&case.mobile_number)),
        ("Email", opt(&case.email_id)),
        ("Disbursement Date", opt(&case.disbursement_date)),
        ("Priority", opt(&case.priority)),
        ("Risk Score", opt(&case.risk_score.map(|s| format!("{s:.1}")))),
        ("Risk Category", opt(&case.risk_category)),
        ("Closure Type", opt(&case.closure_type)),
        ("Closure Remarks", opt(&case.closure_remarks)),
        (
            "Closed At",
            opt(&case.closed_at.map(|t| t.format("%Y-%m-%d %H:%M UTC"))),
        ),
        ("Description", case.case_description.clone()),
        (
            "Case Details",
            opt(&case.case_details.as_ref().map(|d| d.to_string())),
        ),
        ("Created By", case.created_by.clone()),
        ("Created At", case.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ("Updated At", case.updated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    ]
}
