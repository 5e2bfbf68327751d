//! Legal notice types and template rendering.
//!
//! Templates are plain text with `**HEADING**` markers. Missing case fields
//! render as `N/A`. Investigation grounds and violations replace the
//! bracketed placeholders when supplied.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days the recipient has to respond to a show cause notice.
pub const SCN_RESPONSE_DAYS: i64 = 15;
/// Days allowed for payment under a recovery notice.
pub const RECOVERY_PAYMENT_DAYS: i64 = 7;

const ISSUER: &str = "Legal Department";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeType {
    #[serde(rename = "Show Cause Notice (SCN)", alias = "SCN")]
    ShowCause,
    #[serde(rename = "Reasoned Order")]
    ReasonedOrder,
    #[serde(rename = "Recovery Notice")]
    RecoveryNotice,
    #[serde(rename = "Legal Opinion")]
    LegalOpinion,
    #[serde(rename = "Demand Notice")]
    DemandNotice,
}

impl NoticeType {
    pub fn label(self) -> &'static str {
        match self {
            NoticeType::ShowCause => "Show Cause Notice (SCN)",
            NoticeType::ReasonedOrder => "Reasoned Order",
            NoticeType::RecoveryNotice => "Recovery Notice",
            NoticeType::LegalOpinion => "Legal Opinion",
            NoticeType::DemandNotice => "Demand Notice",
        }
    }

    /// Short code used in reference numbers.
    pub fn code(self) -> &'static str {
        match self {
            NoticeType::ShowCause => "SCN",
            NoticeType::ReasonedOrder => "RO",
            NoticeType::RecoveryNotice => "RN",
            NoticeType::LegalOpinion => "LO",
            NoticeType::DemandNotice => "DN",
        }
    }

    /// Days allowed for a response, when the notice demands one.
    pub fn response_days(self) -> Option<i64> {
        match self {
            NoticeType::ShowCause | NoticeType::DemandNotice => Some(SCN_RESPONSE_DAYS),
            NoticeType::RecoveryNotice => Some(RECOVERY_PAYMENT_DAYS),
            NoticeType::ReasonedOrder | NoticeType::LegalOpinion => None,
        }
    }

    pub fn response_deadline(self, issued_on: NaiveDate) -> Option<NaiveDate> {
        self.response_days()
            .map(|days| issued_on + Duration::days(days))
    }
}

/// Reference number for a notice, e.g. `SCN/CASE20250728CE806A/20250801`.
pub fn reference_number(notice_type: NoticeType, case_id: &str, on: NaiveDate) -> String {
    format!("{}/{case_id}/{}", notice_type.code(), on.format("%Y%m%d"))
}

/// Case fields used to fill a notice.
#[derive(Debug, Clone, Default)]
pub struct NoticeContext {
    pub case_id: String,
    pub customer_name: Option<String>,
    pub pan: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub lan: Option<String>,
    pub loan_amount: Option<f64>,
    pub disbursement_date: Option<String>,
    pub case_type: Option<String>,
    pub product: Option<String>,
    pub branch: Option<String>,
    pub description: Option<String>,
    pub grounds: Option<String>,
    pub violations: Vec<String>,
}

pub(crate) fn or_na(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
}

/// Format an amount as `INR 1,234,567.89`.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("INR {sign}{grouped}.{frac}")
}

fn violations_block(ctx: &NoticeContext) -> String {
    if ctx.violations.is_empty() {
        return "1. [To be specified based on investigation findings]\n\
                2. [Additional violations as applicable]"
            .to_string();
    }
    ctx.violations
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{}. {v}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the template text for a notice dated `on`.
pub fn render_notice(notice_type: NoticeType, ctx: &NoticeContext, on: NaiveDate) -> String {
    let date = on.format("%B %d, %Y").to_string();
    let case_id = &ctx.case_id;
    let name = or_na(&ctx.customer_name);
    let pan = or_na(&ctx.pan);
    let lan = or_na(&ctx.lan);
    let amount = format_inr(ctx.loan_amount.unwrap_or(0.0));
    let case_type = or_na(&ctx.case_type);
    let product = or_na(&ctx.product);
    let branch = or_na(&ctx.branch);
    let description = or_na(&ctx.description);
    let grounds = ctx
        .grounds
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or("[Investigation details and findings to be inserted]");

    match notice_type {
        NoticeType::ShowCause => format!(
            "**SHOW CAUSE NOTICE**\n\n\
             Case Reference: {case_id}\nDate: {date}\n\n\
             To: {name}\nPAN: {pan}\nMobile: {mobile}\nEmail: {email}\n\n\
             **SUBJECT: Show Cause Notice - Loan Account No. {lan}**\n\n\
             Dear {name},\n\n\
             This notice is issued to you in connection with your loan account bearing number \
             {lan} for {amount} disbursed on {disbursed}.\n\n\
             **CASE DETAILS:**\n- Case Type: {case_type}\n- Product: {product}\n\
             - Branch: {branch}\n- Case Description: {description}\n\n\
             **GROUNDS FOR NOTICE:**\n\
             Based on our investigation and review of your loan account, certain discrepancies \
             and violations have been identified that require your immediate attention and \
             response.\n\n\
             **SPECIFIC VIOLATIONS/ISSUES IDENTIFIED:**\n{violations}\n\n\
             **INVESTIGATION FINDINGS:**\n{grounds}\n\n\
             You are hereby called upon to show cause within {days} days from the receipt of \
             this notice as to why appropriate legal action should not be taken against you for \
             the above-mentioned violations.\n\n\
             **REQUIRED RESPONSE:**\n\
             You are required to submit a written response addressing each of the issues raised \
             in this notice, along with supporting documents and evidence.\n\n\
             Failure to respond within the stipulated time will result in appropriate legal and \
             recovery action being initiated against you without further notice.\n\n\
             **Authorized Signatory**\n{ISSUER}\nDate: {date}",
            mobile = or_na(&ctx.mobile),
            email = or_na(&ctx.email),
            disbursed = or_na(&ctx.disbursement_date),
            violations = violations_block(ctx),
            days = SCN_RESPONSE_DAYS,
        ),
        NoticeType::ReasonedOrder => format!(
            "**REASONED ORDER**\n\n\
             Case Reference: {case_id}\nOrder Date: {date}\n\n\
             In the matter of: {name} (PAN: {pan})\nLoan Account No.: {lan}\n\n\
             **BACKGROUND:**\n\
             This order is passed in connection with the loan account of {name} for {amount} \
             under {product} product.\n\n\
             **CASE DETAILS:**\n- Case Type: {case_type}\n- Branch: {branch}\n\
             - Case Description: {description}\n\n\
             **FINDINGS:**\n{grounds}\n\n\
             **ORDER:**\n\
             Based on the findings and applicable legal provisions, it is hereby ordered that:\n\
             {violations}\n\n\
             **Authorized Officer**\n{ISSUER}\nDate: {date}",
            violations = violations_block(ctx),
        ),
        NoticeType::RecoveryNotice => format!(
            "**RECOVERY NOTICE**\n\n\
             Case Reference: {case_id}\nNotice Date: {date}\n\n\
             To: {name}\nPAN: {pan}\n\n\
             **SUBJECT: Final Notice for Recovery - Loan Account No. {lan}**\n\n\
             Dear {name},\n\n\
             This final notice is served upon you for the recovery of outstanding dues under your \
             loan account {lan} for {amount}.\n\n\
             **OUTSTANDING DETAILS:**\n- Principal Amount: {amount}\n\n\
             **CASE BACKGROUND:**\n{description}\n\n\
             **FINAL DEMAND:**\n\
             You are hereby required to pay the entire outstanding amount within {days} days \
             from the receipt of this notice.\n\n\
             **CONSEQUENCES OF NON-PAYMENT:**\n\
             1. Legal action for recovery\n2. Reporting to credit bureaus\n\
             3. Enforcement of security/guarantees\n4. Criminal proceedings if applicable\n\n\
             **Authorized Officer**\nRecovery Department\nDate: {date}",
            days = RECOVERY_PAYMENT_DAYS,
        ),
        NoticeType::DemandNotice => format!(
            "**DEMAND NOTICE**\n\n\
             Case Reference: {case_id}\nNotice Date: {date}\n\n\
             To: {name}\nPAN: {pan}\n\n\
             **SUBJECT: Demand for Repayment - Loan Account No. {lan}**\n\n\
             Dear {name},\n\n\
             You are hereby called upon to repay the sum of {amount} due under loan account \
             {lan} within {days} days from the receipt of this notice.\n\n\
             **GROUNDS:**\n{grounds}\n\n\
             **Authorized Signatory**\n{ISSUER}\nDate: {date}",
            days = SCN_RESPONSE_DAYS,
        ),
        NoticeType::LegalOpinion => format!(
            "**LEGAL OPINION**\n\n\
             Case Reference: {case_id}\nOpinion Date: {date}\n\n\
             **MATTER:** {name} - Loan Account {lan}\n\n\
             **CASE SUMMARY:**\n\
             This legal opinion is provided in the matter of {name} regarding loan account {lan} \
             for {amount}.\n\n\
             **CASE DETAILS:**\n- Case Type: {case_type}\n- Product: {product}\n\
             - Branch: {branch}\n- Description: {description}\n\n\
             **LEGAL ANALYSIS:**\n{grounds}\n\n\
             **Prepared by:**\n{ISSUER}\nDate: {date}",
        ),
    }
}
