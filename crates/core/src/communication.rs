//! Closure-stage communication templates addressed to internal teams, the
//! branch, management or the customer.
//!
//! Templates are editable starting points: case fields are filled in where
//! the record has them and the rest stays as bracketed placeholders.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::legal::{format_inr, or_na, NoticeContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunicationType {
    #[serde(rename = "Investigation Team Instruction")]
    InvestigationInstruction,
    #[serde(rename = "Legal Team Communication")]
    LegalTeam,
    #[serde(rename = "Recovery Team Notice")]
    RecoveryTeam,
    #[serde(rename = "Customer Communication")]
    Customer,
    #[serde(rename = "Branch Notification")]
    Branch,
    #[serde(rename = "Management Escalation")]
    ManagementEscalation,
}

impl CommunicationType {
    pub const ALL: [CommunicationType; 6] = [
        CommunicationType::InvestigationInstruction,
        CommunicationType::LegalTeam,
        CommunicationType::RecoveryTeam,
        CommunicationType::Customer,
        CommunicationType::Branch,
        CommunicationType::ManagementEscalation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommunicationType::InvestigationInstruction => "Investigation Team Instruction",
            CommunicationType::LegalTeam => "Legal Team Communication",
            CommunicationType::RecoveryTeam => "Recovery Team Notice",
            CommunicationType::Customer => "Customer Communication",
            CommunicationType::Branch => "Branch Notification",
            CommunicationType::ManagementEscalation => "Management Escalation",
        }
    }

    /// Comment type for a saved draft or a sent communication.
    pub fn comment_type(self, sent: bool) -> String {
        if sent {
            format!("Communication - {}", self.label())
        } else {
            format!("Communication Draft - {}", self.label())
        }
    }
}

/// Render the template for a communication dated `on`.
pub fn render_communication(kind: CommunicationType, ctx: &NoticeContext, on: NaiveDate) -> String {
    let date = on.format("%B %d, %Y").to_string();
    let case_id = &ctx.case_id;
    let amount = ctx
        .loan_amount
        .map(format_inr)
        .unwrap_or_else(|| "[Amount]".to_string());
    let summary = ctx
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("[Brief case summary and key issues]");
    let header = format!("Case Reference: {case_id}\nDate: {date}");

    match kind {
        CommunicationType::InvestigationInstruction => format!(
            "**INVESTIGATION INSTRUCTION**\n\n{header}\n\n\
             To: Investigation Team\n\n\
             **SUBJECT: Investigation Instructions for Case {case_id}**\n\n\
             Dear Investigation Team,\n\n\
             Please proceed with the investigation of the above-referenced case with the \
             following instructions:\n\n\
             **Case Summary:**\n{summary}\n\n\
             **Investigation Scope:**\n\
             - [Specify investigation scope and objectives]\n\
             - [Key areas to focus on]\n\
             - [Required documentation and evidence]\n\n\
             **Timeline:**\n\
             - Investigation to be completed within [X] days\n\
             - Interim report due on [Date]\n\
             - Final report submission deadline: [Date]\n\n\
             **Authorized by:**\nLegal Department\nDate: {date}"
        ),
        CommunicationType::LegalTeam => format!(
            "**LEGAL TEAM COMMUNICATION**\n\n{header}\n\n\
             To: Legal Department\n\n\
             **SUBJECT: Legal Review Required for Case {case_id}**\n\n\
             Dear Legal Team,\n\n\
             The above case requires your legal review and guidance.\n\n\
             **Case Summary:**\n{summary}\n\n\
             **Legal Questions:**\n\
             1. [Specific legal question 1]\n\
             2. [Specific legal question 2]\n\n\
             **Required Actions:**\n\
             - Legal opinion on case merits\n\
             - Recommended legal course of action\n\
             - Risk assessment and compliance review\n\n\
             Please provide your legal opinion within [X] business days.\n\n\
             Best regards,\nCase Management Team"
        ),
        CommunicationType::RecoveryTeam => format!(
            "**RECOVERY TEAM NOTICE**\n\n{header}\n\n\
             To: Recovery Department\n\n\
             **SUBJECT: Recovery Action Required - Case {case_id}**\n\n\
             Dear Recovery Team,\n\n\
             Please initiate recovery proceedings for the above-referenced case.\n\n\
             **Recovery Details:**\n\
             - Customer: {name}\n\
             - Loan Account: {lan}\n\
             - Outstanding Amount: {amount}\n\
             - Customer Contact Status: [Status]\n\n\
             **Recommended Actions:**\n\
             1. [Primary recovery action]\n\
             2. [Escalation procedures if required]\n\n\
             Please commence recovery actions within [X] days and provide status updates \
             weekly.\n\n\
             Recovery Department Head\nDate: {date}",
            name = or_na(&ctx.customer_name),
            lan = or_na(&ctx.lan),
        ),
        CommunicationType::Customer => format!(
            "**CUSTOMER COMMUNICATION**\n\n{header}\n\n\
             **SUBJECT: Important Update Regarding Your Account**\n\n\
             Dear {name},\n\n\
             We are writing to inform you about the current status of your account and the \
             steps being taken in relation to case {case_id}.\n\n\
             **Current Status:**\n[Brief description of case status and customer's position]\n\n\
             **Required Action from Your End:**\n\
             1. [Specific action required]\n\
             2. [Documentation needed]\n\n\
             For any queries please contact us at [Phone Number] or [Email Address].\n\n\
             Best regards,\nCustomer Service Team",
            name = ctx
                .customer_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or("Valued Customer"),
        ),
        CommunicationType::Branch => format!(
            "**BRANCH NOTIFICATION**\n\n{header}\n\n\
             To: Branch Manager, {branch}\n\n\
             **SUBJECT: Case Update and Required Actions - {case_id}**\n\n\
             Dear Branch Manager,\n\n\
             Please note the following updates and required actions for the above-referenced \
             case.\n\n\
             **Case Status Update:**\n[Current status and recent developments]\n\n\
             **Branch Actions Required:**\n\
             1. [Specific action item 1]\n\
             2. [Documentation or follow-up needed]\n\n\
             Please provide status updates by [Date] and notify immediately of any significant \
             developments.\n\n\
             Case Management Department",
            branch = or_na(&ctx.branch),
        ),
        CommunicationType::ManagementEscalation => format!(
            "**MANAGEMENT ESCALATION**\n\n{header}\n\n\
             To: Senior Management\n\n\
             **SUBJECT: Case Escalation - Immediate Attention Required**\n\n\
             Dear Management,\n\n\
             The above case requires immediate management attention and decision.\n\n\
             **Escalation Reasons:**\n\
             1. [Primary reason for escalation]\n\
             2. [Risk implications]\n\n\
             **Case Summary:**\n{summary}\n\n\
             **Financial Impact:**\n\
             - Exposure Amount: {amount}\n\
             - Potential Loss: [Amount]\n\
             - Recovery Prospects: [Assessment]\n\n\
             **Prepared by:**\nCase Management Team\nDate: {date}"
        ),
    }
}

/// Record stored as a case comment when a communication is saved or sent.
pub fn communication_record(
    kind: CommunicationType,
    content: &str,
    author: &str,
    sent: bool,
) -> String {
    let (heading, status) = if sent {
        ("COMMUNICATION SENT", "SENT")
    } else {
        ("COMMUNICATION DRAFT", "DRAFT")
    };
    let verb = if sent { "Sent" } else { "Saved" };
    format!(
        "{heading} - Type: {}\n\nContent:\n{}\n\n{verb} by: {author}\nStatus: {status}",
        kind.label(),
        content.trim()
    )
}

/// Plain-text export with a reference header.
pub fn export_text(
    kind: CommunicationType,
    case_id: &str,
    content: &str,
    at: NaiveDateTime,
) -> String {
    format!(
        "Communication Template: {}\nCase Reference: {case_id}\nGenerated on: {}\n{}\n\n{}",
        kind.label(),
        at.format("%B %d, %Y at %I:%M %p"),
        "=".repeat(50),
        content
    )
}

/// e.g. `Communication_Branch_Notification_CASE1_20250801_093000.txt`.
pub fn export_filename(kind: CommunicationType, case_id: &str, at: NaiveDateTime) -> String {
    format!(
        "Communication_{}_{case_id}_{}.txt",
        kind.label().replace(' ', "_"),
        at.format("%Y%m%d_%H%M%S")
    )
}
