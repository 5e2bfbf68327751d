//! Case status model: known statuses, pipeline positions, stage queues and
//! the table of workflow actions.
//!
//! Status strings are the values stored in `cases.status`. The pipeline is a
//! display aid: [`progress`] accepts any string and never fails, and no
//! legality check is made between a case's current status and the status an
//! action writes. Any authorised action may be applied to any case.

use serde::{Deserialize, Serialize};

use crate::roles::{
    ROLE_ACTIONER, ROLE_ALLOCATOR, ROLE_APPROVER, ROLE_INITIATOR, ROLE_INVESTIGATOR,
    ROLE_LEGAL_REVIEWER, ROLE_REGIONAL_INVESTIGATOR, ROLE_REVIEWER,
};

// ---------------------------------------------------------------------------
// Case status
// ---------------------------------------------------------------------------

/// A known case status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "Draft")]
    Draft,
    #[serde(rename = "Submitted")]
    Submitted,
    #[serde(rename = "Registered")]
    Registered,
    #[serde(rename = "Allocated")]
    Allocated,
    #[serde(rename = "Under Investigation")]
    UnderInvestigation,
    #[serde(rename = "Regional Investigation")]
    RegionalInvestigation,
    #[serde(rename = "Agency Investigation")]
    AgencyInvestigation,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Second Approval", alias = "Approver 2")]
    SecondApproval,
    #[serde(rename = "Final Review")]
    FinalReview,
    #[serde(rename = "Legal Review")]
    LegalReview,
    #[serde(rename = "Legal Review Complete")]
    LegalReviewComplete,
    #[serde(rename = "Closed")]
    Closed,
    #[serde(rename = "Rejected")]
    Rejected,
}

impl CaseStatus {
    /// Every known status, in pipeline order with `Rejected` last.
    pub const ALL: [CaseStatus; 15] = [
        CaseStatus::Draft,
        CaseStatus::Submitted,
        CaseStatus::Registered,
        CaseStatus::Allocated,
        CaseStatus::UnderInvestigation,
        CaseStatus::RegionalInvestigation,
        CaseStatus::AgencyInvestigation,
        CaseStatus::UnderReview,
        CaseStatus::Approved,
        CaseStatus::SecondApproval,
        CaseStatus::FinalReview,
        CaseStatus::LegalReview,
        CaseStatus::LegalReviewComplete,
        CaseStatus::Closed,
        CaseStatus::Rejected,
    ];

    /// The string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Draft => "Draft",
            CaseStatus::Submitted => "Submitted",
            CaseStatus::Registered => "Registered",
            CaseStatus::Allocated => "Allocated",
            CaseStatus::UnderInvestigation => "Under Investigation",
            CaseStatus::RegionalInvestigation => "Regional Investigation",
            CaseStatus::AgencyInvestigation => "Agency Investigation",
            CaseStatus::UnderReview => "Under Review",
            CaseStatus::Approved => "Approved",
            CaseStatus::SecondApproval => "Second Approval",
            CaseStatus::FinalReview => "Final Review",
            CaseStatus::LegalReview => "Legal Review",
            CaseStatus::LegalReviewComplete => "Legal Review Complete",
            CaseStatus::Closed => "Closed",
            CaseStatus::Rejected => "Rejected",
        }
    }

    /// Parse a stored status string. Surrounding whitespace is ignored.
    ///
    /// `"Approver 2"` and `"Primary Review"` are accepted as older spellings
    /// of `Second Approval` and `Under Review`.
    pub fn parse(value: &str) -> Option<CaseStatus> {
        let value = value.trim();
        match value {
            "Approver 2" => return Some(CaseStatus::SecondApproval),
            "Primary Review" => return Some(CaseStatus::UnderReview),
            _ => {}
        }
        CaseStatus::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Whether no forward action leads out of this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, CaseStatus::Closed | CaseStatus::Rejected)
    }

    /// Pipeline position, `-1` for `Rejected`.
    pub fn position(self) -> i32 {
        match self {
            CaseStatus::Draft | CaseStatus::Submitted | CaseStatus::Registered => 0,
            CaseStatus::Allocated => 1,
            CaseStatus::UnderInvestigation
            | CaseStatus::RegionalInvestigation
            | CaseStatus::AgencyInvestigation => 2,
            CaseStatus::UnderReview => 3,
            CaseStatus::Approved => 4,
            CaseStatus::SecondApproval => 5,
            CaseStatus::FinalReview => 6,
            CaseStatus::LegalReview | CaseStatus::LegalReviewComplete => 7,
            CaseStatus::Closed => 8,
            CaseStatus::Rejected => -1,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a status string is one of the known values.
pub fn is_known_status(value: &str) -> bool {
    CaseStatus::parse(value).is_some()
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// One step of the displayed case pipeline.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipelineStep {
    pub name: &'static str,
    pub status: CaseStatus,
    pub description: &'static str,
}

/// The nine pipeline steps, one per role in the chain.
pub const PIPELINE: [PipelineStep; 9] = [
    PipelineStep {
        name: "Case Entry",
        status: CaseStatus::Draft,
        description: "Case created and documented",
    },
    PipelineStep {
        name: "Allocator",
        status: CaseStatus::Allocated,
        description: "Case allocated for investigation",
    },
    PipelineStep {
        name: "Investigator",
        status: CaseStatus::UnderInvestigation,
        description: "Detailed investigation and verification",
    },
    PipelineStep {
        name: "Primary Reviewer",
        status: CaseStatus::UnderReview,
        description: "Primary review of investigation",
    },
    PipelineStep {
        name: "Approver 1",
        status: CaseStatus::Approved,
        description: "First level approval",
    },
    PipelineStep {
        name: "Approver 2",
        status: CaseStatus::SecondApproval,
        description: "Second level approval",
    },
    PipelineStep {
        name: "Final Reviewer",
        status: CaseStatus::FinalReview,
        description: "Final review before legal",
    },
    PipelineStep {
        name: "Legal (SCN)",
        status: CaseStatus::LegalReview,
        description: "Legal review and SCN processing",
    },
    PipelineStep {
        name: "Actioner",
        status: CaseStatus::Closed,
        description: "Final action and case closure",
    },
];

/// Display state of a pipeline step relative to the case's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Pending,
}

/// A pipeline step annotated with its display state.
#[derive(Debug, Clone, Serialize)]
pub struct StepProgress {
    pub name: &'static str,
    pub status: CaseStatus,
    pub state: StepState,
}

/// Progress-bar data for a case status.
#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    /// The status string as given.
    pub status: String,
    /// Whether the status is one of the known values.
    pub known: bool,
    pub rejected: bool,
    /// Pipeline position: 0 for unknown, -1 for rejected.
    pub position: i32,
    pub completed_steps: u32,
    pub remaining_steps: u32,
    pub percent: f64,
    pub steps: Vec<StepProgress>,
    /// Status a forward action would write, if any.
    pub next_status: Option<CaseStatus>,
}

/// Compute pipeline progress for any status string.
///
/// Unknown strings map to position 0 with `known = false`. `Rejected` maps to
/// position -1 and 0 %.
pub fn progress(status: &str) -> Progress {
    let parsed = CaseStatus::parse(status);
    let total = PIPELINE.len() as u32;

    let position = parsed.map_or(0, CaseStatus::position);
    let rejected = parsed == Some(CaseStatus::Rejected);
    let completed_steps = position.max(0) as u32;

    let percent = if rejected {
        0.0
    } else if completed_steps >= total {
        100.0
    } else {
        f64::from(completed_steps) / f64::from(total - 1) * 100.0
    };

    let steps = PIPELINE
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let i = i as i32;
            let state = if rejected {
                StepState::Pending
            } else if i < position {
                StepState::Completed
            } else if i == position {
                StepState::Current
            } else {
                StepState::Pending
            };
            StepProgress {
                name: step.name,
                status: step.status,
                state,
            }
        })
        .collect();

    Progress {
        status: status.to_string(),
        known: parsed.is_some(),
        rejected,
        position,
        completed_steps,
        remaining_steps: total.saturating_sub(completed_steps + 1),
        percent,
        steps,
        next_status: next_status(status),
    }
}

/// The status a "forward" action leads to from `status`.
///
/// Returns `None` for terminal and unknown statuses.
pub fn next_status(status: &str) -> Option<CaseStatus> {
    let next = match CaseStatus::parse(status)? {
        CaseStatus::Draft => CaseStatus::Submitted,
        CaseStatus::Submitted | CaseStatus::Registered => CaseStatus::Allocated,
        CaseStatus::Allocated => CaseStatus::UnderInvestigation,
        CaseStatus::UnderInvestigation
        | CaseStatus::RegionalInvestigation
        | CaseStatus::AgencyInvestigation => CaseStatus::UnderReview,
        CaseStatus::UnderReview => CaseStatus::Approved,
        CaseStatus::Approved => CaseStatus::SecondApproval,
        CaseStatus::SecondApproval => CaseStatus::FinalReview,
        CaseStatus::FinalReview => CaseStatus::LegalReview,
        CaseStatus::LegalReview => CaseStatus::LegalReviewComplete,
        CaseStatus::LegalReviewComplete => CaseStatus::Closed,
        CaseStatus::Closed | CaseStatus::Rejected => return None,
    };
    Some(next)
}

/// Compact list-view progress percentage for a status string.
pub fn badge_percent(status: &str) -> u8 {
    match status.trim() {
        "Draft" => 10,
        "Submitted" => 25,
        "Under Review" => 35,
        "Under Investigation" => 50,
        "Final Review" => 70,
        "Approved" => 85,
        "Legal Review" => 90,
        "Closed" => 100,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Stage queues
// ---------------------------------------------------------------------------

/// A role's work queue, defined by the statuses it polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    Allocation,
    Investigation,
    PrimaryReview,
    FirstApproval,
    SecondApproval,
    FinalReview,
    Legal,
    Closure,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Intake,
        Stage::Allocation,
        Stage::Investigation,
        Stage::PrimaryReview,
        Stage::FirstApproval,
        Stage::SecondApproval,
        Stage::FinalReview,
        Stage::Legal,
        Stage::Closure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Intake => "intake",
            Stage::Allocation => "allocation",
            Stage::Investigation => "investigation",
            Stage::PrimaryReview => "primary_review",
            Stage::FirstApproval => "first_approval",
            Stage::SecondApproval => "second_approval",
            Stage::FinalReview => "final_review",
            Stage::Legal => "legal",
            Stage::Closure => "closure",
        }
    }

    pub fn parse(value: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Statuses whose cases appear in this stage's queue.
    pub fn queue_statuses(self) -> &'static [CaseStatus] {
        match self {
            Stage::Intake => &[CaseStatus::Draft],
            Stage::Allocation => &[CaseStatus::Registered, CaseStatus::Submitted],
            Stage::Investigation => &[
                CaseStatus::Allocated,
                CaseStatus::UnderInvestigation,
                CaseStatus::RegionalInvestigation,
                CaseStatus::AgencyInvestigation,
            ],
            Stage::PrimaryReview => &[CaseStatus::UnderReview],
            Stage::FirstApproval => &[CaseStatus::Approved],
            Stage::SecondApproval => &[CaseStatus::SecondApproval],
            Stage::FinalReview => &[CaseStatus::FinalReview],
            Stage::Legal => &[CaseStatus::LegalReview],
            Stage::Closure => &[CaseStatus::LegalReviewComplete],
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow actions
// ---------------------------------------------------------------------------

/// A named action a role can take on a case. Each action writes exactly one
/// known status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Submit,
    Allocate,
    StartInvestigation,
    CompleteInvestigation,
    EscalateRegional,
    EscalateAgency,
    CloseInvestigation,
    ReviewApprove,
    ReviewSendBack,
    FirstApprove,
    FirstSendBack,
    SecondApprove,
    SecondSendBack,
    Reject,
    RouteToLegal,
    RouteToClosure,
    Reinvestigate,
    LegalComplete,
    LegalSendBack,
    Close,
}

impl WorkflowAction {
    /// The status this action writes.
    pub fn target(self) -> CaseStatus {
        match self {
            WorkflowAction::Submit => CaseStatus::Submitted,
            WorkflowAction::Allocate => CaseStatus::Allocated,
            WorkflowAction::StartInvestigation => CaseStatus::UnderInvestigation,
            WorkflowAction::CompleteInvestigation => CaseStatus::UnderReview,
            WorkflowAction::EscalateRegional => CaseStatus::RegionalInvestigation,
            WorkflowAction::EscalateAgency => CaseStatus::AgencyInvestigation,
            WorkflowAction::CloseInvestigation => CaseStatus::Closed,
            WorkflowAction::ReviewApprove => CaseStatus::Approved,
            WorkflowAction::ReviewSendBack => CaseStatus::UnderInvestigation,
            WorkflowAction::FirstApprove => CaseStatus::SecondApproval,
            WorkflowAction::FirstSendBack => CaseStatus::UnderReview,
            WorkflowAction::SecondApprove => CaseStatus::FinalReview,
            WorkflowAction::SecondSendBack => CaseStatus::Approved,
            WorkflowAction::Reject => CaseStatus::Rejected,
            WorkflowAction::RouteToLegal => CaseStatus::LegalReview,
            WorkflowAction::RouteToClosure => CaseStatus::LegalReviewComplete,
            WorkflowAction::Reinvestigate => CaseStatus::UnderInvestigation,
            WorkflowAction::LegalComplete => CaseStatus::LegalReviewComplete,
            WorkflowAction::LegalSendBack => CaseStatus::UnderReview,
            WorkflowAction::Close => CaseStatus::Closed,
        }
    }

    /// Roles (besides admin) allowed to take this action.
    pub fn allowed_roles(self) -> &'static [&'static str] {
        match self {
            WorkflowAction::Submit => &[ROLE_INITIATOR],
            WorkflowAction::Allocate => &[ROLE_ALLOCATOR, ROLE_REVIEWER],
            WorkflowAction::StartInvestigation
            | WorkflowAction::CompleteInvestigation
            | WorkflowAction::CloseInvestigation
            | WorkflowAction::EscalateRegional
            | WorkflowAction::EscalateAgency => &[ROLE_INVESTIGATOR, ROLE_REGIONAL_INVESTIGATOR],
            WorkflowAction::ReviewApprove | WorkflowAction::ReviewSendBack => &[ROLE_REVIEWER],
            WorkflowAction::FirstApprove
            | WorkflowAction::FirstSendBack
            | WorkflowAction::SecondApprove
            | WorkflowAction::SecondSendBack
            | WorkflowAction::Reject => &[ROLE_APPROVER],
            WorkflowAction::RouteToLegal
            | WorkflowAction::RouteToClosure
            | WorkflowAction::Reinvestigate => &[ROLE_REVIEWER, ROLE_APPROVER],
            WorkflowAction::LegalComplete | WorkflowAction::LegalSendBack => {
                &[ROLE_LEGAL_REVIEWER]
            }
            WorkflowAction::Close => &[ROLE_ACTIONER],
        }
    }

    /// Comment type recorded alongside the status change.
    pub fn comment_type(self) -> &'static str {
        match self {
            WorkflowAction::Submit => "Submission",
            WorkflowAction::Allocate => "Allocation",
            WorkflowAction::StartInvestigation
            | WorkflowAction::CompleteInvestigation
            | WorkflowAction::EscalateRegional
            | WorkflowAction::EscalateAgency
            | WorkflowAction::CloseInvestigation => "Investigation",
            WorkflowAction::ReviewApprove | WorkflowAction::ReviewSendBack => "Primary Review",
            WorkflowAction::FirstApprove | WorkflowAction::FirstSendBack => "Approver 1",
            WorkflowAction::SecondApprove | WorkflowAction::SecondSendBack => "Approver 2",
            WorkflowAction::Reject => "Rejection",
            WorkflowAction::RouteToLegal
            | WorkflowAction::RouteToClosure
            | WorkflowAction::Reinvestigate => "Final Review",
            WorkflowAction::LegalComplete | WorkflowAction::LegalSendBack => "Legal Review",
            WorkflowAction::Close => "Actioner Action",
        }
    }

    /// Prefix written at the start of the comment text.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            WorkflowAction::Submit => "SUBMITTED",
            WorkflowAction::Allocate => "ALLOCATED",
            WorkflowAction::StartInvestigation => "INVESTIGATION STARTED",
            WorkflowAction::CompleteInvestigation => "INVESTIGATION COMPLETED",
            WorkflowAction::EscalateRegional => "ESCALATED TO REGIONAL INVESTIGATION",
            WorkflowAction::EscalateAgency => "ESCALATED TO AGENCY INVESTIGATION",
            WorkflowAction::CloseInvestigation => "CLOSED AFTER INVESTIGATION",
            WorkflowAction::ReviewApprove => "PRIMARY REVIEW APPROVED",
            WorkflowAction::ReviewSendBack => "SENT BACK TO INVESTIGATION",
            WorkflowAction::FirstApprove => "APPROVER 1 APPROVED",
            WorkflowAction::FirstSendBack => "SENT BACK",
            WorkflowAction::SecondApprove => "APPROVER 2 APPROVED",
            WorkflowAction::SecondSendBack => "SENT BACK TO APPROVER 1",
            WorkflowAction::Reject => "REJECTED",
            WorkflowAction::RouteToLegal => "ROUTED TO LEGAL REVIEW",
            WorkflowAction::RouteToClosure => "ROUTED TO CLOSURE",
            WorkflowAction::Reinvestigate => "RETURNED FOR INVESTIGATION",
            WorkflowAction::LegalComplete => "LEGAL REVIEW COMPLETE",
            WorkflowAction::LegalSendBack => "SENT BACK FROM LEGAL",
            WorkflowAction::Close => "CASE CLOSED",
        }
    }

    /// Actions that carry a payload of their own and have a dedicated endpoint.
    pub fn requires_payload(self) -> bool {
        matches!(self, WorkflowAction::Allocate | WorkflowAction::Close)
    }
}

/// Build the comment text recorded for an action.
pub fn action_comment(action: WorkflowAction, comment: Option<&str>) -> String {
    match comment.map(str::trim).filter(|c| !c.is_empty()) {
        Some(text) => format!("{}: {text}", action.comment_prefix()),
        None => action.comment_prefix().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Closure
// ---------------------------------------------------------------------------

/// How the actioner disposed of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureType {
    Recovery,
    Settlement,
    WriteOff,
    TransferToLegal,
    NoAction,
}

impl ClosureType {
    pub fn label(self) -> &'static str {
        match self {
            ClosureType::Recovery => "Recovery",
            ClosureType::Settlement => "Settlement",
            ClosureType::WriteOff => "Write-off",
            ClosureType::TransferToLegal => "Transfer to Legal",
            ClosureType::NoAction => "No Action",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_round_trips_through_parse() {
        for status in CaseStatus::ALL {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn legacy_spellings_are_accepted() {
        assert_eq!(CaseStatus::parse("Approver 2"), Some(CaseStatus::SecondApproval));
        assert_eq!(CaseStatus::parse("Primary Review"), Some(CaseStatus::UnderReview));
        assert_eq!(CaseStatus::parse("  Closed "), Some(CaseStatus::Closed));
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert_eq!(CaseStatus::parse("Stakeholder Action"), None);
        assert_eq!(CaseStatus::parse(""), None);
        assert!(!is_known_status("closed"));
    }

    #[test]
    fn serde_uses_stored_strings() {
        let json = serde_json::to_string(&CaseStatus::UnderInvestigation).unwrap();
        assert_eq!(json, "\"Under Investigation\"");
        let parsed: CaseStatus = serde_json::from_str("\"Approver 2\"").unwrap();
        assert_eq!(parsed, CaseStatus::SecondApproval);
    }

    #[test]
    fn draft_is_at_the_start() {
        let p = progress("Draft");
        assert!(p.known);
        assert_eq!(p.position, 0);
        assert_eq!(p.completed_steps, 0);
        assert_eq!(p.remaining_steps, 8);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.steps[0].state, StepState::Current);
        assert_eq!(p.steps[1].state, StepState::Pending);
        assert_eq!(p.next_status, Some(CaseStatus::Submitted));
    }

    #[test]
    fn mid_pipeline_progress() {
        let p = progress("Under Review");
        assert_eq!(p.position, 3);
        assert_eq!(p.completed_steps, 3);
        assert_eq!(p.remaining_steps, 5);
        assert!((p.percent - 37.5).abs() < f64::EPSILON);
        assert_eq!(p.steps[2].state, StepState::Completed);
        assert_eq!(p.steps[3].state, StepState::Current);
        assert_eq!(p.steps[4].state, StepState::Pending);
    }

    #[test]
    fn closed_is_complete() {
        let p = progress("Closed");
        assert_eq!(p.position, 8);
        assert_eq!(p.percent, 100.0);
        assert_eq!(p.remaining_steps, 0);
        assert_eq!(p.next_status, None);
    }

    #[test]
    fn rejected_has_negative_position_and_zero_percent() {
        let p = progress("Rejected");
        assert!(p.rejected);
        assert_eq!(p.position, -1);
        assert_eq!(p.completed_steps, 0);
        assert_eq!(p.percent, 0.0);
        assert!(p.steps.iter().all(|s| s.state == StepState::Pending));
        assert_eq!(p.next_status, None);
    }

    #[test]
    fn unknown_status_defaults_to_position_zero() {
        let p = progress("Stakeholder Action");
        assert!(!p.known);
        assert_eq!(p.position, 0);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.status, "Stakeholder Action");
        assert_eq!(p.next_status, None);
    }

    #[test]
    fn next_status_follows_the_pipeline() {
        let mut status = CaseStatus::Draft;
        let mut seen = vec![status];
        while let Some(next) = next_status(status.as_str()) {
            status = next;
            seen.push(status);
        }
        assert_eq!(status, CaseStatus::Closed);
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn badge_percent_matches_list_view_table() {
        assert_eq!(badge_percent("Draft"), 10);
        assert_eq!(badge_percent("Legal Review"), 90);
        assert_eq!(badge_percent("Closed"), 100);
        assert_eq!(badge_percent("Rejected"), 0);
        assert_eq!(badge_percent("anything else"), 0);
    }

    #[test]
    fn stage_slugs_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::parse(stage.as_str()), Some(stage));
            assert!(!stage.queue_statuses().is_empty());
        }
        assert_eq!(Stage::parse("nope"), None);
    }

    #[test]
    fn approval_chain_targets() {
        assert_eq!(WorkflowAction::FirstApprove.target(), CaseStatus::SecondApproval);
        assert_eq!(WorkflowAction::SecondApprove.target(), CaseStatus::FinalReview);
        assert_eq!(WorkflowAction::SecondSendBack.target(), CaseStatus::Approved);
        assert_eq!(WorkflowAction::Reject.target(), CaseStatus::Rejected);
    }

    #[test]
    fn every_action_targets_a_known_status() {
        let actions: Vec<WorkflowAction> = serde_json::from_str(
            r#"["submit","allocate","start_investigation","complete_investigation",
                "escalate_regional","escalate_agency","close_investigation",
                "review_approve","review_send_back","first_approve","first_send_back",
                "second_approve","second_send_back","reject","route_to_legal",
                "route_to_closure","reinvestigate","legal_complete","legal_send_back","close"]"#,
        )
        .unwrap();
        for action in actions {
            assert!(is_known_status(action.target().as_str()));
            assert!(!action.allowed_roles().is_empty());
        }
    }

    #[test]
    fn investigation_actions_share_one_role_set() {
        let expected = [ROLE_INVESTIGATOR, ROLE_REGIONAL_INVESTIGATOR];
        for action in [
            WorkflowAction::StartInvestigation,
            WorkflowAction::CompleteInvestigation,
            WorkflowAction::CloseInvestigation,
            WorkflowAction::EscalateRegional,
            WorkflowAction::EscalateAgency,
        ] {
            assert_eq!(action.allowed_roles(), expected.as_slice(), "{action:?}");
        }
    }

    #[test]
    fn action_comment_prefixes_text() {
        assert_eq!(
            action_comment(WorkflowAction::FirstApprove, Some("looks fine")),
            "APPROVER 1 APPROVED: looks fine"
        );
        assert_eq!(action_comment(WorkflowAction::Reject, Some("   ")), "REJECTED");
        assert_eq!(action_comment(WorkflowAction::Close, None), "CASE CLOSED");
    }
}
