//! FMR-1 fraud monitoring returns reported to the regulator.
//!
//! Category values are stored as their labels.

use serde::{Deserialize, Serialize};

pub const REPORT_TYPE_FMR1: &str = "FMR1";

pub const SUBMISSION_PENDING: &str = "Pending";
pub const SUBMISSION_SUBMITTED: &str = "Submitted";

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

labelled_enum!(FraudType {
    CardFraud => "Card Fraud",
    InternetBanking => "Internet Banking Fraud",
    MobileBanking => "Mobile Banking Fraud",
    Atm => "ATM Fraud",
    AccountTakeover => "Account Takeover",
    IdentityTheft => "Identity Theft",
    DocumentFraud => "Document Fraud",
    Other => "Other",
});

labelled_enum!(DetectionMethod {
    CustomerComplaint => "Customer Complaint",
    InternalMonitoring => "Internal Monitoring",
    AccountMonitoring => "Account Monitoring",
    TransactionMonitoring => "Transaction Monitoring",
    Audit => "Audit",
    LawEnforcement => "Law Enforcement",
    Other => "Other",
});

labelled_enum!(GeographicalArea {
    Metro => "Metro",
    Urban => "Urban",
    SemiUrban => "Semi-Urban",
    Rural => "Rural",
});

labelled_enum!(StaffInvolvement {
    Yes => "Yes",
    No => "No",
    UnderInvestigation => "Under Investigation",
});

/// Recovered share of the fraud amount as a percentage, 0 when nothing was
/// lost.
pub fn recovery_rate(fraud_amount: f64, recovered: f64) -> f64 {
    if fraud_amount > 0.0 {
        recovered / fraud_amount * 100.0
    } else {
        0.0
    }
}

/// Check the amounts and action-taken fields of a report before storage.
pub fn validate_report(
    fraud_amount: f64,
    recovery_amount: f64,
    police_complaint: bool,
    fir_number: Option<&str>,
) -> Result<(), String> {
    if !fraud_amount.is_finite() || fraud_amount < 0.0 {
        return Err("fraud_amount must be zero or more".into());
    }
    if !recovery_amount.is_finite() || recovery_amount < 0.0 {
        return Err("recovery_amount must be zero or more".into());
    }
    if recovery_amount > fraud_amount {
        return Err("recovery_amount cannot exceed fraud_amount".into());
    }
    let has_fir = fir_number.map(str::trim).is_some_and(|f| !f.is_empty());
    if police_complaint && !has_fir {
        return Err("fir_number is required when a police complaint was filed".into());
    }
    Ok(())
}
