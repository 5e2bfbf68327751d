//! Repository for the `regulatory_reports` table.

use sqlx::SqlitePool;
use tathya_core::regulatory::{SUBMISSION_PENDING, SUBMISSION_SUBMITTED};
use tathya_core::types::{DbId, Timestamp};

use crate::models::regulatory_report::{
    CreateRegulatoryReport, FraudTypeStats, MonthlyReportStats, RegulatoryReport,
};

const COLUMNS: &str = "\
    id, case_id, report_type, reporting_date, fraud_amount, fraud_type, detection_method, \
    geographical_area, recovery_amount, incident_description, modus_operandi, \
    police_complaint, fir_number, police_station, staff_involvement, staff_action, \
    prevention_measures, generated_by, submission_status, submitted_by, submitted_at, \
    created_at";

pub struct RegulatoryReportRepo;

impl RegulatoryReportRepo {
    /// Insert a report in `Pending` status. A second report of the same type
    /// for a case violates the unique constraint.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateRegulatoryReport,
    ) -> Result<RegulatoryReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO regulatory_reports (case_id, report_type, reporting_date, fraud_amount, \
                 fraud_type, detection_method, geographical_area, recovery_amount, \
                 incident_description, modus_operandi, police_complaint, fir_number, \
                 police_station, staff_involvement, staff_action, prevention_measures, \
                 generated_by, submission_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                 $17, $18) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RegulatoryReport>(&query)
            .bind(&input.case_id)
            .bind(&input.report_type)
            .bind(input.reporting_date)
            .bind(input.fraud_amount)
            .bind(&input.fraud_type)
            .bind(&input.detection_method)
            .bind(&input.geographical_area)
            .bind(input.recovery_amount)
            .bind(&input.incident_description)
            .bind(&input.modus_operandi)
            .bind(input.police_complaint)
            .bind(&input.fir_number)
            .bind(&input.police_station)
            .bind(&input.staff_involvement)
            .bind(&input.staff_action)
            .bind(&input.prevention_measures)
            .bind(&input.generated_by)
            .bind(SUBMISSION_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<RegulatoryReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regulatory_reports WHERE id = $1");
        sqlx::query_as::<_, RegulatoryReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reports of one type, newest first, optionally by submission status.
    pub async fn list(
        pool: &SqlitePool,
        report_type: &str,
        submission_status: Option<&str>,
    ) -> Result<Vec<RegulatoryReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM regulatory_reports \
             WHERE report_type = $1 AND ($2 IS NULL OR submission_status = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RegulatoryReport>(&query)
            .bind(report_type)
            .bind(submission_status)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_case(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Vec<RegulatoryReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM regulatory_reports WHERE case_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, RegulatoryReport>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a pending report as submitted. Returns `None` if the report does
    /// not exist or was already submitted.
    pub async fn mark_submitted(
        pool: &SqlitePool,
        id: DbId,
        by: &str,
        at: Timestamp,
    ) -> Result<Option<RegulatoryReport>, sqlx::Error> {
        let query = format!(
            "UPDATE regulatory_reports \
             SET submission_status = $2, submitted_by = $3, submitted_at = $4 \
             WHERE id = $1 AND submission_status = $5 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RegulatoryReport>(&query)
            .bind(id)
            .bind(SUBMISSION_SUBMITTED)
            .bind(by)
            .bind(at)
            .bind(SUBMISSION_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// The last twelve reporting months, newest first.
    pub async fn monthly_stats(
        pool: &SqlitePool,
        report_type: &str,
    ) -> Result<Vec<MonthlyReportStats>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyReportStats>(
            "SELECT substr(reporting_date, 1, 7) AS month, \
                    COUNT(*) AS report_count, \
                    CAST(SUM(fraud_amount) AS REAL) AS total_amount, \
                    CAST(SUM(recovery_amount) AS REAL) AS total_recovery \
             FROM regulatory_reports WHERE report_type = $1 \
             GROUP BY month ORDER BY month DESC LIMIT 12",
        )
        .bind(report_type)
        .fetch_all(pool)
        .await
    }

    pub async fn fraud_type_stats(
        pool: &SqlitePool,
        report_type: &str,
    ) -> Result<Vec<FraudTypeStats>, sqlx::Error> {
        sqlx::query_as::<_, FraudTypeStats>(
            "SELECT fraud_type, COUNT(*) AS count, CAST(SUM(fraud_amount) AS REAL) AS amount \
             FROM regulatory_reports WHERE report_type = $1 \
             GROUP BY fraud_type ORDER BY count DESC, fraud_type",
        )
        .bind(report_type)
        .fetch_all(pool)
        .await
    }
}
