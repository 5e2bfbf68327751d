//! Repository for the `cases` table.

use sqlx::{Executor, Sqlite, SqlitePool};
use tathya_core::types::Timestamp;

use crate::filter::{bind_values, bind_values_scalar, BindValue, Filter};
use crate::models::case::{Case, CaseFilter, CreateCase, UpdateCase};

const COLUMNS: &str = "\
    id, case_id, category, referred_by, case_type, case_date, case_description, \
    customer_name, lan, loan_amount, product, branch_location, region, pan, aadhaar, \
    mobile_number, email_id, disbursement_date, case_details, status, priority, \
    risk_score, risk_category, closure_type, closure_remarks, closed_at, \
    created_by, created_at, updated_at";

const TOUCH: &str = "updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

pub struct CaseRepo;

impl CaseRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateCase) -> Result<Case, sqlx::Error> {
        let query = format!(
            "INSERT INTO cases (case_id, category, referred_by, case_type, case_date, \
                 case_description, customer_name, lan, loan_amount, product, branch_location, \
                 region, pan, aadhaar, mobile_number, email_id, disbursement_date, case_details, \
                 status, priority, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                 $17, $18, $19, $20, $21) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(&input.case_id)
            .bind(&input.category)
            .bind(&input.referred_by)
            .bind(&input.case_type)
            .bind(input.case_date)
            .bind(&input.case_description)
            .bind(&input.customer_name)
            .bind(&input.lan)
            .bind(input.loan_amount)
            .bind(&input.product)
            .bind(&input.branch_location)
            .bind(&input.region)
            .bind(&input.pan)
            .bind(&input.aadhaar)
            .bind(&input.mobile_number)
            .bind(&input.email_id)
            .bind(input.disbursement_date)
            .bind(&input.case_details)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_case_id(
        pool: &SqlitePool,
        case_id: &str,
    ) -> Result<Option<Case>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cases WHERE case_id = $1");
        sqlx::query_as::<_, Case>(&query)
            .bind(case_id)
            .fetch_optional(pool)
            .await
    }

    /// List cases matching `filter`, newest first.
    pub async fn list(pool: &SqlitePool, filter: &CaseFilter) -> Result<Vec<Case>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(50).clamp(1, 500);
        let offset = filter.offset.unwrap_or(0).max(0);

        let f = build_case_filter(filter);
        let idx = f.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM cases {} ORDER BY created_at DESC, id DESC \
             LIMIT ${idx} OFFSET ${}",
            f.where_clause(),
            idx + 1
        );
        bind_values(sqlx::query_as::<_, Case>(&query), &f.values)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool, filter: &CaseFilter) -> Result<i64, sqlx::Error> {
        let f = build_case_filter(filter);
        let query = format!("SELECT COUNT(*) FROM cases {}", f.where_clause());
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), &f.values)
            .fetch_one(pool)
            .await
    }

    /// Cases in `status` that have no regulatory report of `report_type`.
    pub async fn list_unreported(
        pool: &SqlitePool,
        status: &str,
        report_type: &str,
    ) -> Result<Vec<Case>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cases WHERE status = $1 AND case_id NOT IN \
                 (SELECT case_id FROM regulatory_reports WHERE report_type = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(status)
            .bind(report_type)
            .fetch_all(pool)
            .await
    }

    /// Cases whose status is any of `statuses`, oldest update first.
    pub async fn list_by_statuses(
        pool: &SqlitePool,
        statuses: &[&str],
    ) -> Result<Vec<Case>, sqlx::Error> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders: Vec<String> = (1..=statuses.len()).map(|i| format!("${i}")).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM cases WHERE status IN ({}) ORDER BY updated_at ASC, id ASC",
            placeholders.join(", ")
        );
        let mut q = sqlx::query_as::<_, Case>(&query);
        for status in statuses {
            q = q.bind(*status);
        }
        q.fetch_all(pool).await
    }

    /// Apply a patch. Only non-`None` fields are written.
    ///
    /// Returns `None` if no case with `case_id` exists.
    pub async fn update(
        pool: &SqlitePool,
        case_id: &str,
        input: &UpdateCase,
    ) -> Result<Option<Case>, sqlx::Error> {
        let query = format!(
            "UPDATE cases SET
                category = COALESCE($2, category),
                referred_by = COALESCE($3, referred_by),
                case_type = COALESCE($4, case_type),
                case_date = COALESCE($5, case_date),
                case_description = COALESCE($6, case_description),
                customer_name = COALESCE($7, customer_name),
                lan = COALESCE($8, lan),
                loan_amount = COALESCE($9, loan_amount),
                product = COALESCE($10, product),
                branch_location = COALESCE($11, branch_location),
                region = COALESCE($12, region),
                pan = COALESCE($13, pan),
                aadhaar = COALESCE($14, aadhaar),
                mobile_number = COALESCE($15, mobile_number),
                email_id = COALESCE($16, email_id),
                disbursement_date = COALESCE($17, disbursement_date),
                case_details = COALESCE($18, case_details),
                priority = COALESCE($19, priority),
                {TOUCH}
             WHERE case_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(case_id)
            .bind(&input.category)
            .bind(&input.referred_by)
            .bind(&input.case_type)
            .bind(input.case_date)
            .bind(&input.case_description)
            .bind(&input.customer_name)
            .bind(&input.lan)
            .bind(input.loan_amount)
            .bind(&input.product)
            .bind(&input.branch_location)
            .bind(&input.region)
            .bind(&input.pan)
            .bind(&input.aadhaar)
            .bind(&input.mobile_number)
            .bind(&input.email_id)
            .bind(input.disbursement_date)
            .bind(&input.case_details)
            .bind(&input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the status. Last write wins.
    pub async fn update_status<'e, E>(
        executor: E,
        case_id: &str,
        status: &str,
    ) -> Result<Option<Case>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query =
            format!("UPDATE cases SET status = $2, {TOUCH} WHERE case_id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Case>(&query)
            .bind(case_id)
            .bind(status)
            .fetch_optional(executor)
            .await
    }

    /// Store the latest risk assessment on the case.
    pub async fn record_risk(
        pool: &SqlitePool,
        case_id: &str,
        score: f64,
        category: &str,
    ) -> Result<Option<Case>, sqlx::Error> {
        let query = format!(
            "UPDATE cases SET risk_score = $2, risk_category = $3, {TOUCH} \
             WHERE case_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(case_id)
            .bind(score)
            .bind(category)
            .fetch_optional(pool)
            .await
    }

    /// Close a case with the actioner's disposition.
    pub async fn close<'e, E>(
        executor: E,
        case_id: &str,
        status: &str,
        closure_type: &str,
        remarks: Option<&str>,
        at: Timestamp,
    ) -> Result<Option<Case>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            "UPDATE cases SET status = $2, closure_type = $3, closure_remarks = $4, \
                 closed_at = $5, {TOUCH} \
             WHERE case_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(case_id)
            .bind(status)
            .bind(closure_type)
            .bind(remarks)
            .bind(at)
            .fetch_optional(executor)
            .await
    }
}

fn build_case_filter(filter: &CaseFilter) -> Filter {
    let mut f = Filter::new();
    if let Some(ref status) = filter.status {
        f.push("status = {}", BindValue::Text(status.clone()));
    }
    if let Some(ref case_type) = filter.case_type {
        f.push("case_type = {}", BindValue::Text(case_type.clone()));
    }
    if let Some(ref created_by) = filter.created_by {
        f.push("created_by = {}", BindValue::Text(created_by.clone()));
    }
    if let Some(ref region) = filter.region {
        f.push("region = {}", BindValue::Text(region.clone()));
    }
    if let Some(ref search) = filter.search {
        let search = search.trim();
        if !search.is_empty() {
            f.push_text_search(
                &["case_id", "customer_name", "lan", "case_description"],
                search,
            );
        }
    }
    f
}
