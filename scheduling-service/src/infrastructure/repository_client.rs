use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{ApiResponse, DomainError, DomainResult, Employee, LeaveRecord, ShiftTemplate, ShiftTypeKey};
use uuid::Uuid;

use crate::domain::entities::Shift;
use crate::domain::repository::{ApplyTransaction, SchedulingRepository};

/// `SchedulingRepository` backed by `data-service`'s REST API. Each read
/// maps onto one endpoint; `begin_apply` returns a transaction that
/// accumulates shifts client-side and submits them as a single atomic
/// `POST /api/v1/shifts/apply` at `commit()`, since the real serialisation
/// boundary lives in data-service's advisory-locked write path, not here.
pub struct HttpRepositoryClient {
    client: Client,
    base_url: String,
    fairness_weight: HashMap<ShiftTypeKey, u32>,
}

impl HttpRepositoryClient {
    pub fn new(client: Client, base_url: String, fairness_weight: HashMap<ShiftTypeKey, u32>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            fairness_weight,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_unwrapped<T: DeserializeOwned>(&self, path: &str) -> DomainResult<T> {
        self.get_unwrapped_query(path, &[]).await
    }

    /// Same as `get_unwrapped`, but with `query` appended via reqwest's own
    /// query-string builder so values (timestamps, free-text scopes) are
    /// percent-encoded instead of interpolated raw into the path.
    async fn get_unwrapped_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> DomainResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::RepositoryUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::RepositoryUnavailable(format!(
                "GET {} returned {}",
                path,
                response.status()
            )));
        }

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalServiceError(e.to_string()))?;
        Ok(body.data)
    }

    async fn post_unwrapped<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> DomainResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::RepositoryUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::ConflictOnApply(text));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalServiceError(format!(
                "POST {} returned {}: {}",
                path, status, text
            )));
        }

        let parsed: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalServiceError(e.to_string()))?;
        Ok(parsed.data)
    }

    fn csv_ids(ids: &[Uuid]) -> String {
        ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(",")
    }
}

fn remote_shift_to_domain(r: RemoteShift) -> Shift {
    Shift {
        id: r.id,
        template_ref: r.template_ref,
        shift_type: r.shift_type,
        assigned_employee: r.assigned_employee,
        start_instant: r.start_instant,
        end_instant: r.end_instant,
        status: r.status,
        auto_generated: r.auto_generated,
    }
}

/// Wire shape of data-service's `ShiftResponse` / `ShiftSerializer`, minus
/// the `created_at`/`updated_at` fields the engine's own `Shift` doesn't
/// carry.
#[derive(Debug, serde::Deserialize)]
struct RemoteShift {
    id: Uuid,
    template_ref: Uuid,
    shift_type: ShiftTypeKey,
    assigned_employee: Uuid,
    start_instant: DateTime<Utc>,
    end_instant: DateTime<Utc>,
    status: shared::ShiftStatus,
    auto_generated: bool,
}

#[async_trait]
impl SchedulingRepository for HttpRepositoryClient {
    async fn list_employees(&self, team_scope: &str) -> DomainResult<Vec<Employee>> {
        self.get_unwrapped_query(
            "/api/v1/employees/active",
            &[("team_scope", team_scope.to_string())],
        )
        .await
    }

    async fn list_approved_leaves(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> DomainResult<Vec<LeaveRecord>> {
        let range_start_date = range_start.date_naive();
        let range_end_exclusive = range_end.date_naive() + chrono::Duration::days(1);
        self.get_unwrapped_query(
            "/api/v1/leave-records/approved-overlapping",
            &[
                ("employee_ids", Self::csv_ids(employee_ids)),
                ("range_start", range_start_date.to_string()),
                ("range_end_exclusive", range_end_exclusive.to_string()),
            ],
        )
        .await
    }

    async fn list_shifts(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> DomainResult<Vec<Shift>> {
        let remote: Vec<RemoteShift> = self
            .get_unwrapped_query(
                "/api/v1/shifts",
                &[
                    ("employee_ids", Self::csv_ids(employee_ids)),
                    ("range_start", range_start.to_rfc3339()),
                    ("range_end", range_end.to_rfc3339()),
                    ("include_cancelled", include_cancelled.to_string()),
                ],
            )
            .await?;
        Ok(remote.into_iter().map(remote_shift_to_domain).collect())
    }

    async fn history_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, f64>> {
        let raw: HashMap<Uuid, i64> = self
            .get_unwrapped_query(
                "/api/v1/shifts/history-counts",
                &[
                    ("employee_ids", Self::csv_ids(employee_ids)),
                    ("shift_type", shift_type.to_string()),
                    ("since", since.to_rfc3339()),
                ],
            )
            .await?;

        let weight = *self.fairness_weight.get(&shift_type).unwrap_or(&1) as f64;
        Ok(raw.into_iter().map(|(id, count)| (id, count as f64 * weight)).collect())
    }

    async fn template_for(&self, shift_type: ShiftTypeKey) -> DomainResult<ShiftTemplate> {
        let templates: Vec<ShiftTemplate> = self
            .get_unwrapped_query(
                "/api/v1/templates/by-type",
                &[("shift_type", shift_type.to_string())],
            )
            .await?;
        templates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NotFound(format!("no template registered for {:?}", shift_type)))
    }

    async fn begin_apply(
        &self,
        team_scope: &str,
        horizon_start: DateTime<Utc>,
        horizon_end: DateTime<Utc>,
    ) -> DomainResult<Box<dyn ApplyTransaction>> {
        Ok(Box::new(HttpApplyTransaction {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            team_scope: team_scope.to_string(),
            horizon_start,
            horizon_end,
            pending: Vec::new(),
        }))
    }
}

#[derive(Debug, Serialize)]
struct ApplyShiftsRequestBody {
    team_scope: String,
    horizon_start: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
    shifts: Vec<NewShiftWire>,
}

#[derive(Debug, Serialize)]
struct NewShiftWire {
    id: Uuid,
    template_ref: Uuid,
    shift_type: ShiftTypeKey,
    assigned_employee: Uuid,
    start_instant: DateTime<Utc>,
    end_instant: DateTime<Utc>,
    status: shared::ShiftStatus,
    auto_generated: bool,
}

/// Data-service owns the actual serialisable write (an advisory-locked
/// Postgres transaction); this transaction only accumulates the shifts the
/// Orchestrator wants written and submits them as one request at `commit`.
/// `check_no_new_conflicts` performs a read-only dry run against the live
/// `/shifts` endpoint so the Orchestrator can still surface a conflict
/// before attempting the write.
struct HttpApplyTransaction {
    client: Client,
    base_url: String,
    team_scope: String,
    horizon_start: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
    pending: Vec<Shift>,
}

#[async_trait]
impl ApplyTransaction for HttpApplyTransaction {
    async fn check_no_new_conflicts(&mut self, tentative: &[Shift]) -> DomainResult<bool> {
        let employee_ids: Vec<Uuid> = tentative.iter().map(|s| s.assigned_employee).collect();
        let url = format!("{}/api/v1/shifts", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                (
                    "employee_ids",
                    employee_ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(","),
                ),
                ("range_start", self.horizon_start.to_rfc3339()),
                ("range_end", self.horizon_end.to_rfc3339()),
                ("include_cancelled", "false".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::RepositoryUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DomainError::RepositoryUnavailable(format!(
                "GET /api/v1/shifts returned {}",
                response.status()
            )));
        }
        let body: ApiResponse<Vec<RemoteShift>> = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalServiceError(e.to_string()))?;
        let current: Vec<Shift> = body.data.into_iter().map(remote_shift_to_domain).collect();

        let clean = tentative.iter().all(|candidate| {
            !current.iter().any(|existing| {
                existing.assigned_employee == candidate.assigned_employee
                    && existing.overlaps(candidate.start_instant, candidate.end_instant)
            })
        });
        Ok(clean)
    }

    async fn write_shifts(&mut self, shifts: Vec<Shift>) -> DomainResult<()> {
        self.pending.extend(shifts);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let body = ApplyShiftsRequestBody {
            team_scope: self.team_scope.clone(),
            horizon_start: self.horizon_start,
            horizon_end: self.horizon_end,
            shifts: self
                .pending
                .iter()
                .map(|s| NewShiftWire {
                    id: s.id,
                    template_ref: s.template_ref,
                    shift_type: s.shift_type,
                    assigned_employee: s.assigned_employee,
                    start_instant: s.start_instant,
                    end_instant: s.end_instant,
                    status: s.status,
                    auto_generated: s.auto_generated,
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!("{}/api/v1/shifts/apply", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::RepositoryUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::ConflictOnApply(text));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalServiceError(format!(
                "POST /api/v1/shifts/apply returned {}: {}",
                status, text
            )));
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        // Nothing was written to data-service yet; the accumulated batch is
        // simply dropped.
        Ok(())
    }
}
