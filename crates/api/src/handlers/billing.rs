//! Handlers for billing-period queries and per-contractor summaries.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use trakta_core::billing::{aggregate, BilledProject, BillingSheet};
use trakta_core::hierarchy::CompanyRef;
use trakta_core::period::{BillingPeriod, CompanyFilter};
use trakta_db::billing::{BillingPeriodSelector, StartedProject};
use trakta_db::models::company::Company;
use trakta_db::repositories::CompanyRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the billing endpoints.
///
/// `from`/`to` are inclusive calendar dates and must be supplied together;
/// omitting both takes the legacy path filtering on the stored `started_at`
/// cache. `company` accepts a numeric id or an external identifier.
#[derive(Debug, Deserialize)]
pub struct BillingQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub company: Option<String>,
}

fn parse_query(
    params: &BillingQuery,
) -> AppResult<(Option<BillingPeriod>, Option<CompanyFilter>)> {
    let period = match (&params.from, &params.to) {
        (Some(from), Some(to)) => Some(BillingPeriod::parse(from, to)?),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "'from' and 'to' must be supplied together".to_string(),
            ))
        }
    };
    let filter = params
        .company
        .as_deref()
        .map(CompanyFilter::parse)
        .transpose()?;
    Ok((period, filter))
}

async fn select(
    state: &AppState,
    period: Option<&BillingPeriod>,
    filter: Option<&CompanyFilter>,
) -> AppResult<Vec<StartedProject>> {
    let started = match period {
        Some(period) => {
            BillingPeriodSelector::started_in_range(&state.pool, period, filter).await?
        }
        None => BillingPeriodSelector::started_by_cache(&state.pool, filter).await?,
    };
    Ok(started)
}

/// GET /api/v1/billing/projects?from=&to=&company=
///
/// Projects whose true first activity falls inside the period, with
/// company references and attribution populated.
pub async fn list_started_projects(
    State(state): State<AppState>,
    Query(params): Query<BillingQuery>,
) -> AppResult<Json<DataResponse<Vec<StartedProject>>>> {
    let (period, filter) = parse_query(&params)?;
    let started = select(&state, period.as_ref(), filter.as_ref()).await?;
    Ok(Json(DataResponse { data: started }))
}

/// GET /api/v1/billing/summary?from=&to=&company=
///
/// Per-main-contractor totals for the period. Every known main contractor
/// appears, zero row or not; unattributed projects are excluded from the
/// totals but reported and logged.
pub async fn billing_summary(
    State(state): State<AppState>,
    Query(params): Query<BillingQuery>,
) -> AppResult<Json<DataResponse<BillingSheet>>> {
    let (period, filter) = parse_query(&params)?;
    let started = select(&state, period.as_ref(), filter.as_ref()).await?;

    let main_contractors: Vec<CompanyRef> = CompanyRepo::list_main_contractors(&state.pool)
        .await?
        .iter()
        .map(Company::to_ref)
        .collect();

    let billed: Vec<BilledProject> = started
        .iter()
        .map(|s| BilledProject {
            project_id: s.loaded.project.id,
            area_sqm: s.loaded.project.area_sqm,
            attribution: s.attribution.clone(),
        })
        .collect();

    let sheet = aggregate(&billed, &main_contractors);
    if !sheet.unattributed_project_ids.is_empty() {
        tracing::warn!(
            project_ids = ?sheet.unattributed_project_ids,
            "projects without a resolvable company excluded from billed totals"
        );
    }

    Ok(Json(DataResponse { data: sheet }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use trakta_core::error::CoreError;

    fn query(from: Option<&str>, to: Option<&str>, company: Option<&str>) -> BillingQuery {
        BillingQuery {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            company: company.map(str::to_string),
        }
    }

    #[test]
    fn full_range_with_filter() {
        let (period, filter) =
            parse_query(&query(Some("2025-02-01"), Some("2025-02-28"), Some("7"))).unwrap();
        assert!(period.is_some());
        assert_eq!(filter, Some(CompanyFilter::Id(7)));
    }

    #[test]
    fn no_range_takes_legacy_path() {
        let (period, filter) = parse_query(&query(None, None, None)).unwrap();
        assert!(period.is_none());
        assert!(filter.is_none());
    }

    #[test]
    fn half_open_range_rejected() {
        assert_matches!(
            parse_query(&query(Some("2025-02-01"), None, None)),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(
            parse_query(&query(None, Some("2025-02-28"), None)),
            Err(AppError::BadRequest(_))
        );
    }

    #[test]
    fn malformed_dates_rejected() {
        assert_matches!(
            parse_query(&query(Some("not-a-date"), Some("2025-02-28"), None)),
            Err(AppError::Core(CoreError::InvalidRange(_)))
        );
    }

    #[test]
    fn unparseable_company_filter_rejected() {
        assert_matches!(
            parse_query(&query(None, None, Some("acme"))),
            Err(AppError::Core(CoreError::InvalidRange(_)))
        );
    }
}
