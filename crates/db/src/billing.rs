//! Billing-period selection: which projects truly started in a date range.
//!
//! Two-phase algorithm, deliberately two bulk queries rather than a full
//! table scan or per-candidate lookups:
//!
//! 1. Candidate phase: projects with *any* activity inside the range
//!    (cheap, range-limited, a superset of the answer).
//! 2. Verification phase: the true first activity of exactly the candidate
//!    set, computed over each project's complete unbounded activity trail
//!    in one grouped query.
//!
//! A candidate survives iff its true first activity falls inside the range
//! (inclusive calendar days). Survivors are loaded with their companies
//! populated, filtered by the optional company filter against the resolved
//! attribution, and their `started_at` cache is lazily backfilled. The
//! backfill is best-effort: a failed write is logged and swallowed, never
//! surfaced to the caller.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use trakta_core::attribution::{resolve_main_contractor, Attribution};
use trakta_core::hierarchy::CompanyGraph;
use trakta_core::period::{BillingPeriod, CompanyFilter};
use trakta_core::types::{DbId, Timestamp};

use crate::models::company::{build_graph, Company};
use crate::models::project::ProjectWithCompanies;
use crate::repositories::{ActivityRepo, ProjectRepo};

/// A project selected for a billing period, with everything downstream
/// consumers need: populated company references, the derived start, and
/// the resolved attribution.
#[derive(Debug, Clone, Serialize)]
pub struct StartedProject {
    #[serde(flatten)]
    pub loaded: ProjectWithCompanies,
    /// The project's true first activity (range path) or the stored cache
    /// value (legacy path).
    pub started_at: Timestamp,
    pub attribution: Attribution,
}

/// Stateless selector; each call performs its own queries.
pub struct BillingPeriodSelector;

impl BillingPeriodSelector {
    /// Projects whose true first activity lies inside `period`, optionally
    /// restricted to one billed company.
    ///
    /// Idempotent: repeated calls return the same project set, and after
    /// the first backfill the cache write is a no-op. Two callers racing on
    /// the backfill converge on the identical timestamp, which is why the
    /// race is accepted rather than locked away.
    pub async fn started_in_range(
        pool: &PgPool,
        period: &BillingPeriod,
        filter: Option<&CompanyFilter>,
    ) -> Result<Vec<StartedProject>, sqlx::Error> {
        // Phase 1: cheap range-limited candidate scan.
        let candidates =
            ActivityRepo::candidate_project_ids(pool, period.start(), period.end_exclusive())
                .await?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Phase 2: true first activity over the unbounded activity set,
        // one bulk query for the whole candidate set.
        let first_activities = ActivityRepo::first_activity_bulk(pool, &candidates).await?;

        // Keep a candidate iff its true first activity is inside the range.
        // A project whose earliest activity precedes the range is excluded
        // even though some later activity fell inside it.
        let started: HashMap<DbId, Timestamp> = first_activities
            .into_iter()
            .filter(|(_, first)| period.contains(*first))
            .collect();
        let mut ids: Vec<DbId> = started.keys().copied().collect();
        ids.sort_unstable();

        let loaded = ProjectRepo::find_by_ids_with_companies(pool, &ids).await?;
        let graph = graph_of(&loaded);

        let mut selected = Vec::with_capacity(loaded.len());
        for loaded in loaded {
            let Some(&first_activity) = started.get(&loaded.project.id) else {
                continue;
            };
            let attribution = attribution_of(&loaded, &graph);
            if !filter_matches(filter, &attribution) {
                continue;
            }

            // Lazy write-through of the started_at cache; never corrects an
            // already stored value and never fails the read.
            if let Some(ts) = loaded
                .project
                .started_at_cache()
                .backfill_with(first_activity)
            {
                if let Err(error) =
                    ProjectRepo::backfill_started_at(pool, loaded.project.id, ts).await
                {
                    tracing::warn!(
                        project_id = loaded.project.id,
                        %error,
                        "failed to backfill started_at cache; returning derived value anyway"
                    );
                }
            }

            selected.push(StartedProject {
                loaded,
                started_at: first_activity,
                attribution,
            });
        }
        Ok(selected)
    }

    /// Legacy fallback for unbounded queries: no derivation, filter
    /// directly on the stored `started_at` cache. Lower fidelity -- a
    /// project whose cache was never backfilled is missing here even if it
    /// has activity.
    pub async fn started_by_cache(
        pool: &PgPool,
        filter: Option<&CompanyFilter>,
    ) -> Result<Vec<StartedProject>, sqlx::Error> {
        let projects = ProjectRepo::list_started_by_cache(pool).await?;
        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let loaded = ProjectRepo::find_by_ids_with_companies(pool, &ids).await?;
        let graph = graph_of(&loaded);

        Ok(loaded
            .into_iter()
            .filter_map(|loaded| {
                let started_at = loaded.project.started_at?;
                let attribution = attribution_of(&loaded, &graph);
                filter_matches(filter, &attribution).then(|| StartedProject {
                    loaded,
                    started_at,
                    attribution,
                })
            })
            .collect())
    }
}

/// Company graph over every company reference the loaded projects carry.
fn graph_of(loaded: &[ProjectWithCompanies]) -> CompanyGraph {
    let mut companies: Vec<Company> = Vec::new();
    for item in loaded {
        for company in [
            &item.company,
            &item.subcontractor,
            &item.company_parent,
            &item.subcontractor_parent,
        ]
        .into_iter()
        .flatten()
        {
            if !companies.iter().any(|c| c.id == company.id) {
                companies.push(company.clone());
            }
        }
    }
    build_graph(&companies)
}

fn attribution_of(loaded: &ProjectWithCompanies, graph: &CompanyGraph) -> Attribution {
    resolve_main_contractor(
        loaded.project.company_id,
        loaded.project.subcontractor_id,
        graph,
    )
}

/// The company filter matches against the *resolved* company, by internal
/// id or external identifier. Unattributed projects never match a filter.
fn filter_matches(filter: Option<&CompanyFilter>, attribution: &Attribution) -> bool {
    match filter {
        None => true,
        Some(filter) => attribution
            .company()
            .is_some_and(|company| filter.matches(company)),
    }
}
