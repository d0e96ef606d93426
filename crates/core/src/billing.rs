//! Per-contractor billing aggregation.
//!
//! Groups the billing-period selection by resolved main contractor and sums
//! billed area. Rows are seeded from the full main-contractor list so a
//! billing sheet shows an explicit zero row for a client with no matched
//! projects rather than omitting them entirely.

use std::collections::HashMap;

use serde::Serialize;

use crate::attribution::Attribution;
use crate::hierarchy::CompanyRef;
use crate::types::DbId;

/// One project's contribution to a billing sheet.
#[derive(Debug, Clone)]
pub struct BilledProject {
    pub project_id: DbId,
    pub area_sqm: f64,
    pub attribution: Attribution,
}

/// Totals for one resolved main contractor.
#[derive(Debug, Clone, Serialize)]
pub struct ContractorTotal {
    pub company: CompanyRef,
    pub project_count: u32,
    pub total_area_sqm: f64,
    /// `total_area_sqm` times the contractor's price per square metre.
    pub billable_amount: f64,
}

/// Aggregated billing sheet for one period.
#[derive(Debug, Clone, Serialize)]
pub struct BillingSheet {
    pub rows: Vec<ContractorTotal>,
    /// Projects billed through a degraded fallback; their amounts are
    /// included above but should be flagged for review.
    pub degraded_project_ids: Vec<DbId>,
    /// Projects with no resolvable company. Excluded from the totals (an
    /// amount cannot be attributed to an unknown party) but reported so
    /// they are never silently dropped.
    pub unattributed_project_ids: Vec<DbId>,
}

/// Group projects by their resolved main contractor.
///
/// `main_contractors` seeds the result so every known main contractor gets
/// a row, zero or not. Degraded attributions may target companies outside
/// that list; they get their own rows appended after the seeded ones.
pub fn aggregate(projects: &[BilledProject], main_contractors: &[CompanyRef]) -> BillingSheet {
    let mut rows: Vec<ContractorTotal> = main_contractors
        .iter()
        .map(|c| ContractorTotal {
            company: c.clone(),
            project_count: 0,
            total_area_sqm: 0.0,
            billable_amount: 0.0,
        })
        .collect();
    let mut index: HashMap<DbId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.company.id, i))
        .collect();

    let mut degraded_project_ids = Vec::new();
    let mut unattributed_project_ids = Vec::new();

    for project in projects {
        let company = match &project.attribution {
            Attribution::Resolved(c) => c,
            Attribution::Degraded(c) => {
                degraded_project_ids.push(project.project_id);
                c
            }
            Attribution::Unattributed => {
                unattributed_project_ids.push(project.project_id);
                continue;
            }
        };

        let i = *index.entry(company.id).or_insert_with(|| {
            rows.push(ContractorTotal {
                company: company.clone(),
                project_count: 0,
                total_area_sqm: 0.0,
                billable_amount: 0.0,
            });
            rows.len() - 1
        });
        rows[i].project_count += 1;
        rows[i].total_area_sqm += project.area_sqm;
        rows[i].billable_amount = rows[i].total_area_sqm * rows[i].company.price_per_sqm;
    }

    BillingSheet {
        rows,
        degraded_project_ids,
        unattributed_project_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::test_support::company;

    fn billed(project_id: DbId, area: f64, attribution: Attribution) -> BilledProject {
        BilledProject {
            project_id,
            area_sqm: area,
            attribution,
        }
    }

    #[test]
    fn sums_area_and_amount_per_contractor() {
        let acme = company(1, "Acme", 10.0);
        let beton = company(2, "Beton AG", 8.0);
        let sheet = aggregate(
            &[
                billed(10, 40.0, Attribution::Resolved(acme.clone())),
                billed(11, 60.0, Attribution::Resolved(acme.clone())),
                billed(12, 25.0, Attribution::Resolved(beton.clone())),
            ],
            &[acme, beton],
        );

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].project_count, 2);
        assert_eq!(sheet.rows[0].total_area_sqm, 100.0);
        assert_eq!(sheet.rows[0].billable_amount, 1000.0);
        assert_eq!(sheet.rows[1].billable_amount, 200.0);
    }

    #[test]
    fn contractor_without_projects_keeps_zero_row() {
        let acme = company(1, "Acme", 10.0);
        let idle = company(2, "Idle GmbH", 8.0);
        let sheet = aggregate(
            &[billed(10, 40.0, Attribution::Resolved(acme.clone()))],
            &[acme, idle],
        );

        let idle_row = sheet.rows.iter().find(|r| r.company.id == 2).unwrap();
        assert_eq!(idle_row.project_count, 0);
        assert_eq!(idle_row.total_area_sqm, 0.0);
        assert_eq!(idle_row.billable_amount, 0.0);
    }

    #[test]
    fn degraded_amounts_counted_and_flagged() {
        let acme = company(1, "Acme", 10.0);
        let stray = company(3, "Stray Sub", 0.0);
        let sheet = aggregate(
            &[billed(10, 40.0, Attribution::Degraded(stray.clone()))],
            &[acme],
        );

        assert_eq!(sheet.degraded_project_ids, vec![10]);
        let stray_row = sheet.rows.iter().find(|r| r.company.id == 3).unwrap();
        assert_eq!(stray_row.project_count, 1);
        assert_eq!(stray_row.total_area_sqm, 40.0);
    }

    #[test]
    fn unattributed_excluded_from_totals_but_reported() {
        let acme = company(1, "Acme", 10.0);
        let sheet = aggregate(
            &[
                billed(10, 40.0, Attribution::Resolved(acme.clone())),
                billed(11, 99.0, Attribution::Unattributed),
            ],
            &[acme],
        );

        assert_eq!(sheet.unattributed_project_ids, vec![11]);
        assert_eq!(sheet.rows[0].total_area_sqm, 40.0);
    }

    #[test]
    fn empty_inputs_yield_empty_sheet() {
        let sheet = aggregate(&[], &[]);
        assert!(sheet.rows.is_empty());
        assert!(sheet.degraded_project_ids.is_empty());
        assert!(sheet.unattributed_project_ids.is_empty());
    }
}
