//! Write-time guard: a project must never be persisted, even transiently,
//! without a resolvable billed company.
//!
//! The guard runs inside the same transaction as the project insert/update;
//! an [`CoreError::InvariantViolation`] aborts the whole write.

use crate::error::CoreError;
use crate::hierarchy::CompanyGraph;
use crate::types::DbId;

/// The company-related slice of a project, either its current persisted
/// state or an incoming patch. `None` in a patch means "not touched".
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyAssignment {
    pub company_id: Option<DbId>,
    pub subcontractor_id: Option<DbId>,
}

impl CompanyAssignment {
    /// Merge a patch over the current state: patched fields win, untouched
    /// fields keep their current value. A partial update that only touches
    /// `subcontractor` is therefore validated against the project's
    /// existing `company`, not against an empty patch.
    pub fn merged_with(self, current: CompanyAssignment) -> CompanyAssignment {
        CompanyAssignment {
            company_id: self.company_id.or(current.company_id),
            subcontractor_id: self.subcontractor_id.or(current.subcontractor_id),
        }
    }
}

/// Validate the merged company assignment and determine the `company_id`
/// to persist.
///
/// - If `company` is unset but a `subcontractor` is given, the
///   subcontractor's parent main contractor is assigned as the company.
///   A subcontractor without a parent is rejected: there is no way to
///   determine who gets billed.
/// - If `company` is still unset afterwards, the write is rejected.
pub fn validate_and_assign_company(
    patch: CompanyAssignment,
    current: CompanyAssignment,
    graph: &CompanyGraph,
) -> Result<DbId, CoreError> {
    let merged = patch.merged_with(current);

    if let Some(company_id) = merged.company_id {
        return Ok(company_id);
    }

    if let Some(sub_id) = merged.subcontractor_id {
        let node = graph.get(sub_id).ok_or(CoreError::NotFound {
            entity: "Company",
            id: sub_id,
        })?;
        return match node.billed_parent() {
            Some(parent) => Ok(parent.id),
            None => Err(CoreError::InvariantViolation(format!(
                "subcontractor '{}' (id {}) has no parent main contractor; \
                 cannot determine the billed company",
                node.company().name,
                sub_id
            ))),
        };
    }

    Err(CoreError::InvariantViolation(
        "project has neither a company nor a subcontractor; \
         cannot determine the billed company"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::test_support::{company, main, sub};
    use assert_matches::assert_matches;

    fn graph() -> CompanyGraph {
        let acme = company(1, "Acme", 12.5);
        CompanyGraph::from_nodes([
            main(1, "Acme", 12.5),
            sub(2, "Crew", Some(acme)),
            sub(3, "Loose Crew", None),
        ])
    }

    fn assignment(company_id: Option<DbId>, subcontractor_id: Option<DbId>) -> CompanyAssignment {
        CompanyAssignment {
            company_id,
            subcontractor_id,
        }
    }

    #[test]
    fn explicit_company_passes_through() {
        let got = validate_and_assign_company(
            assignment(Some(1), None),
            CompanyAssignment::default(),
            &graph(),
        );
        assert_eq!(got.unwrap(), 1);
    }

    #[test]
    fn subcontractor_parent_is_assigned() {
        // Subcontractor with parent M, no company -> company becomes M.
        let got = validate_and_assign_company(
            assignment(None, Some(2)),
            CompanyAssignment::default(),
            &graph(),
        );
        assert_eq!(got.unwrap(), 1);
    }

    #[test]
    fn parentless_subcontractor_rejected() {
        // Subcontractor without parent cannot determine billing.
        let got = validate_and_assign_company(
            assignment(None, Some(3)),
            CompanyAssignment::default(),
            &graph(),
        );
        assert_matches!(got, Err(CoreError::InvariantViolation(_)));
    }

    #[test]
    fn empty_merged_state_rejected() {
        // Neither company nor subcontractor anywhere.
        let got = validate_and_assign_company(
            CompanyAssignment::default(),
            CompanyAssignment::default(),
            &graph(),
        );
        assert_matches!(got, Err(CoreError::InvariantViolation(_)));
    }

    #[test]
    fn patch_validated_against_current_company() {
        // Patch only touches the subcontractor; the existing company keeps
        // the write valid.
        let got = validate_and_assign_company(
            assignment(None, Some(3)),
            assignment(Some(1), None),
            &graph(),
        );
        assert_eq!(got.unwrap(), 1);
    }

    #[test]
    fn patch_company_wins_over_current() {
        let got = validate_and_assign_company(
            assignment(Some(1), None),
            assignment(Some(99), None),
            &graph(),
        );
        assert_eq!(got.unwrap(), 1);
    }

    #[test]
    fn unknown_subcontractor_is_not_found() {
        let got = validate_and_assign_company(
            assignment(None, Some(42)),
            CompanyAssignment::default(),
            &graph(),
        );
        assert_matches!(got, Err(CoreError::NotFound { id: 42, .. }));
    }
}
