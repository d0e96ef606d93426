//! Resolving a project to the single main contractor it is billed to.
//!
//! Historical records store company ownership inconsistently: sometimes the
//! main contractor sits directly in `company`, sometimes `company` holds the
//! subcontractor, sometimes the subcontractor field holds a main contractor.
//! The resolver walks a fixed fallback chain and never panics and never
//! drops a project; a best-effort guess is tagged [`Attribution::Degraded`]
//! so consumers can visually distinguish it from a confident resolution.

use serde::Serialize;

use crate::hierarchy::{CompanyGraph, CompanyNode, CompanyRef};
use crate::types::DbId;

/// Outcome of main-contractor resolution for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "company", rename_all = "snake_case")]
pub enum Attribution {
    /// Confidently resolved main contractor.
    Resolved(CompanyRef),
    /// No main contractor found; showing the literal company rather than
    /// silently omitting the project from billing views.
    Degraded(CompanyRef),
    /// No company reference resolvable at all. Excluded from billed totals
    /// but surfaced as a data-quality warning.
    Unattributed,
}

impl Attribution {
    /// The company an amount would be attributed to, if any.
    pub fn company(&self) -> Option<&CompanyRef> {
        match self {
            Attribution::Resolved(c) | Attribution::Degraded(c) => Some(c),
            Attribution::Unattributed => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Attribution::Resolved(_))
    }
}

/// Resolve the main contractor a project is billed to. First match wins:
///
/// 1. `company` is a main contractor -> that company
/// 2. `company` is a subcontractor with a main-contractor parent -> the parent
/// 3. `subcontractor` is a subcontractor with a main-contractor parent -> the parent
/// 4. `subcontractor` is itself a main contractor (legacy misuse) -> the subcontractor
/// 5. `company` present -> degraded fallback to the literal company
/// 6. otherwise unattributed
pub fn resolve_main_contractor(
    company_id: Option<DbId>,
    subcontractor_id: Option<DbId>,
    graph: &CompanyGraph,
) -> Attribution {
    let company = company_id.and_then(|id| graph.get(id));
    let subcontractor = subcontractor_id.and_then(|id| graph.get(id));

    if let Some(node) = company {
        if let CompanyNode::MainContractor(c) = node {
            return Attribution::Resolved(c.clone());
        }
        if let Some(parent) = node.billed_parent() {
            return Attribution::Resolved(parent.clone());
        }
    }

    if let Some(node) = subcontractor {
        if let Some(parent) = node.billed_parent() {
            return Attribution::Resolved(parent.clone());
        }
        if let CompanyNode::MainContractor(c) = node {
            return Attribution::Resolved(c.clone());
        }
    }

    match company {
        Some(node) => Attribution::Degraded(node.company().clone()),
        None => Attribution::Unattributed,
    }
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
            main(4, "Beton AG", 9.0),
        ])
    }

    #[test]
    fn company_is_main_contractor() {
        // A direct main contractor is returned unchanged.
        let a = resolve_main_contractor(Some(1), None, &graph());
        assert_matches!(a, Attribution::Resolved(c) if c.id == 1);
    }

    #[test]
    fn company_is_sub_with_parent() {
        let a = resolve_main_contractor(Some(2), None, &graph());
        assert_matches!(a, Attribution::Resolved(c) if c.id == 1);
    }

    #[test]
    fn subcontractor_parent_used_when_company_absent() {
        // No company, subcontractor's parent wins.
        let a = resolve_main_contractor(None, Some(2), &graph());
        assert_matches!(a, Attribution::Resolved(c) if c.id == 1);
    }

    #[test]
    fn legacy_main_contractor_in_subcontractor_field() {
        let a = resolve_main_contractor(None, Some(4), &graph());
        assert_matches!(a, Attribution::Resolved(c) if c.id == 4);
    }

    #[test]
    fn company_takes_precedence_over_subcontractor() {
        let a = resolve_main_contractor(Some(1), Some(4), &graph());
        assert_matches!(a, Attribution::Resolved(c) if c.id == 1);
    }

    #[test]
    fn orphan_sub_company_falls_back_degraded() {
        // company is a parentless sub, subcontractor unhelpful too.
        let a = resolve_main_contractor(Some(3), Some(3), &graph());
        assert_matches!(a, Attribution::Degraded(c) if c.id == 3);
    }

    #[test]
    fn orphan_sub_in_sub_field_only_is_unattributed() {
        let a = resolve_main_contractor(None, Some(3), &graph());
        assert_eq!(a, Attribution::Unattributed);
    }

    #[test]
    fn nothing_resolvable_is_unattributed() {
        let a = resolve_main_contractor(None, None, &graph());
        assert_eq!(a, Attribution::Unattributed);
        assert!(a.company().is_none());
    }

    #[test]
    fn dangling_company_reference_is_unattributed() {
        let a = resolve_main_contractor(Some(99), None, &graph());
        assert_eq!(a, Attribution::Unattributed);
    }

    #[test]
    fn serializes_with_status_tag() {
        let a = resolve_main_contractor(Some(1), None, &graph());
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["company"]["id"], 1);
    }
}
