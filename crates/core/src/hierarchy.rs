//! Read-only view of the company hierarchy.
//!
//! The domain fixes the hierarchy at exactly two levels: main contractors at
//! the top, subcontractors optionally pointing at one main contractor. It is
//! modelled as a tagged union rather than a general tree, which rules out
//! cycles and unbounded recursion by construction.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::types::DbId;

/// Lightweight view of a company, carried through attribution and billing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRef {
    pub id: DbId,
    /// Opaque stable identifier used by external systems and filters.
    pub external_id: Uuid,
    pub name: String,
    pub price_per_sqm: f64,
}

/// A company's position in the two-level hierarchy.
#[derive(Debug, Clone, Serialize)]
pub enum CompanyNode {
    MainContractor(CompanyRef),
    Subcontractor {
        company: CompanyRef,
        /// The main contractor this subcontractor works for, if recorded.
        parent: Option<CompanyRef>,
    },
}

impl CompanyNode {
    /// The company itself, regardless of its role.
    pub fn company(&self) -> &CompanyRef {
        match self {
            CompanyNode::MainContractor(c) => c,
            CompanyNode::Subcontractor { company, .. } => company,
        }
    }

    /// The main contractor to bill through this node's parent link.
    /// `Some` only for subcontractors with a recorded parent.
    pub fn billed_parent(&self) -> Option<&CompanyRef> {
        match self {
            CompanyNode::MainContractor(_) => None,
            CompanyNode::Subcontractor { parent, .. } => parent.as_ref(),
        }
    }

    pub fn is_main_contractor(&self) -> bool {
        matches!(self, CompanyNode::MainContractor(_))
    }
}

/// Read-only lookup over a set of loaded companies.
///
/// Built per request from the company rows relevant to that request; there
/// is no shared mutable process state.
#[derive(Debug, Default)]
pub struct CompanyGraph {
    nodes: HashMap<DbId, CompanyNode>,
}

impl CompanyGraph {
    pub fn from_nodes(nodes: impl IntoIterator<Item = CompanyNode>) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|n| (n.company().id, n))
                .collect(),
        }
    }

    pub fn get(&self, id: DbId) -> Option<&CompanyNode> {
        self.nodes.get(&id)
    }

    /// All main contractors in the graph, in unspecified order.
    pub fn main_contractors(&self) -> impl Iterator<Item = &CompanyRef> {
        self.nodes.values().filter_map(|n| match n {
            CompanyNode::MainContractor(c) => Some(c),
            CompanyNode::Subcontractor { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn company(id: DbId, name: &str, price: f64) -> CompanyRef {
        CompanyRef {
            id,
            external_id: Uuid::from_u128(id as u128),
            name: name.to_string(),
            price_per_sqm: price,
        }
    }

    pub fn main(id: DbId, name: &str, price: f64) -> CompanyNode {
        CompanyNode::MainContractor(company(id, name, price))
    }

    pub fn sub(id: DbId, name: &str, parent: Option<CompanyRef>) -> CompanyNode {
        CompanyNode::Subcontractor {
            company: company(id, name, 0.0),
            parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{company, main, sub};
    use super::*;

    #[test]
    fn graph_lookup_by_id() {
        let graph = CompanyGraph::from_nodes([main(1, "Acme", 12.5)]);
        assert_eq!(graph.get(1).unwrap().company().name, "Acme");
        assert!(graph.get(2).is_none());
    }

    #[test]
    fn billed_parent_only_for_linked_subcontractors() {
        let m = company(1, "Acme", 12.5);
        let linked = sub(2, "Crew", Some(m.clone()));
        let orphan = sub(3, "Loose Crew", None);
        let top = main(1, "Acme", 12.5);

        assert_eq!(linked.billed_parent().unwrap().id, 1);
        assert!(orphan.billed_parent().is_none());
        assert!(top.billed_parent().is_none());
    }

    #[test]
    fn main_contractors_excludes_subs() {
        let graph = CompanyGraph::from_nodes([
            main(1, "Acme", 12.5),
            main(2, "Beton AG", 9.0),
            sub(3, "Crew", None),
        ]);
        let mut ids: Vec<DbId> = graph.main_contractors().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }
}
