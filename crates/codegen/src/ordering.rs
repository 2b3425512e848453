//! # Dependency Ordering
//!
//! Orders tables so that every table referenced by a foreign key is created
//! before the tables referencing it. Migration file names are derived from
//! this order, so it also decides the order the framework runs them in.
//!
//! The sort is Kahn's algorithm over the foreign-key graph. Among tables whose
//! dependencies are all satisfied, the one earliest in diagram order goes
//! first, which keeps unrelated tables in diagram order.

use schemaforge_core::{EngineError, EngineResult};
use schemaforge_ir::{Association, Table};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Compute the dependency order of `tables`.
///
/// Returns indices into `tables`. Self-references are ignored and repeated
/// edges between the same pair of tables count once. Associations naming an
/// unknown table are skipped.
///
/// # Errors
///
/// [`EngineError::DependencyCycle`] naming every table that could not be
/// ordered, in diagram order.
pub fn dependency_order(tables: &[Table], associations: &[Association]) -> EngineResult<Vec<usize>> {
    let n = tables.len();
    let id_to_idx: HashMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    // Edge: referenced -> referencing
    let mut edges: HashSet<(usize, usize)> = HashSet::new();
    let mut adj: Vec<Vec<usize>> = vec![vec![]; n];
    let mut in_degree = vec![0usize; n];

    for assoc in associations {
        let (Some(&from), Some(&to)) = (
            id_to_idx.get(assoc.referenced_table.as_str()),
            id_to_idx.get(assoc.referencing_table.as_str()),
        ) else {
            continue;
        };
        if from == to || !edges.insert((from, to)) {
            continue;
        }
        adj[from].push(to);
        in_degree[to] += 1;
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut sorted: Vec<usize> = Vec::with_capacity(n);

    while let Some(node) = ready.pop_first() {
        sorted.push(node);
        for &next in &adj[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.insert(next);
            }
        }
    }

    if sorted.len() < n {
        let placed: HashSet<usize> = sorted.iter().copied().collect();
        let tables: Vec<String> = (0..n)
            .filter(|i| !placed.contains(i))
            .map(|i| tables[i].name.clone())
            .collect();
        return Err(EngineError::DependencyCycle { tables });
    }

    tracing::trace!(order = ?sorted, "dependency order computed");
    Ok(sorted)
}
