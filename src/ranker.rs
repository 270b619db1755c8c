//! Ranks catalog melodies by their edit distance to a query contour.

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::RankerConfig;
use crate::contour::Contour;
use crate::distance::edit_distance;

/// A catalog melody and its distance to the query. Lower is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub id: String,
    pub distance: usize,
}

/// Scores query contours against a catalog.
pub struct Ranker {
    catalog: Catalog,
    config: RankerConfig,
}

impl Ranker {
    pub fn new(catalog: Catalog, config: RankerConfig) -> Self {
        Ranker { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Returns the best matches for `query`, ascending by distance.
    ///
    /// Equal distances keep catalog order. At most `top_k` matches are
    /// returned, or all of them if `top_k` is `None`. An empty catalog
    /// yields no matches.
    pub fn rank(&self, query: &Contour) -> Vec<MatchResult> {
        let query_steps = if self.config.ignore_sentinel {
            query.without_sentinel()
        } else {
            query.steps()
        };

        // Indexed parallel iterators collect in catalog order.
        let mut matches: Vec<MatchResult> = self
            .catalog
            .entries()
            .par_iter()
            .map(|entry| MatchResult {
                id: entry.id.clone(),
                distance: edit_distance(query_steps, entry.contour.steps()),
            })
            .collect();

        matches.sort_by_key(|m| m.distance);
        if let Some(top_k) = self.config.top_k {
            matches.truncate(top_k);
        }
        matches
    }
}
