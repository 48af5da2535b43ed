//! Queries and their ranked results, built from `QUERY` blocks.

/// Index of a [`Query`] within its page's query arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryIndex(pub u32);

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub text: String,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Query {
    pub id: String,
    pub text: String,
    pub alias: Option<String>,
    pub results: Vec<QueryResult>,
}

impl Query {
    /// Stable descending sort by confidence; ties keep input order.
    /// Missing confidence sorts as though it were zero.
    pub fn ranked_results(&self) -> Vec<&QueryResult> {
        let mut ranked: Vec<&QueryResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            let ca = a.confidence.unwrap_or(0.0);
            let cb = b.confidence.unwrap_or(0.0);
            cb.partial_cmp(&ca).unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Highest-confidence result, earlier wins on ties. `None` if there are
    /// no results.
    pub fn top_result(&self) -> Option<&QueryResult> {
        self.ranked_results().into_iter().next()
    }
}
