//! # Select Queries
//!
//! A [`Query`] is the filter / order / limit triple of a `select`. Predicates and
//! sort keys are plain closures, so a query can express anything the row type can
//! answer about itself (including `IN (...)` style membership tests).

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Filter, ordering and limit applied by a table to its rows.
///
/// ```rust
/// use table_actor::Query;
///
/// let query = Query::<(u32, &str)>::all()
///     .filter(|row| row.0 > 1)
///     .order_by_desc(|row| row.0)
///     .limit(2);
///
/// let rows = [(1, "a"), (2, "b"), (3, "c"), (4, "d")];
/// let picked = query.apply(rows.iter());
/// assert_eq!(picked, vec![(4, "d"), (3, "c")]);
/// ```
pub struct Query<T> {
    filters: Vec<Predicate<T>>,
    order: Option<Comparator<T>>,
    limit: Option<usize>,
}

impl<T: 'static> Query<T> {
    /// Matches every row, in id order.
    pub fn all() -> Self {
        Self {
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Adds a predicate. Rows must satisfy every predicate.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filters.push(Arc::new(predicate));
        self
    }

    /// Sorts ascending by `key`. Replaces any previous ordering.
    pub fn order_by<K: Ord>(mut self, key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.order = Some(Arc::new(move |a: &T, b: &T| key(a).cmp(&key(b))));
        self
    }

    /// Sorts descending by `key`. Replaces any previous ordering.
    pub fn order_by_desc<K: Ord>(mut self, key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.order = Some(Arc::new(move |a: &T, b: &T| key(b).cmp(&key(a))));
        self
    }

    /// Keeps at most `n` rows after ordering.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn matches(&self, row: &T) -> bool {
        self.filters.iter().all(|predicate| predicate(row))
    }

    /// Runs the query over `rows`, cloning the matches.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<T>
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        let mut picked: Vec<T> = rows.into_iter().filter(|row| self.matches(row)).cloned().collect();
        if let Some(order) = &self.order {
            // stable sort: ties keep id order
            picked.sort_by(|a, b| order(a, b));
        }
        if let Some(limit) = self.limit {
            picked.truncate(limit);
        }
        picked
    }
}

impl<T: 'static> Default for Query<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            order: self.order.clone(),
            limit: self.limit,
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filters", &self.filters.len())
            .field("ordered", &self.order.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}
