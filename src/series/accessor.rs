use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::model::{CaseData, CaseDataKey, MetricKey, SeverityMetrics};

/// Source of named arrays addressable by key.
pub trait KeyedSeries<K> {
    type Value: Clone;

    fn lookup(&self, key: K) -> &[Self::Value];
}

impl KeyedSeries<MetricKey> for SeverityMetrics {
    type Value = f64;

    fn lookup(&self, key: MetricKey) -> &[f64] {
        self.series(key)
    }
}

impl KeyedSeries<CaseDataKey> for CaseData {
    type Value = Option<f64>;

    fn lookup(&self, key: CaseDataKey) -> &[Option<f64>] {
        self.series(key)
    }
}

pub type SeriesFn<S, V> = Arc<dyn Fn(&S) -> Vec<V> + Send + Sync>;

/// How a chart line obtains its values: a direct field or a derived formula.
pub enum Accessor<K, S, V> {
    ByKey(K),
    ByFunction(SeriesFn<S, V>),
}

pub type MetricsAccessor = Accessor<MetricKey, SeverityMetrics, f64>;
pub type CaseDataAccessor = Accessor<CaseDataKey, CaseData, Option<f64>>;

impl<K, S, V> Accessor<K, S, V> {
    pub fn by_function<F>(f: F) -> Self
    where
        F: Fn(&S) -> Vec<V> + Send + Sync + 'static,
    {
        Self::ByFunction(Arc::new(f))
    }
}

impl<K, S, V> Accessor<K, S, V>
where
    K: Copy,
    V: Clone,
    S: KeyedSeries<K, Value = V>,
{
    /// Borrowed for keyed lookups, owned for computed series.
    pub fn resolve<'a>(&self, source: &'a S) -> Cow<'a, [V]> {
        match self {
            Accessor::ByKey(key) => Cow::Borrowed(source.lookup(*key)),
            Accessor::ByFunction(f) => Cow::Owned(f(source)),
        }
    }
}

impl<K: Copy, S, V> Clone for Accessor<K, S, V> {
    fn clone(&self) -> Self {
        match self {
            Accessor::ByKey(key) => Accessor::ByKey(*key),
            Accessor::ByFunction(f) => Accessor::ByFunction(Arc::clone(f)),
        }
    }
}

impl<K: fmt::Debug, S, V> fmt::Debug for Accessor<K, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::ByKey(key) => f.debug_tuple("ByKey").field(key).finish(),
            Accessor::ByFunction(_) => f.write_str("ByFunction(..)"),
        }
    }
}

impl From<MetricKey> for MetricsAccessor {
    fn from(key: MetricKey) -> Self {
        Accessor::ByKey(key)
    }
}

impl From<CaseDataKey> for CaseDataAccessor {
    fn from(key: CaseDataKey) -> Self {
        Accessor::ByKey(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_lookup_borrows_and_functions_compute() {
        let metrics = SeverityMetrics {
            critical: vec![2.0, 4.0],
            ..SeverityMetrics::default()
        };
        let keyed: MetricsAccessor = MetricKey::Critical.into();
        let resolved = keyed.resolve(&metrics);
        assert!(matches!(resolved, Cow::Borrowed(_)));
        assert_eq!(resolved.as_ref(), &[2.0, 4.0]);

        let halved = MetricsAccessor::by_function(|m: &SeverityMetrics| {
            m.critical.iter().map(|value| value / 2.0).collect()
        });
        assert_eq!(halved.resolve(&metrics).as_ref(), &[1.0, 2.0]);
        assert_eq!(format!("{halved:?}"), "ByFunction(..)");
    }
}
