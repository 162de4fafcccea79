use ordered_float::OrderedFloat;

use crate::series::{PreparedSeries, ValueView};

/// Min/max of every defined value in one group, for the active view.
///
/// Projected and actual values both count; capacity never does. Returns
/// `None` when the group has no finite value at all.
#[must_use]
pub fn group_extent(group: &[PreparedSeries], view: ValueView) -> Option<(f64, f64)> {
    let values = group.iter().flat_map(|series| {
        let actual = series.actual_view(view).unwrap_or(&[]);
        series
            .projected_view(view)
            .iter()
            .chain(actual)
            .filter_map(|datum| datum.defined_y())
            .map(OrderedFloat)
    });

    let (min, max) = values.fold(None, |bounds, value| match bounds {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })?;
    Some((min.into_inner(), max.into_inner()))
}

#[must_use]
pub fn group_extents(prepared: &[Vec<PreparedSeries>], view: ValueView) -> Vec<Option<(f64, f64)>> {
    prepared
        .iter()
        .map(|group| group_extent(group, view))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Datum;
    use crate::series::{ChartColor, ProjectedData};

    fn series(values: &[Option<f64>], capacity: Option<f64>) -> PreparedSeries {
        let data: Vec<Datum> = values
            .iter()
            .enumerate()
            .map(|(index, y)| Datum::new(index as i64, *y))
            .collect();
        PreparedSeries {
            title: "Test".to_owned(),
            color: ChartColor::Blue,
            projected_peak: None,
            projected: ProjectedData {
                values: data.clone(),
                cumulative: data,
                variance: None,
                incidence: None,
            },
            actual: None,
            capacity,
            y: 0.0,
        }
    }

    #[test]
    fn capacity_does_not_widen_extent() {
        let group = vec![series(&[Some(10.0), None, Some(100.0)], Some(150.0))];
        assert_eq!(group_extent(&group, ValueView::Daily), Some((10.0, 100.0)));
    }

    #[test]
    fn empty_group_has_no_extent() {
        let group = vec![series(&[None, Some(f64::NAN)], None)];
        assert_eq!(group_extent(&group, ValueView::Daily), None);
        assert_eq!(group_extents(&[Vec::new()], ValueView::Cumulative), vec![None]);
    }
}
