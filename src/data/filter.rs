use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Filter predicate: an inclusive year window
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` year window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive inverted.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Restrict this range to lie inside `bounds`.
    pub fn clamp_to(self, bounds: YearRange) -> Self {
        YearRange::new(
            self.min.clamp(bounds.min, bounds.max),
            self.max.clamp(bounds.min, bounds.max),
        )
    }
}

/// Smallest range covering every year present in the table, or `None` when
/// no record carries a year.
pub fn observed_years(table: &Table) -> Option<YearRange> {
    let mut years = table.records.iter().filter_map(|r| r.year);
    let first = years.next()?;
    let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Some(YearRange { min, max })
}

/// Return indices of records whose year falls inside `range`, in table order.
/// Records without a year never pass.
pub fn filtered_indices(table: &Table, range: YearRange) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.year.is_some_and(|y| range.contains(y)))
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the records selected by `indices`.
pub fn select<'a>(table: &'a Table, indices: &'a [usize]) -> impl Iterator<Item = &'a Record> + Clone {
    indices.iter().map(move |&i| &table.records[i])
}
