//! Ordered collections of stops.

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::ops::Index;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::{CSV_HEADERS, FIELD_NAMES};
use super::stop::Stop;

/// Criteria for [`StopList::filter`].
///
/// Each criterion is a set of accepted values for one field. Criteria that
/// are not set accept everything; the ones that are set must all match.
///
/// # Examples
///
/// ```
/// use naptan::domain::StopFilter;
///
/// let filter = StopFilter::new()
///     .stop_types(["BCT", "BCS"])
///     .statuses(["active"]);
/// assert!(!filter.is_empty());
/// assert!(StopFilter::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopFilter {
    atco_codes: Option<HashSet<String>>,
    stop_types: Option<HashSet<String>>,
    statuses: Option<HashSet<String>>,
}

fn to_set<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

fn accepts(criterion: &Option<HashSet<String>>, value: &str) -> bool {
    criterion.as_ref().is_none_or(|set| set.contains(value))
}

impl StopFilter {
    /// A filter that keeps every stop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only stops with one of these ATCO codes.
    pub fn atco_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.atco_codes = Some(to_set(codes));
        self
    }

    /// Keep only stops of one of these stop types.
    pub fn stop_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_types = Some(to_set(types));
        self
    }

    /// Keep only stops with one of these statuses.
    pub fn statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = Some(to_set(statuses));
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.atco_codes.is_none() && self.stop_types.is_none() && self.statuses.is_none()
    }

    /// Whether a stop passes every criterion that is set.
    pub fn matches(&self, stop: &Stop) -> bool {
        accepts(&self.atco_codes, &stop.atco_code)
            && accepts(&self.stop_types, &stop.stop_type)
            && accepts(&self.statuses, &stop.status)
    }
}

fn shared_stop(stop: &Arc<Stop>) -> &Stop {
    stop
}

/// Row-oriented table of stops: one column per field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// An ordered list of stops, in source order.
///
/// Records are shared: filtering returns a new list pointing at the same
/// stops. Cloning a list is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopList {
    stops: Vec<Arc<Stop>>,
}

impl StopList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The stop at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index).map(shared_stop)
    }

    /// Iterate over the stops in order.
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter().map(shared_stop)
    }

    /// Iterate over the shared records.
    pub fn iter_shared(&self) -> impl Iterator<Item = &Arc<Stop>> {
        self.stops.iter()
    }

    /// Stops passing `filter`, in their original order.
    ///
    /// Returns an empty list when nothing matches.
    pub fn filter(&self, filter: &StopFilter) -> StopList {
        self.stops
            .iter()
            .filter(|stop| filter.matches(stop))
            .cloned()
            .collect()
    }

    /// Map from ATCO code to the stop's fields.
    ///
    /// When two stops share an ATCO code the later one wins.
    pub fn to_map(&self) -> BTreeMap<String, Map<String, Value>> {
        self.iter()
            .map(|stop| (stop.atco_code.clone(), stop.to_map()))
            .collect()
    }

    /// Row-oriented table with one row per stop.
    pub fn to_table(&self) -> StopTable {
        StopTable {
            columns: FIELD_NAMES.to_vec(),
            rows: self.iter().map(Stop::to_row).collect(),
        }
    }

    /// Write the list as CSV with the API's column headers.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(CSV_HEADERS)?;
        for stop in self.iter() {
            csv.write_record(stop.to_row())?;
        }
        csv.flush()?;
        Ok(())
    }
}

impl Index<usize> for StopList {
    type Output = Stop;

    fn index(&self, index: usize) -> &Stop {
        &self.stops[index]
    }
}

impl<'a> IntoIterator for &'a StopList {
    type Item = &'a Stop;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Arc<Stop>>, fn(&Arc<Stop>) -> &Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops
            .iter()
            .map(shared_stop as fn(&Arc<Stop>) -> &Stop)
    }
}

impl FromIterator<Arc<Stop>> for StopList {
    fn from_iter<T: IntoIterator<Item = Arc<Stop>>>(iter: T) -> Self {
        Self {
            stops: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Stop> for StopList {
    fn from_iter<T: IntoIterator<Item = Stop>>(iter: T) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl Serialize for StopList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
