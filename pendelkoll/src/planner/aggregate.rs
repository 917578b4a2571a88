//! Folding raw announcements into one stop per train and station.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::domain::{RawAnnouncement, StationCode, Stop, TrainId};
use crate::stations::StationDirectory;

/// Stops for one train in the order their stations were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TrainStops {
    stops: Vec<Stop>,
    index: HashMap<StationCode, usize>,
}

impl TrainStops {
    fn upsert(&mut self, stop: Stop, overwrite: bool) {
        match self.index.get(&stop.station) {
            Some(&i) if overwrite => self.stops[i] = stop,
            Some(_) => {}
            None => {
                self.index.insert(stop.station.clone(), self.stops.len());
                self.stops.push(stop);
            }
        }
    }
}

/// Aggregated stops per train, keyed by train id.
pub type AggregatedStops = BTreeMap<TrainId, Vec<Stop>>;

/// Accumulator for [`aggregate`].
///
/// Rules, applied per `(train, station)` pair:
///
/// - The first record creates the stop.
/// - A departure record always replaces it.
/// - Arrival and unspecified records never replace an existing stop.
/// - Records without a train id or station are skipped.
#[derive(Debug, Clone)]
pub struct StopAggregator<'a> {
    directory: &'a StationDirectory,
    trains: BTreeMap<TrainId, TrainStops>,
}

impl<'a> StopAggregator<'a> {
    /// Start an empty fold.
    pub fn new(directory: &'a StationDirectory) -> Self {
        Self {
            directory,
            trains: BTreeMap::new(),
        }
    }

    /// Fold one record in.
    pub fn absorb(mut self, record: &RawAnnouncement) -> Self {
        let Some((train, station)) = record.key() else {
            trace!(scheduled = %record.scheduled, "skipping unattributable record");
            return self;
        };

        let stop = Stop::from_announcement(record, station.clone(), self.directory.name(station));
        self.trains
            .entry(train.clone())
            .or_default()
            .upsert(stop, record.activity.is_departure());
        self
    }

    /// Number of distinct trains seen so far.
    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    /// Finish the fold.
    pub fn finish(self) -> AggregatedStops {
        self.trains
            .into_iter()
            .map(|(id, train)| (id, train.stops))
            .collect()
    }
}

/// Aggregate a batch of announcements.
///
/// # Examples
///
/// ```
/// use pendelkoll::domain::{ActivityType, AnnouncementTime, RawAnnouncement, StationCode, TrainId};
/// use pendelkoll::planner::aggregate;
/// use pendelkoll::stations::StationDirectory;
///
/// let at = |s: &str| AnnouncementTime::parse(&format!("2024-03-15T{s}:00+01:00")).unwrap();
/// let mut arrival = RawAnnouncement::new(
///     TrainId::new("1043").unwrap(),
///     StationCode::parse("Em").unwrap(),
///     at("08:30"),
/// );
/// arrival.activity = ActivityType::Arrival;
/// let mut departure = arrival.clone();
/// departure.activity = ActivityType::Departure;
/// departure.scheduled = at("08:32");
///
/// let stops = aggregate(&[departure, arrival], &StationDirectory::smaland());
/// let stop = &stops[&TrainId::new("1043").unwrap()][0];
/// assert_eq!(stop.scheduled, at("08:32"));
/// assert_eq!(stop.station_name, "Emmaboda");
/// ```
pub fn aggregate(records: &[RawAnnouncement], directory: &StationDirectory) -> AggregatedStops {
    records
        .iter()
        .fold(StopAggregator::new(directory), StopAggregator::absorb)
        .finish()
}
