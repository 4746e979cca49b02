use crate::common::StationId;
use crate::counter::InstanceRegistry;
use crate::journal::{TrafficEvent, TrafficLog};
use itertools::Itertools;
use tracing::debug;

pub struct Station {
    id: StationId,
    name: String,
    present: Vec<String>,
}

impl Station {
    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Train numbers currently at this station, in arrival order.
    pub fn present(&self) -> &[String] {
        &self.present
    }

    pub fn arrival(&mut self, number: &str) {
        self.present.push(number.to_string());
    }

    pub fn departure(&mut self, number: &str) {
        if let Some((pos, ..)) = self.present.iter().find_position(|x| *x == number) {
            self.present.remove(pos);
        }
    }
}

/// Owner of every station, indexed by `StationId`.
#[derive(Default)]
pub struct StationMap {
    stations: Vec<Station>,
}

impl StationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str, counters: &mut InstanceRegistry) -> StationId {
        let id = self.stations.len();
        self.stations.push(Station {
            id,
            name: name.to_string(),
            present: Vec::new(),
        });
        counters.register::<Station>();
        debug!(id, name, "station created");
        id
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    // Notification helpers keep the station mutation and the journal entry
    // adjacent, so journal order matches notification order.
    pub(crate) fn departure(&mut self, id: StationId, number: &str, log: &mut TrafficLog) {
        let station = self.stations.get_mut(id).expect("station not found");
        station.departure(number);
        log.push(TrafficEvent::departed(id, number));
    }

    pub(crate) fn arrival(&mut self, id: StationId, number: &str, log: &mut TrafficLog) {
        let station = self.stations.get_mut(id).expect("station not found");
        station.arrival(number);
        log.push(TrafficEvent::arrived(id, number));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_and_departure_track_presence() {
        let mut counters = InstanceRegistry::new();
        let mut map = StationMap::new();
        let id = map.create("Riverside", &mut counters);

        let station = map.get_mut(id).unwrap();
        station.arrival("ABC-11");
        station.arrival("XYZ-22");
        assert_eq!(station.present(), ["ABC-11", "XYZ-22"]);

        station.departure("ABC-11");
        assert_eq!(station.present(), ["XYZ-22"]);

        // departing a train that is not present changes nothing
        station.departure("ABC-11");
        assert_eq!(station.present(), ["XYZ-22"]);
    }

    #[test]
    fn creation_registers_station_kind() {
        let mut counters = InstanceRegistry::new();
        let mut map = StationMap::new();
        map.create("North", &mut counters);
        map.create("South", &mut counters);
        assert_eq!(counters.instances::<Station>(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1).unwrap().name(), "South");
    }

    #[test]
    fn notification_helpers_journal_in_order() {
        let mut counters = InstanceRegistry::new();
        let mut map = StationMap::new();
        let a = map.create("A", &mut counters);
        let b = map.create("B", &mut counters);

        let mut log = TrafficLog::new();
        map.get_mut(a).unwrap().arrival("QRS-77");
        map.departure(a, "QRS-77", &mut log);
        map.arrival(b, "QRS-77", &mut log);

        let events: Vec<TrafficEvent> = log.drain().collect();
        assert_eq!(events, [TrafficEvent::departed(a, "QRS-77"), TrafficEvent::arrived(b, "QRS-77")]);
        assert!(map.get(a).unwrap().present().is_empty());
        assert_eq!(map.get(b).unwrap().present(), ["QRS-77"]);
    }
}
