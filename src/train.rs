use crate::common::{Heading, RouteId, StationId, TrainKind, WagonId};
use crate::counter::InstanceRegistry;
use crate::journal::TrafficLog;
use crate::route::Route;
use crate::station::StationMap;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("train number must not be empty")]
    EmptyNumber,
    #[error("malformed train number: {number:?}")]
    MalformedNumber { number: String },
    #[error("train number already in service: {number}")]
    NumberInService { number: String },
}

/// Outcome of a coupling operation. Refusals are reported, never raised:
/// a refused coupling leaves the wagon list untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CouplingOutcome {
    Done,
    TrainMoving,
    KindMismatch,
    NotCoupled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Wagon {
    id: WagonId,
    kind: TrainKind,
}

impl Wagon {
    pub fn new(id: WagonId, kind: TrainKind) -> Self {
        Wagon { id, kind }
    }

    pub fn id(&self) -> WagonId {
        self.id
    }

    pub fn kind(&self) -> TrainKind {
        self.kind
    }
}

// Three word characters, one arbitrary character, two word characters.
fn number_is_valid(number: &str) -> bool {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() != 6 {
        return false;
    }
    let word = |c: &char| c.is_ascii_alphanumeric() || *c == '_';
    chars[..3].iter().all(word) && chars[4..].iter().all(word)
}

/// A fresh number in the valid format, e.g. "QTB-47".
pub(crate) fn random_number() -> String {
    let letter = || (b'A' + rand::random_range(0..26u8)) as char;
    format!(
        "{}{}{}-{}{}",
        letter(),
        letter(),
        letter(),
        rand::random_range(0..10u8),
        rand::random_range(0..10u8),
    )
}

#[derive(Debug)]
pub struct Train {
    number: String,
    kind: TrainKind,
    current_speed: f64,
    wagons: Vec<Wagon>,
    route: Option<RouteId>,
    current_station: Option<StationId>,
}

impl Train {
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn kind(&self) -> TrainKind {
        self.kind
    }

    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn route(&self) -> Option<RouteId> {
        self.route
    }

    pub fn current_station(&self) -> Option<StationId> {
        self.current_station
    }

    /// Adds `delta` to the current speed, saturating at zero.
    pub fn speed_up(&mut self, delta: f64) {
        self.current_speed = (self.current_speed + delta).max(0.0);
    }

    pub fn stop(&mut self) {
        self.current_speed = 0.0;
    }

    /// Couples a wagon to the tail of the train. Only a standing train takes
    /// wagons, and only wagons of its own kind.
    pub fn add_wagon(&mut self, wagon: Wagon) -> CouplingOutcome {
        if self.current_speed != 0.0 {
            debug!(number = %self.number, wagon = wagon.id, "coupling refused, train is moving");
            return CouplingOutcome::TrainMoving;
        }
        if wagon.kind != self.kind {
            debug!(number = %self.number, wagon = wagon.id, "coupling refused, wagon kind mismatch");
            return CouplingOutcome::KindMismatch;
        }
        self.wagons.push(wagon);
        CouplingOutcome::Done
    }

    /// Uncouples the first wagon with the given id, under the same gates as
    /// `add_wagon`.
    pub fn remove_wagon(&mut self, wagon_id: WagonId) -> CouplingOutcome {
        if self.current_speed != 0.0 {
            debug!(number = %self.number, wagon = wagon_id, "uncoupling refused, train is moving");
            return CouplingOutcome::TrainMoving;
        }
        let Some(pos) = self.wagons.iter().position(|w| w.id == wagon_id) else {
            return CouplingOutcome::NotCoupled;
        };
        if self.wagons[pos].kind != self.kind {
            return CouplingOutcome::KindMismatch;
        }
        self.wagons.remove(pos);
        CouplingOutcome::Done
    }

    /// Coupled wagons in coupling order.
    pub fn wagons(&self) -> &[Wagon] {
        &self.wagons
    }

    /// Assigns a route, placing the train at its first station and
    /// registering the train into the route's train list. Re-assignment from
    /// an already assigned state is allowed.
    pub fn assign_route(&mut self, route: &mut Route) {
        self.route = Some(route.id());
        self.current_station = Some(route.stations()[0]);
        route.add_train(&self.number);
        debug!(number = %self.number, route = route.id(), "route assigned");
    }

    fn position(&self, route: &Route) -> Option<usize> {
        let current = self.current_station?;
        debug_assert_eq!(self.route, Some(route.id()));
        route.stations().iter().position(|&s| s == current)
    }

    /// Station immediately before the current one, `None` at the head of the
    /// route or when no route is assigned.
    pub fn previous_station(&self, route: &Route) -> Option<StationId> {
        let pos = self.position(route)?;
        if pos == 0 {
            return None;
        }
        Some(route.stations()[pos - 1])
    }

    /// Station immediately after the current one, `None` at the tail of the
    /// route or when no route is assigned.
    pub fn next_station(&self, route: &Route) -> Option<StationId> {
        let pos = self.position(route)?;
        route.stations().get(pos + 1).copied()
    }

    /// One station toward the end of the route. `None` at the boundary: no
    /// movement, no notifications.
    pub fn go_forward(&mut self, route: &Route, stations: &mut StationMap, log: &mut TrafficLog) -> Option<StationId> {
        self.step(Heading::Forward, route, stations, log)
    }

    /// One station toward the head of the route, symmetric to `go_forward`.
    pub fn go_back(&mut self, route: &Route, stations: &mut StationMap, log: &mut TrafficLog) -> Option<StationId> {
        self.step(Heading::Back, route, stations, log)
    }

    // Departure is always notified before arrival on the destination.
    fn step(&mut self, heading: Heading, route: &Route, stations: &mut StationMap, log: &mut TrafficLog) -> Option<StationId> {
        let target = match heading {
            Heading::Forward => self.next_station(route)?,
            Heading::Back => self.previous_station(route)?,
        };
        let current = self.current_station.expect("a computed neighbor implies a current station");
        stations.departure(current, &self.number, log);
        self.current_station = Some(target);
        stations.arrival(target, &self.number, log);
        debug!(number = %self.number, from = current, to = target, ?heading, "train moved");
        Some(target)
    }
}

/// Owned number-to-train lookup. Creation is the only validated entry point;
/// a failed creation registers nothing anywhere.
#[derive(Default)]
pub struct TrainRegistry {
    trains: HashMap<String, Train>,
}

impl TrainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        number: &str,
        kind: TrainKind,
        counters: &mut InstanceRegistry,
    ) -> Result<&mut Train, ValidationError> {
        if number.is_empty() {
            return Err(ValidationError::EmptyNumber);
        }
        if !number_is_valid(number) {
            return Err(ValidationError::MalformedNumber {
                number: number.to_string(),
            });
        }
        if self.trains.contains_key(number) {
            return Err(ValidationError::NumberInService {
                number: number.to_string(),
            });
        }

        counters.register::<Train>();
        debug!(number, ?kind, "train created");
        Ok(self.trains.entry(number.to_string()).or_insert(Train {
            number: number.to_string(),
            kind,
            current_speed: 0.0,
            wagons: Vec::new(),
            route: None,
            current_station: None,
        }))
    }

    pub fn find(&self, number: &str) -> Option<&Train> {
        self.trains.get(number)
    }

    pub fn find_mut(&mut self, number: &str) -> Option<&mut Train> {
        self.trains.get_mut(number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}
