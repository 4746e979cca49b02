use crate::common::{Heading, RouteId, StationId, TrainKind};
use crate::counter::InstanceRegistry;
use crate::journal::{TrafficEvent, TrafficLog};
use crate::layout::{Layout, LayoutError};
use crate::route::{Route, RouteMap};
use crate::station::{Station, StationMap};
use crate::train::{Train, TrainRegistry, ValidationError, random_number};
use std::collections::HashMap;
use tracing::{info, warn};

/// The wiring layer: owns the instance counters, the station and route maps,
/// the train lookup, and the traffic journal, and runs the cross-entity
/// operations (assignment, movement, spawning).
#[derive(Default)]
pub struct Depot {
    counters: InstanceRegistry,
    stations: StationMap,
    routes: RouteMap,
    trains: TrainRegistry,
    traffic: TrafficLog,
}

impl Depot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_station(&mut self, name: &str) -> StationId {
        self.stations.create(name, &mut self.counters)
    }

    pub fn add_route(&mut self, first: StationId, last: StationId) -> RouteId {
        self.stations.get(first).expect("station not found");
        self.stations.get(last).expect("station not found");
        self.routes.create(first, last, &mut self.counters)
    }

    pub fn extend_route(&mut self, route: RouteId, station: StationId) {
        self.stations.get(station).expect("station not found");
        self.routes.get_mut(route).expect("route not found").add_stop(station);
    }

    pub fn create_train(&mut self, number: &str, kind: TrainKind) -> Result<(), ValidationError> {
        self.trains.create(number, kind, &mut self.counters).map(|_| ())
    }

    /// Creates a train under a fresh random number and returns the number.
    pub fn spawn_train(&mut self, kind: TrainKind) -> String {
        let number = loop {
            let candidate = random_number();
            if self.trains.find(&candidate).is_none() {
                break candidate;
            }
        };
        self.trains
            .create(&number, kind, &mut self.counters)
            .expect("generated number is valid and unused");
        info!(%number, ?kind, "train spawned");
        number
    }

    pub fn train(&self, number: &str) -> Option<&Train> {
        self.trains.find(number)
    }

    pub fn train_mut(&mut self, number: &str) -> Option<&mut Train> {
        self.trains.find_mut(number)
    }

    pub fn trains(&self) -> &TrainRegistry {
        &self.trains
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn instances<K: 'static>(&self) -> u64 {
        self.counters.instances::<K>()
    }

    /// Places the train at the head of the route. False for an unknown train
    /// or route.
    pub fn assign_route(&mut self, number: &str, route: RouteId) -> bool {
        let Some(train) = self.trains.find_mut(number) else {
            warn!(number, "cannot assign route, unknown train");
            return false;
        };
        let Some(route) = self.routes.get_mut(route) else {
            warn!(number, route, "cannot assign route, unknown route");
            return false;
        };
        train.assign_route(route);
        true
    }

    /// Moves the train one station toward the end of its route. `None` for
    /// an unknown or unassigned train, or at the route boundary.
    pub fn go_forward(&mut self, number: &str) -> Option<StationId> {
        self.step(number, Heading::Forward)
    }

    /// Moves the train one station toward the head of its route.
    pub fn go_back(&mut self, number: &str) -> Option<StationId> {
        self.step(number, Heading::Back)
    }

    fn step(&mut self, number: &str, heading: Heading) -> Option<StationId> {
        let train = self.trains.find_mut(number)?;
        let route = self.routes.get(train.route()?).expect("assigned route exists");
        match heading {
            Heading::Forward => train.go_forward(route, &mut self.stations, &mut self.traffic),
            Heading::Back => train.go_back(route, &mut self.stations, &mut self.traffic),
        }
    }

    /// Consumes the journal of departure/arrival notifications accumulated
    /// since the last drain.
    pub fn drain_traffic(&mut self) -> Vec<TrafficEvent> {
        self.traffic.drain().collect()
    }

    pub fn from_toml(contents: &str) -> Result<Depot, LayoutError> {
        Self::from_layout(Layout::from_toml(contents)?)
    }

    pub fn from_layout(layout: Layout) -> Result<Depot, LayoutError> {
        let mut depot = Depot::new();

        let mut by_name: HashMap<String, StationId> = HashMap::new();
        for station in &layout.stations {
            let id = depot.add_station(&station.name);
            by_name.insert(station.name.clone(), id);
        }

        for route in &layout.routes {
            if route.stations.len() < 2 {
                return Err(LayoutError::ShortRoute {
                    count: route.stations.len(),
                });
            }
            let ids = route
                .stations
                .iter()
                .map(|name| {
                    by_name.get(name).copied().ok_or_else(|| LayoutError::UnknownStation {
                        name: name.clone(),
                    })
                })
                .collect::<Result<Vec<StationId>, LayoutError>>()?;

            let route_id = depot.add_route(ids[0], *ids.last().expect("at least two stations"));
            for &stop in &ids[1..ids.len() - 1] {
                depot.extend_route(route_id, stop);
            }
        }

        for train in &layout.trains {
            depot.create_train(&train.number, train.kind)?;
            if let Some(route) = train.route {
                if depot.routes.get(route).is_none() {
                    return Err(LayoutError::UnknownRoute {
                        number: train.number.clone(),
                        route,
                    });
                }
                depot.assign_route(&train.number, route);
            }
        }

        Ok(depot)
    }
}
