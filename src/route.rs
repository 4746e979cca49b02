use crate::common::{RouteId, StationId};
use crate::counter::InstanceRegistry;
use itertools::Itertools;
use tracing::debug;

/// An ordered station sequence plus the trains currently assigned to it.
/// Built from a first and a last station, so a route is never shorter than
/// two stops and always has a station 0 to place an arriving train on.
pub struct Route {
    id: RouteId,
    stations: Vec<StationId>,
    trains: Vec<String>,
}

impl Route {
    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn trains(&self) -> &[String] {
        &self.trains
    }

    /// Inserts an intermediate stop immediately before the terminal station.
    pub fn add_stop(&mut self, station: StationId) {
        let last = self.stations.len() - 1;
        self.stations.insert(last, station);
    }

    pub fn add_train(&mut self, number: &str) {
        self.trains.push(number.to_string());
    }

    pub fn remove_train(&mut self, number: &str) {
        if let Some((pos, ..)) = self.trains.iter().find_position(|x| *x == number) {
            self.trains.remove(pos);
        }
    }
}

/// Owner of every route, indexed by `RouteId`.
#[derive(Default)]
pub struct RouteMap {
    routes: Vec<Route>,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, first: StationId, last: StationId, counters: &mut InstanceRegistry) -> RouteId {
        let id = self.routes.len();
        self.routes.push(Route {
            id,
            stations: vec![first, last],
            trains: Vec::new(),
        });
        counters.register::<Route>();
        debug!(id, first, last, "route created");
        id
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn get_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.routes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_are_inserted_before_the_terminal() {
        let mut counters = InstanceRegistry::new();
        let mut routes = RouteMap::new();
        let id = routes.create(0, 9, &mut counters);

        let route = routes.get_mut(id).unwrap();
        route.add_stop(4);
        route.add_stop(7);
        assert_eq!(route.stations(), [0, 4, 7, 9]);
    }

    #[test]
    fn train_membership_add_and_remove() {
        let mut counters = InstanceRegistry::new();
        let mut routes = RouteMap::new();
        let id = routes.create(0, 1, &mut counters);

        let route = routes.get_mut(id).unwrap();
        route.add_train("ABC-11");
        route.add_train("XYZ-22");
        route.remove_train("ABC-11");
        assert_eq!(route.trains(), ["XYZ-22"]);

        // removing an absent number changes nothing
        route.remove_train("ABC-11");
        assert_eq!(route.trains(), ["XYZ-22"]);
    }

    #[test]
    fn creation_registers_route_kind() {
        let mut counters = InstanceRegistry::new();
        let mut routes = RouteMap::new();
        routes.create(0, 1, &mut counters);
        routes.create(1, 2, &mut counters);
        assert_eq!(counters.instances::<Route>(), 2);
    }
}
