//! Toy rail depot: trains with speed and a cargo/passenger classification,
//! wagons of the matching kind, and manual single-step traversal along
//! station routes. No simulation loop; every movement is one explicit call.

mod common;
mod counter;
mod depot;
mod journal;
mod layout;
mod route;
mod station;
mod train;

pub use common::{Heading, RouteId, StationId, TrainKind, WagonId};
pub use counter::InstanceRegistry;
pub use depot::Depot;
pub use journal::{TrafficEvent, TrafficLog, TrafficState};
pub use layout::{Layout, LayoutError};
pub use route::{Route, RouteMap};
pub use station::{Station, StationMap};
pub use train::{CouplingOutcome, Train, TrainRegistry, ValidationError, Wagon};
