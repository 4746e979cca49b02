use serde::Deserialize;

pub type StationId = usize;
pub type RouteId = usize;
pub type WagonId = u32;

#[derive(Deserialize, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrainKind {
    Cargo,
    Passenger,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Heading {
    Forward,
    Back,
}

impl Heading {
    pub fn reverse(&self) -> Heading {
        match self {
            Heading::Forward => Heading::Back,
            Heading::Back => Heading::Forward,
        }
    }
}
