use crate::common::TrainKind;
use crate::train::ValidationError;
use serde::Deserialize;

/// Declarative depot description, parsed from TOML. Routes reference
/// stations by name, trains reference routes by index.
#[derive(Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub stations: Vec<StationData>,
    #[serde(default)]
    pub routes: Vec<RouteData>,
    #[serde(default)]
    pub trains: Vec<TrainData>,
}

#[derive(Deserialize)]
pub struct StationData {
    pub name: String,
}

#[derive(Deserialize)]
pub struct RouteData {
    pub stations: Vec<String>,
}

#[derive(Deserialize)]
pub struct TrainData {
    pub number: String,
    pub kind: TrainKind,
    pub route: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("route references unknown station: {name}")]
    UnknownStation { name: String },
    #[error("route needs at least two stations, got {count}")]
    ShortRoute { count: usize },
    #[error("train {number} references unknown route {route}")]
    UnknownRoute { number: String, route: usize },
    #[error(transparent)]
    Train(#[from] ValidationError),
}

impl Layout {
    pub fn from_toml(contents: &str) -> Result<Layout, LayoutError> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_layout() {
        let layout = Layout::from_toml(
            r#"
            [[stations]]
            name = "North"

            [[stations]]
            name = "South"

            [[routes]]
            stations = ["North", "South"]

            [[trains]]
            number = "ABC-12"
            kind = "cargo"
            route = 0

            [[trains]]
            number = "XYZ-34"
            kind = "passenger"
            "#,
        )
        .unwrap();

        assert_eq!(layout.stations.len(), 2);
        assert_eq!(layout.routes[0].stations, ["North", "South"]);
        assert_eq!(layout.trains[0].kind, TrainKind::Cargo);
        assert_eq!(layout.trains[0].route, Some(0));
        assert_eq!(layout.trains[1].route, None);
    }

    #[test]
    fn sections_default_to_empty() {
        let layout = Layout::from_toml("").unwrap();
        assert!(layout.stations.is_empty());
        assert!(layout.routes.is_empty());
        assert!(layout.trains.is_empty());
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = Layout::from_toml(
            r#"
            [[trains]]
            number = "ABC-12"
            kind = "maglev"
            "#,
        );
        assert!(matches!(result, Err(LayoutError::Parse(_))));
    }
}
