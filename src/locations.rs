// 📍 Locations & Routes - the static distance table
//
// Locations are a closed set of named pickup/drop-off points.
// A route is an UNORDERED pair: lookups work in either direction.

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// LOCATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "PUP Main")]
    PupMain,
    #[serde(rename = "CEA")]
    Cea,
    #[serde(rename = "Hasmin")]
    Hasmin,
    #[serde(rename = "iTech")]
    ITech,
    #[serde(rename = "COC")]
    Coc,
    #[serde(rename = "PUP LHS")]
    PupLhs,
    #[serde(rename = "Condotel")]
    Condotel,
}

impl Location {
    /// Every location, in menu order
    pub const ALL: [Location; 7] = [
        Location::PupMain,
        Location::Cea,
        Location::Hasmin,
        Location::ITech,
        Location::Coc,
        Location::PupLhs,
        Location::Condotel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::PupMain => "PUP Main",
            Location::Cea => "CEA",
            Location::Hasmin => "Hasmin",
            Location::ITech => "iTech",
            Location::Coc => "COC",
            Location::PupLhs => "PUP LHS",
            Location::Condotel => "Condotel",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for names typed on the command line or read from files
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown location: {0:?}")]
    UnknownLocation(String),

    #[error("unknown vehicle type: {0:?}")]
    UnknownVehicle(String),

    #[error("unknown payment method: {0:?}")]
    UnknownPayment(String),
}

impl FromStr for Location {
    type Err = ParseError;

    /// Case-insensitive match on the display name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Location::ALL
            .iter()
            .copied()
            .find(|loc| loc.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ParseError::UnknownLocation(s.to_string()))
    }
}

// ============================================================================
// ROUTE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub a: Location,
    pub b: Location,
    pub distance_km: f64,

    /// Illustrative map image under the assets directory
    #[serde(default)]
    pub image: Option<String>,
}

impl Route {
    pub fn new(a: Location, b: Location, distance_km: f64, image: Option<&str>) -> Self {
        Route {
            a,
            b,
            distance_km,
            image: image.map(str::to_string),
        }
    }

    /// True if this route joins the two locations, in either order
    pub fn connects(&self, x: Location, y: Location) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// A route joins two different places over a positive, finite distance
    pub fn validate(&self) -> Result<()> {
        if self.a == self.b {
            bail!("route from {} to itself", self.a);
        }
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            bail!(
                "route {} - {} has invalid distance {}",
                self.a,
                self.b,
                self.distance_km
            );
        }
        Ok(())
    }
}

/// Raised when a booking is requested between two distinct locations
/// that have no entry in the route table.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("route from {start} to {end} is not defined")]
pub struct RouteError {
    pub start: Location,
    pub end: Location,
}

// ============================================================================
// ROUTE TABLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The campus table the app ships with
    pub fn standard() -> Self {
        use Location::*;

        let routes = vec![
            Route::new(PupMain, Cea, 2.0, Some("pup_main_to_cea.png")),
            Route::new(PupMain, Hasmin, 1.5, Some("pup_main_to_hasmin.png")),
            Route::new(PupMain, ITech, 1.2, Some("pup_main_to_itech.png")),
            Route::new(PupMain, Coc, 1.0, Some("pup_main_to_coc.png")),
            Route::new(PupMain, PupLhs, 1.7, Some("pup_main_to_pup_lhs.png")),
            Route::new(PupMain, Condotel, 1.5, Some("pup_main_to_condotel.png")),
            Route::new(Cea, Hasmin, 2.0, Some("cea_to_hasmin.png")),
            Route::new(Cea, ITech, 5.0, Some("cea_to_itech.png")),
            Route::new(Cea, Coc, 4.5, Some("cea_to_coc.png")),
            Route::new(Cea, PupLhs, 4.0, Some("cea_to_pup_lhs.png")),
            Route::new(Cea, Condotel, 4.5, Some("cea_to_condotel.png")),
            Route::new(Hasmin, ITech, 4.0, Some("hasmin_to_itech.png")),
            Route::new(Hasmin, Coc, 3.5, Some("hasmin_to_coc.png")),
            Route::new(Hasmin, PupLhs, 0.5, Some("hasmin_to_pup_lhs.png")),
            Route::new(Hasmin, Condotel, 1.5, Some("hasmin_to_condotel.png")),
            Route::new(ITech, Coc, 0.5, Some("itech_to_coc.png")),
            Route::new(ITech, PupLhs, 2.5, Some("itech_to_pup_lhs.png")),
            Route::new(ITech, Condotel, 0.5, Some("itech_to_condotel.png")),
            Route::new(Coc, PupLhs, 2.0, Some("coc_to_pup_lhs.png")),
            Route::new(Coc, Condotel, 1.0, Some("coc_to_condotel.png")),
            Route::new(PupLhs, Condotel, 2.0, Some("pup_lhs_to_condotel.png")),
        ];

        RouteTable { routes }
    }

    pub fn from_routes(routes: Vec<Route>) -> Self {
        RouteTable { routes }
    }

    /// Load a route table from a JSON array of routes
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read routes file: {:?}", path.as_ref()))?;

        let routes: Vec<Route> =
            serde_json::from_str(&content).context("Failed to parse routes JSON")?;

        for route in &routes {
            route
                .validate()
                .with_context(|| format!("Invalid route in {:?}", path.as_ref()))?;
        }

        tracing::debug!(count = routes.len(), "loaded route table");
        Ok(RouteTable::from_routes(routes))
    }

    pub fn find(&self, start: Location, end: Location) -> Option<&Route> {
        self.routes.iter().find(|r| r.connects(start, end))
    }

    /// Distance in km. Undefined pairs (and start == end) give 0.0.
    pub fn distance(&self, start: Location, end: Location) -> f64 {
        if start == end {
            return 0.0;
        }
        self.find(start, end).map(|r| r.distance_km).unwrap_or(0.0)
    }

    /// Like `distance`, but a missing route between distinct points is an error
    pub fn checked_distance(&self, start: Location, end: Location) -> Result<f64, RouteError> {
        let distance = self.distance(start, end);
        if distance == 0.0 && start != end {
            return Err(RouteError { start, end });
        }
        Ok(distance)
    }

    pub fn route_image(&self, start: Location, end: Location) -> Option<&str> {
        self.find(start, end).and_then(|r| r.image.as_deref())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_every_pair() {
        let table = RouteTable::standard();
        assert_eq!(table.len(), 21);

        for (i, a) in Location::ALL.iter().enumerate() {
            for b in &Location::ALL[i + 1..] {
                assert!(table.find(*a, *b).is_some(), "missing {} - {}", a, b);
            }
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let table = RouteTable::standard();

        for a in Location::ALL {
            for b in Location::ALL {
                assert_eq!(table.distance(a, b), table.distance(b, a));
            }
        }

        assert_eq!(table.distance(Location::Cea, Location::ITech), 5.0);
        assert_eq!(table.distance(Location::ITech, Location::Cea), 5.0);
    }

    #[test]
    fn test_same_location_has_zero_distance() {
        let table = RouteTable::standard();
        assert_eq!(table.distance(Location::Coc, Location::Coc), 0.0);
        assert_eq!(table.checked_distance(Location::Coc, Location::Coc), Ok(0.0));
    }

    #[test]
    fn test_undefined_route_is_rejected() {
        let table = RouteTable::from_routes(vec![Route::new(
            Location::PupMain,
            Location::Cea,
            2.0,
            None,
        )]);

        assert_eq!(table.distance(Location::Hasmin, Location::Coc), 0.0);
        let err = table
            .checked_distance(Location::Hasmin, Location::Coc)
            .unwrap_err();
        assert_eq!(err.start, Location::Hasmin);
        assert_eq!(err.end, Location::Coc);
    }

    #[test]
    fn test_route_image_either_direction() {
        let table = RouteTable::standard();
        assert_eq!(
            table.route_image(Location::PupLhs, Location::Hasmin),
            Some("hasmin_to_pup_lhs.png")
        );
        assert_eq!(
            table.route_image(Location::Hasmin, Location::PupLhs),
            Some("hasmin_to_pup_lhs.png")
        );
        assert_eq!(table.route_image(Location::Cea, Location::Cea), None);
    }

    #[test]
    fn test_location_parse() {
        assert_eq!("pup main".parse::<Location>(), Ok(Location::PupMain));
        assert_eq!("iTech".parse::<Location>(), Ok(Location::ITech));
        assert_eq!(" COC ".parse::<Location>(), Ok(Location::Coc));
        assert!(matches!(
            "Makati".parse::<Location>(),
            Err(ParseError::UnknownLocation(_))
        ));
    }

    #[test]
    fn test_route_json_uses_display_names() {
        let json = r#"[{"a": "PUP LHS", "b": "Condotel", "distance_km": 2.0}]"#;
        let routes: Vec<Route> = serde_json::from_str(json).unwrap();
        let table = RouteTable::from_routes(routes);

        assert_eq!(table.distance(Location::Condotel, Location::PupLhs), 2.0);
        assert_eq!(table.route_image(Location::Condotel, Location::PupLhs), None);
    }

    /// Write a routes file into a fresh temp dir
    fn temp_routes(json: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("enavroom-routes-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("routes.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_from_file_loads_valid_routes() {
        let path =
            temp_routes(r#"[{"a": "CEA", "b": "COC", "distance_km": 13.602956144842313}]"#);
        let table = RouteTable::from_file(&path).unwrap();

        assert_eq!(table.distance(Location::Coc, Location::Cea), 13.602956144842313);
    }

    #[test]
    fn test_from_file_rejects_self_loop() {
        let path = temp_routes(r#"[{"a": "CEA", "b": "CEA", "distance_km": 5.0}]"#);
        let err = RouteTable::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("to itself"));
    }

    #[test]
    fn test_from_file_rejects_bad_distances() {
        for distance in ["0.0", "-2.5"] {
            let json = format!(r#"[{{"a": "CEA", "b": "COC", "distance_km": {}}}]"#, distance);
            let path = temp_routes(&json);
            let err = RouteTable::from_file(&path).unwrap_err();
            assert!(format!("{:#}", err).contains("invalid distance"), "{}", distance);
        }
    }

    #[test]
    fn test_same_location_ignores_self_loop_entries() {
        let table =
            RouteTable::from_routes(vec![Route::new(Location::Cea, Location::Cea, 5.0, None)]);
        assert_eq!(table.distance(Location::Cea, Location::Cea), 0.0);
        assert_eq!(table.checked_distance(Location::Cea, Location::Cea), Ok(0.0));
    }
}
