//! US states with the point each state map is centered on

use serde::Serialize;

use crate::models::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsState {
    pub code: &'static str,
    pub name: &'static str,
    #[serde(skip)]
    pub center: Coordinates,
}

const fn state(code: &'static str, name: &'static str, latitude: f64, longitude: f64) -> UsState {
    UsState {
        code,
        name,
        center: Coordinates::new(latitude, longitude),
    }
}

/// All 50 states, alphabetical by name
pub const STATES: [UsState; 50] = [
    state("AL", "Alabama", 32.806671, -86.791130),
    state("AK", "Alaska", 61.370716, -152.404419),
    state("AZ", "Arizona", 33.729759, -111.431221),
    state("AR", "Arkansas", 34.969704, -92.373123),
    state("CA", "California", 36.116203, -119.681564),
    state("CO", "Colorado", 39.059811, -105.311104),
    state("CT", "Connecticut", 41.597782, -72.755371),
    state("DE", "Delaware", 39.318523, -75.507141),
    state("FL", "Florida", 27.766279, -81.686783),
    state("GA", "Georgia", 33.040619, -83.643074),
    state("HI", "Hawaii", 21.094318, -157.498337),
    state("ID", "Idaho", 44.240459, -114.478828),
    state("IL", "Illinois", 40.349457, -88.986137),
    state("IN", "Indiana", 39.849426, -86.258278),
    state("IA", "Iowa", 42.011539, -93.210526),
    state("KS", "Kansas", 38.526600, -96.726486),
    state("KY", "Kentucky", 37.668140, -84.670067),
    state("LA", "Louisiana", 31.169546, -91.867805),
    state("ME", "Maine", 44.693947, -69.381927),
    state("MD", "Maryland", 39.063946, -76.802101),
    state("MA", "Massachusetts", 42.230171, -71.530106),
    state("MI", "Michigan", 43.326618, -84.536095),
    state("MN", "Minnesota", 45.694454, -93.900192),
    state("MS", "Mississippi", 32.741646, -89.678696),
    state("MO", "Missouri", 38.456085, -92.288368),
    state("MT", "Montana", 46.921925, -110.454353),
    state("NE", "Nebraska", 41.125370, -98.268082),
    state("NV", "Nevada", 38.313515, -117.055374),
    state("NH", "New Hampshire", 43.452492, -71.563896),
    state("NJ", "New Jersey", 40.298904, -74.521011),
    state("NM", "New Mexico", 34.840515, -106.248482),
    state("NY", "New York", 42.165726, -74.948051),
    state("NC", "North Carolina", 35.630066, -79.806419),
    state("ND", "North Dakota", 47.528912, -99.784012),
    state("OH", "Ohio", 40.388783, -82.764915),
    state("OK", "Oklahoma", 35.565342, -96.928917),
    state("OR", "Oregon", 44.572021, -122.070938),
    state("PA", "Pennsylvania", 40.590752, -77.209755),
    state("RI", "Rhode Island", 41.680893, -71.511780),
    state("SC", "South Carolina", 33.856892, -80.945007),
    state("SD", "South Dakota", 44.299782, -99.438828),
    state("TN", "Tennessee", 35.747845, -86.692345),
    state("TX", "Texas", 31.054487, -97.563461),
    state("UT", "Utah", 40.150032, -111.862434),
    state("VT", "Vermont", 44.045876, -72.710686),
    state("VA", "Virginia", 37.769337, -78.169968),
    state("WA", "Washington", 47.400902, -121.490494),
    state("WV", "West Virginia", 38.491226, -80.954453),
    state("WI", "Wisconsin", 44.268543, -89.616508),
    state("WY", "Wyoming", 42.755966, -107.302490),
];

/// Looks a state up by its two-letter code. Codes are matched exactly, so
/// callers upper-case user input first.
#[must_use]
pub fn find_state(code: &str) -> Option<&'static UsState> {
    STATES.iter().find(|state| state.code == code)
}

#[must_use]
pub fn state_center(code: &str) -> Option<Coordinates> {
    find_state(code).map(|state| state.center)
}
