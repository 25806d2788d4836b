//! Vacation type.

use std::fmt;

/// The kind of trip the traveller is after.
///
/// The search form offers a fixed list; anything else is carried through
/// verbatim as [`VacationType::Other`] so the discovery service still sees
/// exactly what was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VacationType {
    Beach,
    Hiking,
    Casinos,
    FamilyFun,
    Food,
    Culture,
    Adventure,
    Relaxation,
    CityBreak,
    Wildlife,
    Other(String),
}

impl VacationType {
    /// Every type offered by the search form, in display order.
    pub const KNOWN: [VacationType; 10] = [
        VacationType::Beach,
        VacationType::Hiking,
        VacationType::Casinos,
        VacationType::FamilyFun,
        VacationType::Food,
        VacationType::Culture,
        VacationType::Adventure,
        VacationType::Relaxation,
        VacationType::CityBreak,
        VacationType::Wildlife,
    ];

    /// Labels of [`KNOWN`](Self::KNOWN), in the same order.
    pub const KNOWN_LABELS: [&'static str; 10] = [
        "Beach",
        "Hiking",
        "Casinos",
        "Family Fun",
        "Food",
        "Culture",
        "Adventure",
        "Relaxation",
        "City Break",
        "Wildlife",
    ];

    /// Interpret a form value. Matching is exact, as the form sends these labels.
    pub fn parse(s: &str) -> Self {
        match s {
            "Beach" => VacationType::Beach,
            "Hiking" => VacationType::Hiking,
            "Casinos" => VacationType::Casinos,
            "Family Fun" => VacationType::FamilyFun,
            "Food" => VacationType::Food,
            "Culture" => VacationType::Culture,
            "Adventure" => VacationType::Adventure,
            "Relaxation" => VacationType::Relaxation,
            "City Break" => VacationType::CityBreak,
            "Wildlife" => VacationType::Wildlife,
            other => VacationType::Other(other.to_string()),
        }
    }

    /// The label sent on the wire and shown to users.
    pub fn as_str(&self) -> &str {
        match self {
            VacationType::Beach => "Beach",
            VacationType::Hiking => "Hiking",
            VacationType::Casinos => "Casinos",
            VacationType::FamilyFun => "Family Fun",
            VacationType::Food => "Food",
            VacationType::Culture => "Culture",
            VacationType::Adventure => "Adventure",
            VacationType::Relaxation => "Relaxation",
            VacationType::CityBreak => "City Break",
            VacationType::Wildlife => "Wildlife",
            VacationType::Other(s) => s,
        }
    }
}

impl fmt::Display for VacationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
