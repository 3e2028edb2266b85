// Feature assembly module
// Maps one request record to the 12-column training feature layout

use serde::Deserialize;

/// Number of columns the classifier was trained on.
pub const FEATURE_COUNT: usize = 12;

/// Index of the time-of-day column, the only one that is
/// power-transformed and scaled.
pub const TIME_COLUMN: usize = 1;

/// One casualty record as posted to `/predict`.
///
/// Wire field names match the training dataset column headers, so clients
/// can post rows verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct CasualtyFeatures {
    #[serde(rename = "Number_of_Vehicles")]
    pub number_of_vehicles: i64,
    #[serde(rename = "Time_24hr")]
    pub time_24hr: i64,
    #[serde(rename = "First_Road_Class")]
    pub first_road_class: String,
    #[serde(rename = "Road_Surface")]
    pub road_surface: String,
    #[serde(rename = "Lighting_Conditions")]
    pub lighting_conditions: String,
    #[serde(rename = "Weather_Conditions")]
    pub weather_conditions: String,
    #[serde(rename = "Casualty_Severity")]
    pub casualty_severity: String,
    #[serde(rename = "Sex_of_Casualty")]
    pub sex_of_casualty: String,
    #[serde(rename = "Age_of_Casualty")]
    pub age_of_casualty: i64,
    #[serde(rename = "Type_of_Vehicle")]
    pub type_of_vehicle: String,
}

impl CasualtyFeatures {
    /// Derived age band, e.g. 34 -> "30-39", 71 -> "+70".
    pub fn age_group(&self) -> String {
        age_group(self.age_of_casualty)
    }

    /// Derived vehicle group for the casualty's vehicle type.
    pub fn vehicle_group(&self) -> &'static str {
        vehicle_group(&self.type_of_vehicle)
    }
}

/// Bucket an age into the decade band used at training time.
///
/// Ages of 70 and above collapse into a single "+70" band. Floor division
/// keeps parity with the training preprocessing.
pub fn age_group(age: i64) -> String {
    if age < 70 {
        let decade = age.div_euclid(10) * 10;
        format!("{decade}-{}", decade + 9)
    } else {
        "+70".to_string()
    }
}

/// Collapse a raw vehicle type into its training-time group.
///
/// Types outside the table fall back to "Other Vehicle"; that is the
/// table's own catch-all, not an error.
pub fn vehicle_group(type_of_vehicle: &str) -> &'static str {
    match type_of_vehicle {
        "Car" | "Taxi/Private hire car" => "Car",
        "Pedal cycle"
        | "M/cycle 50cc and under"
        | "Motorcycle over 50cc and up to 125cc"
        | "Motorcycle over 125cc and up to 500cc"
        | "Motorcycle over 500cc" => "Two-Wheeled Vehicle",
        "Bus or coach (17 or more passenger seats)"
        | "Minibus (8 \u{2013} 16 passenger seats)" => "Public Transportation",
        _ => "Other Vehicle",
    }
}
