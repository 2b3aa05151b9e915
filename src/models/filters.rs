use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum walking time from a stop to a destination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum WalkingDistance {
    UnderTwoMinutes,
    UnderFiveMinutes,
    #[default]
    UnderTenMinutes,
}

impl WalkingDistance {
    pub fn minutes(&self) -> u32 {
        match self {
            WalkingDistance::UnderTwoMinutes => 2,
            WalkingDistance::UnderFiveMinutes => 5,
            WalkingDistance::UnderTenMinutes => 10,
        }
    }

    /// Search radius implied by the walking time limit.
    pub fn radius_meters(&self) -> f64 {
        self.minutes() as f64 * crate::constants::WALKING_SPEED_METERS_PER_MINUTE
    }
}

impl fmt::Display for WalkingDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

impl FromStr for WalkingDistance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2" => Ok(WalkingDistance::UnderTwoMinutes),
            "5" => Ok(WalkingDistance::UnderFiveMinutes),
            "10" => Ok(WalkingDistance::UnderTenMinutes),
            _ => Err(format!(
                "Invalid walking distance: {}. Use '2', '5' or '10'",
                s
            )),
        }
    }
}

/// How long a destination must remain open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum OperatingHours {
    #[default]
    OpenNow,
    OpenNextTwoHours,
    OpenNextFourHours,
}

impl OperatingHours {
    pub fn as_token(&self) -> &'static str {
        match self {
            OperatingHours::OpenNow => "now",
            OperatingHours::OpenNextTwoHours => "2hours",
            OperatingHours::OpenNextFourHours => "4hours",
        }
    }
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

impl FromStr for OperatingHours {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now" => Ok(OperatingHours::OpenNow),
            "2hours" => Ok(OperatingHours::OpenNextTwoHours),
            "4hours" => Ok(OperatingHours::OpenNextFourHours),
            _ => Err(format!(
                "Invalid operating hours: {}. Use 'now', '2hours' or '4hours'",
                s
            )),
        }
    }
}

/// What kind of destination to discover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum DestinationType {
    #[default]
    FoodDrink,
    Fashion,
    Grocery,
    Alcohol,
    Housewares,
    Gifts,
    Entertainment,
    Laundry,
    Attractions,
}

impl DestinationType {
    /// Search phrase used against the place text-search endpoint.
    pub fn search_query(&self) -> &'static str {
        match self {
            DestinationType::FoodDrink => "food and drink",
            DestinationType::Fashion => "clothing store",
            DestinationType::Grocery => "grocery store",
            DestinationType::Alcohol => "liquor store",
            DestinationType::Housewares => "hardware store",
            DestinationType::Gifts => "florist",
            DestinationType::Entertainment => "movie theater",
            DestinationType::Laundry => "dry cleaner",
            DestinationType::Attractions => "tourist attraction",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DestinationType::FoodDrink => "food_drink",
            DestinationType::Fashion => "fashion",
            DestinationType::Grocery => "grocery",
            DestinationType::Alcohol => "alcohol",
            DestinationType::Housewares => "housewares",
            DestinationType::Gifts => "gifts",
            DestinationType::Entertainment => "entertainment",
            DestinationType::Laundry => "laundry",
            DestinationType::Attractions => "attractions",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DestinationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food_drink" => Ok(DestinationType::FoodDrink),
            "fashion" => Ok(DestinationType::Fashion),
            "grocery" => Ok(DestinationType::Grocery),
            "alcohol" => Ok(DestinationType::Alcohol),
            "housewares" => Ok(DestinationType::Housewares),
            "gifts" => Ok(DestinationType::Gifts),
            "entertainment" => Ok(DestinationType::Entertainment),
            "laundry" => Ok(DestinationType::Laundry),
            "attractions" => Ok(DestinationType::Attractions),
            _ => Err(format!("Invalid destination type: {}", s)),
        }
    }
}

// String-backed serde for the wire tokens above.
macro_rules! string_serde {
    ($ty:ty) => {
        impl TryFrom<String> for $ty {
            type Error = String;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> String {
                v.to_string()
            }
        }
    };
}

string_serde!(WalkingDistance);
string_serde!(OperatingHours);
string_serde!(DestinationType);

/// The filter set a board is mounted with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DiscoveryFilters {
    #[serde(default)]
    pub walking_distance: WalkingDistance,
    #[serde(default)]
    pub operating_hours: OperatingHours,
    #[serde(default)]
    pub destination_type: DestinationType,
}
