//! Directory of supported delivery states, their cities and sample pincodes.
//!
//! Each city lists five consecutive pincodes starting at `first_pincode`.

const PINCODES_PER_CITY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    first_pincode: u32,
}

impl City {
    #[must_use]
    pub fn pincodes(&self) -> Vec<String> {
        (self.first_pincode..self.first_pincode + PINCODES_PER_CITY)
            .map(|p| p.to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub name: &'static str,
    pub cities: &'static [City],
}

const fn city(name: &'static str, first_pincode: u32) -> City {
    City {
        name,
        first_pincode,
    }
}

pub static STATES: &[State] = &[
    State {
        name: "Gujarat",
        cities: &[
            city("Ahmedabad", 380_001),
            city("Surat", 395_001),
            city("Vadodara", 390_001),
            city("Rajkot", 360_001),
            city("Gandhinagar", 382_010),
        ],
    },
    State {
        name: "Maharashtra",
        cities: &[
            city("Mumbai", 400_001),
            city("Pune", 411_001),
            city("Nagpur", 440_001),
            city("Nashik", 422_001),
        ],
    },
    State {
        name: "Delhi",
        cities: &[city("New Delhi", 110_001), city("Delhi", 110_006)],
    },
    State {
        name: "Karnataka",
        cities: &[
            city("Bangalore", 560_001),
            city("Mysore", 570_001),
            city("Mangalore", 575_001),
        ],
    },
    State {
        name: "Tamil Nadu",
        cities: &[
            city("Chennai", 600_001),
            city("Coimbatore", 641_001),
            city("Madurai", 625_001),
        ],
    },
    State {
        name: "Rajasthan",
        cities: &[
            city("Jaipur", 302_001),
            city("Jodhpur", 342_001),
            city("Udaipur", 313_001),
        ],
    },
    State {
        name: "Uttar Pradesh",
        cities: &[
            city("Lucknow", 226_001),
            city("Kanpur", 208_001),
            city("Agra", 282_001),
        ],
    },
    State {
        name: "West Bengal",
        cities: &[city("Kolkata", 700_001), city("Howrah", 711_101)],
    },
    State {
        name: "Punjab",
        cities: &[
            city("Chandigarh", 160_001),
            city("Amritsar", 143_001),
            city("Ludhiana", 141_001),
        ],
    },
    State {
        name: "Haryana",
        cities: &[city("Gurgaon", 122_001), city("Faridabad", 121_001)],
    },
    State {
        name: "Madhya Pradesh",
        cities: &[city("Bhopal", 462_001), city("Indore", 452_001)],
    },
    State {
        name: "Andhra Pradesh",
        cities: &[city("Hyderabad", 500_001), city("Vishakhapatnam", 530_001)],
    },
    State {
        name: "Kerala",
        cities: &[city("Kochi", 682_001), city("Thiruvananthapuram", 695_001)],
    },
];

#[must_use]
pub fn state_names() -> Vec<&'static str> {
    STATES.iter().map(|s| s.name).collect()
}

/// Cities of `state`, or an empty slice for an unknown state.
#[must_use]
pub fn cities_of(state: &str) -> &'static [City] {
    STATES
        .iter()
        .find(|s| s.name == state)
        .map(|s| s.cities)
        .unwrap_or_default()
}

/// Pincodes of `city` in `state`, empty when either is unknown.
#[must_use]
pub fn pincodes_of(state: &str, city: &str) -> Vec<String> {
    cities_of(state)
        .iter()
        .find(|c| c.name == city)
        .map(City::pincodes)
        .unwrap_or_default()
}
