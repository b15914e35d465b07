use shopfront_core::addresses::{cities_of, pincodes_of, STATES};

/// Prints the delivery directory: every state, the cities of one state, or
/// the pincodes of one city.
pub(crate) fn run_addresses(state: Option<&str>, city: Option<&str>) {
    match (state, city) {
        (None, _) => {
            for s in STATES {
                println!("{} ({} cities)", s.name, s.cities.len());
            }
        }
        (Some(state), None) => {
            let cities = cities_of(state);
            if cities.is_empty() {
                eprintln!("warning: {state} is not a listed delivery state");
                return;
            }
            for c in cities {
                println!("{}", c.name);
            }
        }
        (Some(state), Some(city)) => {
            let pincodes = pincodes_of(state, city);
            if pincodes.is_empty() {
                eprintln!("warning: {city}, {state} is not in the delivery directory");
                return;
            }
            println!("{}", pincodes.join(", "));
        }
    }
}
