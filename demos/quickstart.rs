use skyclock::{Almanac, Instant, ObserverConfig, PhaseCalendarOptions, RiseSet};

fn describe(label: &str, events: RiseSet) {
    match events {
        RiseSet::Crossings { rise, set } => {
            let hour = |c: Option<skyclock::Crossing>| {
                c.map_or_else(|| "--:--".to_owned(), |c| format!("{:05.2} h", c.hour))
            };
            println!("{label:<18} rise {}  set {}", hour(rise), hour(set));
        }
        RiseSet::AlwaysAbove => println!("{label:<18} up all day"),
        RiseSet::AlwaysBelow => println!("{label:<18} down all day"),
    }
}

fn main() {
    let now = Instant::now();
    let almanac = Almanac::new(ObserverConfig::default());

    println!("{now}  ({})", now.julian());

    let (sample, next) = almanac.moon_phase(&now);
    println!("Moon age {:.2} d, next {next}", sample.days_from_new);
    for event in almanac.next_phases(&now, PhaseCalendarOptions::default()) {
        println!("  {:<15} {}", event.phase, Instant::from_julian(event.at));
    }

    let day = almanac.rise_set(&now);
    println!("Local date {}", day.date);
    describe("Moon", day.moon);
    describe("Sun", day.sun);
    describe("Nautical twilight", day.nautical_twilight);

    for (planet, result) in almanac.planets(&now) {
        match result {
            Ok(pos) => println!(
                "{planet:<8} RA {:6.3} h  Dec {:+7.3}°  {:6.3} AU",
                pos.equatorial.ra_hours, pos.equatorial.dec_deg, pos.distance_au
            ),
            Err(e) => println!("{planet:<8} {e}"),
        }
    }
}
