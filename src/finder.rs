use rand::Rng;

use crate::clock::Clock;
use crate::error::{BookingError, Result};
use crate::station::ChargingStation;

/// Name and distance range (km) for each generated station.
const STATION_LAYOUT: [(&str, f64, f64); 3] = [
    ("EV Station A", 1.0, 10.0),
    ("EV Station B", 5.0, 15.0),
    ("EV Station C", 10.0, 20.0),
];

#[derive(Debug, Clone)]
pub struct StationFinder {
    stations: Vec<ChargingStation>,
}

impl StationFinder {
    pub fn new<R: Rng, C: Clock + ?Sized>(rng: &mut R, clock: &C) -> Self {
        StationFinder {
            stations: Self::generate_stations(rng, clock),
        }
    }

    pub fn generate_stations<R: Rng, C: Clock + ?Sized>(
        rng: &mut R,
        clock: &C,
    ) -> Vec<ChargingStation> {
        STATION_LAYOUT
            .iter()
            .map(|&(name, min_km, max_km)| {
                ChargingStation::new(name, rng.random_range(min_km..=max_km), clock.now())
            })
            .collect()
    }

    /// Stations as `(station_number, station)`, numbered from 1.
    pub fn list_stations(&self) -> impl Iterator<Item = (usize, &ChargingStation)> + '_ {
        self.stations.iter().enumerate().map(|(idx, s)| (idx + 1, s))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn station(&self, station_number: usize) -> Result<&ChargingStation> {
        let len = self.stations.len();
        station_number
            .checked_sub(1)
            .and_then(|idx| self.stations.get(idx))
            .ok_or(BookingError::InvalidIndex {
                index: station_number,
                len,
            })
    }

    pub fn station_mut(&mut self, station_number: usize) -> Result<&mut ChargingStation> {
        let len = self.stations.len();
        station_number
            .checked_sub(1)
            .and_then(|idx| self.stations.get_mut(idx))
            .ok_or(BookingError::InvalidIndex {
                index: station_number,
                len,
            })
    }

    pub fn nearest(&self) -> Option<&ChargingStation> {
        self.stations
            .iter()
            .min_by(|a, b| a.distance_from_vehicle_km.total_cmp(&b.distance_from_vehicle_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn generates_three_named_stations_in_range() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let stations = StationFinder::generate_stations(&mut rng, &clock());
            assert_eq!(stations.len(), 3);
            for (station, &(name, min_km, max_km)) in stations.iter().zip(STATION_LAYOUT.iter()) {
                assert_eq!(station.name, name);
                assert!((min_km..=max_km).contains(&station.distance_from_vehicle_km));
                assert_eq!(station.slot_count(), 24);
            }
        }
    }

    #[test]
    fn same_seed_same_distances() {
        let a = StationFinder::new(&mut StdRng::seed_from_u64(7), &clock());
        let b = StationFinder::new(&mut StdRng::seed_from_u64(7), &clock());
        let da: Vec<f64> = a.list_stations().map(|(_, s)| s.distance_from_vehicle_km).collect();
        let db: Vec<f64> = b.list_stations().map(|(_, s)| s.distance_from_vehicle_km).collect();
        assert_eq!(da, db);
    }

    #[test]
    fn lists_one_based() {
        let finder = StationFinder::new(&mut StdRng::seed_from_u64(1), &clock());
        let numbers: Vec<usize> = finder.list_stations().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(finder.station(2).unwrap().name, "EV Station B");
    }

    #[test]
    fn station_lookup_out_of_range() {
        let mut finder = StationFinder::new(&mut StdRng::seed_from_u64(1), &clock());
        assert_eq!(
            finder.station(0).unwrap_err(),
            BookingError::InvalidIndex { index: 0, len: 3 }
        );
        assert_eq!(
            finder.station_mut(4).unwrap_err(),
            BookingError::InvalidIndex { index: 4, len: 3 }
        );
    }

    #[test]
    fn booking_through_finder_sticks() {
        let mut finder = StationFinder::new(&mut StdRng::seed_from_u64(3), &clock());
        finder.station_mut(3).unwrap().book_slot(5).unwrap();
        assert_eq!(finder.station(3).unwrap().booked_count(), 1);
        assert_eq!(finder.station(1).unwrap().booked_count(), 0);
    }

    #[test]
    fn nearest_has_min_distance() {
        let finder = StationFinder::new(&mut StdRng::seed_from_u64(11), &clock());
        let nearest = finder.nearest().unwrap();
        assert!(
            finder
                .list_stations()
                .all(|(_, s)| nearest.distance_from_vehicle_km <= s.distance_from_vehicle_km)
        );
    }
}
