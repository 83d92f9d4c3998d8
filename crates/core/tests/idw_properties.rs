//! Interpolation properties validated through the public API.

use approx::assert_abs_diff_eq;
use towermap_core::{
    GeoPoint, IdwConfig, InterpolatedWeather, SpatialInterpolator, WeatherStation,
};

fn station(lat: f64, lng: f64, temp: f64, wind_dir: f64) -> WeatherStation {
    WeatherStation {
        point: GeoPoint::new(lat, lng).unwrap(),
        temperature_c: temp,
        precipitation_mm: 0.5,
        humidity_pct: 65.0,
        wind_speed_kmh: 15.0,
        wind_direction_deg: wind_dir,
    }
}

#[test]
fn interpolating_at_a_station_is_exact() {
    let interp = SpatialInterpolator::default();
    let stations = vec![
        station(-23.55, -46.63, 19.0, 220.0),
        station(-22.90, -43.17, 27.0, 90.0),
        station(-19.92, -43.93, 23.0, 10.0),
    ];

    for s in &stations {
        let sample = interp.interpolate(&s.point, &stations);
        assert_eq!(sample.confidence, 1.0);
        assert_eq!(sample.weather.temperature_c, s.temperature_c);
        assert_eq!(sample.weather.wind_direction_deg, s.wind_direction_deg);
    }
}

#[test]
fn confidence_is_monotonic_in_distance_from_nearest_station() {
    let interp = SpatialInterpolator::default();
    let stations = vec![station(-10.0, -50.0, 25.0, 0.0)];

    let mut previous = f64::INFINITY;
    // Query points marching south, away from the only station
    for step in 0..20 {
        let query = GeoPoint::new(-10.0 - f64::from(step) * 0.3, -50.0).unwrap();
        let sample = interp.interpolate(&query, &stations);
        assert!(
            sample.confidence <= previous,
            "confidence rose from {previous} to {} at step {step}",
            sample.confidence
        );
        assert!((0.0..=1.0).contains(&sample.confidence));
        previous = sample.confidence;
    }
}

#[test]
fn wind_direction_across_north_averages_to_zero() {
    let interp = SpatialInterpolator::default();
    // Equidistant stations reporting 350° and 10°: scalar averaging
    // would say 180°; the vector mean must say ~0°.
    let stations = vec![
        station(-10.0, -51.0, 25.0, 350.0),
        station(-10.0, -49.0, 25.0, 10.0),
    ];
    let sample = interp.interpolate(&GeoPoint::new(-10.0, -50.0).unwrap(), &stations);

    let dir = sample.weather.wind_direction_deg;
    assert!((0.0..360.0).contains(&dir));
    let wrapped = if dir > 180.0 { dir - 360.0 } else { dir };
    assert_abs_diff_eq!(wrapped, 0.0, epsilon = 1.0);
    assert!((wrapped - 180.0).abs() > 90.0, "scalar-average artifact");
}

#[test]
fn no_stations_yields_documented_baseline() {
    let interp = SpatialInterpolator::default();
    let sample = interp.interpolate(&GeoPoint::new(-15.0, -47.0).unwrap(), &[]);
    assert_eq!(sample.weather, InterpolatedWeather::baseline());
    assert_eq!(sample.confidence, 0.0);
}

#[test]
fn confidence_ignores_station_count() {
    // Confidence is driven by the nearest station only; adding more
    // stations farther out must not change it.
    let interp = SpatialInterpolator::new(IdwConfig::default());
    let query = GeoPoint::new(-10.0, -50.0).unwrap();

    let one = vec![station(-11.0, -50.0, 22.0, 45.0)];
    let many = vec![
        station(-11.0, -50.0, 22.0, 45.0),
        station(-12.0, -50.0, 20.0, 60.0),
        station(-13.0, -50.0, 18.0, 75.0),
    ];

    let a = interp.interpolate(&query, &one);
    let b = interp.interpolate(&query, &many);
    assert_abs_diff_eq!(a.confidence, b.confidence, epsilon = 1e-12);
}
