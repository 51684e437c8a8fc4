use geo_types::Point;

/// Parse a degrees+minutes coordinate string as found in older DWD station
/// lists: the integer part is whole degrees, the fractional digits are an
/// integer count of arc-minutes (`"53.38"` is 53 degrees 38 minutes).
///
/// Returns the decimal-degree value rounded to 6 decimal places, or `None`
/// for any malformed input.
pub fn parse_degrees_minutes(raw: &str) -> Option<f64> {
    let mut parts = raw.trim().splitn(2, '.');
    let degrees = parts.next()?.parse::<i64>().ok()?;
    let minutes = parts.next()?.parse::<i64>().ok()?;

    let coordinate = degrees as f64 + minutes as f64 / 60.0;
    Some((coordinate * 1_000_000.0).round() / 1_000_000.0)
}

/// Parse a plain decimal-degree coordinate, `None` on failure.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Build a point geometry in (longitude, latitude) order.
///
/// Geometry is derived, never authored: it exists only when both halves of
/// the coordinate pair parsed.
pub fn point(longitude: Option<f64>, latitude: Option<f64>) -> Option<Point<f64>> {
    match (longitude, latitude) {
        (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
        _ => None,
    }
}
