//! MOSMIX forecast-station KML parsing.
//!
//! The DWD distributes its MOSMIX station catalogue as a KML document where
//! each `Placemark` carries the station id in `name`, the display name in
//! `description` and a `lon,lat,elevation` triple in `coordinates`.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One station extracted from a KML placemark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KmlStation {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub icao_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Kml {
    #[serde(rename = "Document")]
    document: Document,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "Placemark", default)]
    placemarks: Vec<Placemark>,
}

#[derive(Debug, Deserialize)]
struct Placemark {
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "Point")]
    point: Option<KmlPoint>,
}

#[derive(Debug, Deserialize)]
struct KmlPoint {
    coordinates: Option<String>,
}

const UNKNOWN: &str = "Unknown";

/// Parse a MOSMIX KML document into its station list.
///
/// Placemarks without a coordinates element are excluded from the output,
/// never emitted partially. A document that fails to parse at all is a
/// fatal error; there is no partial success.
pub fn parse_kml(content: &str) -> anyhow::Result<Vec<KmlStation>> {
    let kml: Kml = serde_xml_rs::from_str(content).context("failed to parse KML document")?;

    let mut stations = Vec::new();
    for placemark in kml.document.placemarks {
        let coordinates = match placemark.point.and_then(|p| p.coordinates) {
            Some(raw) => raw,
            // No geometry source data for this placemark
            None => continue,
        };
        let (longitude, latitude, elevation) = parse_coordinate_triple(&coordinates)?;

        let id = placemark.name.unwrap_or_else(|| UNKNOWN.to_string());
        let name = placemark.description.unwrap_or_else(|| UNKNOWN.to_string());
        let icao_code = icao_from_id(&id);

        stations.push(KmlStation {
            id,
            name,
            latitude,
            longitude,
            elevation,
            icao_code,
        });
    }

    Ok(stations)
}

/// `coordinates` content is `longitude,latitude,elevation`.
fn parse_coordinate_triple(raw: &str) -> anyhow::Result<(f64, f64, f64)> {
    let parts: Vec<&str> = raw.trim().split(',').collect();
    if parts.len() != 3 {
        anyhow::bail!("expected lon,lat,elevation coordinate triple, got {raw:?}");
    }

    let longitude = parts[0]
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid longitude {:?}", parts[0]))?;
    let latitude = parts[1]
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid latitude {:?}", parts[1]))?;
    let elevation = parts[2]
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid elevation {:?}", parts[2]))?;

    Ok((longitude, latitude, elevation))
}

/// MOSMIX ids for airport stations are their four-letter ICAO codes; the
/// catalogue carries no separate ICAO field.
fn icao_from_id(id: &str) -> Option<String> {
    if id.len() == 4 && id.chars().all(|c| c.is_ascii_uppercase()) {
        Some(id.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(placemarks: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>MOSMIX station catalogue</name>
    {placemarks}
  </Document>
</kml>"#
        )
    }

    #[test]
    fn parses_a_complete_placemark() {
        let doc = wrap(
            r#"<Placemark>
                 <name>10384</name>
                 <description>Berlin</description>
                 <Point><coordinates>13.4,52.5,34</coordinates></Point>
               </Placemark>"#,
        );

        let stations = parse_kml(&doc).unwrap();
        assert_eq!(stations.len(), 1);
        let station = &stations[0];
        assert_eq!(station.id, "10384");
        assert_eq!(station.name, "Berlin");
        assert_eq!(station.longitude, 13.4);
        assert_eq!(station.latitude, 52.5);
        assert_eq!(station.elevation, 34.0);
        assert_eq!(station.icao_code, None);
    }

    #[test]
    fn placemark_without_coordinates_is_excluded() {
        let doc = wrap(
            r#"<Placemark>
                 <name>10384</name>
                 <description>Berlin</description>
               </Placemark>
               <Placemark>
                 <name>10385</name>
                 <description>Berlin-Schoenefeld</description>
                 <Point><coordinates>13.53,52.38,46</coordinates></Point>
               </Placemark>"#,
        );

        let stations = parse_kml(&doc).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "10385");
    }

    #[test]
    fn missing_description_defaults_to_unknown() {
        let doc = wrap(
            r#"<Placemark>
                 <name>P100</name>
                 <Point><coordinates>8.8,53.1,5</coordinates></Point>
               </Placemark>"#,
        );

        let stations = parse_kml(&doc).unwrap();
        assert_eq!(stations[0].name, "Unknown");
    }

    #[test]
    fn airport_ids_carry_their_icao_code() {
        let doc = wrap(
            r#"<Placemark>
                 <name>EDDH</name>
                 <description>Hamburg Airport</description>
                 <Point><coordinates>9.99,53.63,11</coordinates></Point>
               </Placemark>"#,
        );

        let stations = parse_kml(&doc).unwrap();
        assert_eq!(stations[0].icao_code.as_deref(), Some("EDDH"));
    }

    #[test]
    fn malformed_document_is_a_fatal_error() {
        assert!(parse_kml("<kml><Document>").is_err());
        assert!(parse_kml("not xml at all").is_err());
    }

    #[test]
    fn malformed_coordinate_triple_aborts_the_parse() {
        let doc = wrap(
            r#"<Placemark>
                 <name>10384</name>
                 <Point><coordinates>13.4,52.5</coordinates></Point>
               </Placemark>"#,
        );

        assert!(parse_kml(&doc).is_err());
    }
}
