use crate::query::Query;
use crate::types::PhotoMetadata;

/// Radius for latitude/longitude matching, in kilometers.
const GEO_RADIUS_KM: f64 = 200.0;
/// Year matches within this window.
const YEAR_WINDOW: i32 = 5;
/// Month matches within this window (wrapping across year end when the
/// query gives no year).
const MONTH_WINDOW: i32 = 3;

/// Country aliases folded to a canonical name before comparison.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("usa", "United States"),
    ("us", "United States"),
    ("u.s.", "United States"),
    ("u.s.a", "United States"),
    ("ksa", "Saudi Arabia"),
    ("saudi", "Saudi Arabia"),
    ("uae", "United Arab Emirates"),
    ("uk", "United Kingdom"),
    ("u.k.", "United Kingdom"),
];

/// Words ignored when matching the query's description against photo text.
/// Shorter than the scorer's stopword list: the filter only needs to drop
/// glue words, the scorer handles relevance.
const FILTER_STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "of", "in", "on", "at", "for", "to", "by",
    "with", "picture", "photo", "image", "photograph", "view",
];

/// Narrows `photos` to the candidates that satisfy the query's extracted
/// metadata, before relevance ranking. Criteria are applied strictly first;
/// when nothing survives, constraints are relaxed in stages:
///
/// 1. all criteria, including lat/lon radius and description keywords;
/// 2. drop the lat/lon radius (city/country still apply);
/// 3. additionally drop the description keyword check;
/// 4. date only.
///
/// An empty result after all stages means the query is unsatisfiable
/// against this library.
pub fn filter_photos(query: &Query, photos: &[PhotoMetadata]) -> Vec<PhotoMetadata> {
    let strict: Vec<PhotoMetadata> = photos
        .iter()
        .filter(|p| passes_all_criteria(query, p, true, true))
        .cloned()
        .collect();
    if !strict.is_empty() {
        return strict;
    }

    if query.has("photo_location_latitude") && query.has("photo_location_longitude") {
        let geo_relaxed: Vec<PhotoMetadata> = photos
            .iter()
            .filter(|p| passes_all_criteria(query, p, false, true))
            .cloned()
            .collect();
        if !geo_relaxed.is_empty() {
            return geo_relaxed;
        }
    }

    if query.has("photo_description") {
        let description_relaxed: Vec<PhotoMetadata> = photos
            .iter()
            .filter(|p| passes_all_criteria(query, p, false, false))
            .cloned()
            .collect();
        if !description_relaxed.is_empty() {
            return description_relaxed;
        }
    }

    if query.has("year") || query.has("month") {
        let date_only: Vec<PhotoMetadata> = photos
            .iter()
            .filter(|p| matches_month(query, p) && matches_year(query, p))
            .cloned()
            .collect();
        if !date_only.is_empty() {
            return date_only;
        }
    }

    Vec::new()
}

fn passes_all_criteria(
    query: &Query,
    photo: &PhotoMetadata,
    use_lat_lon: bool,
    use_description: bool,
) -> bool {
    let has_coords =
        query.has("photo_location_latitude") && query.has("photo_location_longitude");
    let has_place = query.has("photo_location_city") || query.has("photo_location_country");

    if use_lat_lon && has_coords {
        if !within_radius(query, photo) {
            return false;
        }
        // Coordinates in France plus an explicit country of Germany is
        // still a miss.
        if has_place && !matches_city_country(query, photo) {
            return false;
        }
    } else if has_place && !matches_city_country(query, photo) {
        return false;
    }

    if !matches_month(query, photo) || !matches_year(query, photo) {
        return false;
    }

    let wants_photographer = query.has("photographer_username")
        || query.has("photographer_first_name")
        || query.has("photographer_last_name");
    if wants_photographer && !matches_photographer(query, photo) {
        return false;
    }

    if (query.has("exif_camera_make") || query.has("exif_camera_model"))
        && !matches_camera(query, photo)
    {
        return false;
    }

    if use_description && query.has("photo_description") && !matches_description(query, photo) {
        return false;
    }

    true
}

fn normalize_country(country: &str) -> &str {
    let lowered = country.trim().to_lowercase();
    for (alias, canonical) in COUNTRY_ALIASES {
        if lowered == *alias {
            return canonical;
        }
    }
    country
}

fn matches_city_country(query: &Query, photo: &PhotoMetadata) -> bool {
    if let Some(city) = query.str_field("photo_location_city") {
        // A photo without a city can still match on country alone; a photo
        // with a different city cannot.
        if !city.is_empty()
            && !photo.photo_location_city.is_empty()
            && !city.eq_ignore_ascii_case(&photo.photo_location_city)
        {
            return false;
        }
    }
    if let Some(country) = query.str_field("photo_location_country") {
        if !country.is_empty()
            && !normalize_country(country)
                .eq_ignore_ascii_case(normalize_country(&photo.photo_location_country))
        {
            return false;
        }
    }
    true
}

fn within_radius(query: &Query, photo: &PhotoMetadata) -> bool {
    let (Some(lat), Some(lon)) = (
        query.num_field("photo_location_latitude"),
        query.num_field("photo_location_longitude"),
    ) else {
        return true;
    };
    haversine_km(
        lat,
        lon,
        photo.photo_location_latitude,
        photo.photo_location_longitude,
    ) <= GEO_RADIUS_KM
}

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

fn submitted_year(photo: &PhotoMetadata) -> Option<i32> {
    photo.photo_submitted_at.get(..4)?.parse().ok()
}

fn submitted_month(photo: &PhotoMetadata) -> Option<i32> {
    photo.photo_submitted_at.get(5..7)?.parse().ok()
}

fn matches_year(query: &Query, photo: &PhotoMetadata) -> bool {
    let Some(wanted) = query.num_field("year") else {
        return true;
    };
    match submitted_year(photo) {
        Some(year) => (year - wanted as i32).abs() <= YEAR_WINDOW,
        None => false,
    }
}

fn matches_month(query: &Query, photo: &PhotoMetadata) -> bool {
    let Some(wanted) = query.num_field("month") else {
        return true;
    };
    let wanted = wanted as i32;
    let Some(month) = submitted_month(photo) else {
        return false;
    };
    if let Some(year) = query.num_field("year") {
        // With a year in the query, the month window only applies inside
        // that year; otherwise the year check alone decides.
        return match submitted_year(photo) {
            Some(photo_year) if photo_year == year as i32 => {
                (month - wanted).abs() <= MONTH_WINDOW
            }
            _ => true,
        };
    }
    let distance = (month - wanted).abs();
    distance <= MONTH_WINDOW || distance >= 12 - MONTH_WINDOW
}

fn matches_photographer(query: &Query, photo: &PhotoMetadata) -> bool {
    if query.has("photographer_username") {
        return match query.str_field("photographer_username") {
            Some(username) if !username.is_empty() => {
                username.eq_ignore_ascii_case(&photo.photographer_username)
            }
            Some(_) => photo.photographer_username.is_empty(),
            None => false,
        };
    }

    let first_ok = match query.str_field("photographer_first_name") {
        _ if !query.has("photographer_first_name") => true,
        Some(first) if !first.is_empty() => {
            first.eq_ignore_ascii_case(&photo.photographer_first_name)
        }
        Some(_) => photo.photographer_first_name.is_empty(),
        None => false,
    };
    let last_ok = match query.str_field("photographer_last_name") {
        _ if !query.has("photographer_last_name") => true,
        Some(last) if !last.is_empty() => {
            last.eq_ignore_ascii_case(&photo.photographer_last_name)
        }
        Some(_) => photo.photographer_last_name.is_empty(),
        None => false,
    };
    first_ok && last_ok
}

fn matches_camera(query: &Query, photo: &PhotoMetadata) -> bool {
    if let Some(make) = query.str_field("exif_camera_make") {
        if !make.is_empty() && !make.eq_ignore_ascii_case(&photo.exif_camera_make) {
            return false;
        }
    }
    if let Some(model) = query.str_field("exif_camera_model") {
        if !model.is_empty() && !model.eq_ignore_ascii_case(&photo.exif_camera_model) {
            return false;
        }
    }
    true
}

/// Every keyword from the query's description must appear somewhere in the
/// photo's combined description text. Country names are left to the geo
/// criteria so "pictures of the USA" does not demand the literal word.
fn matches_description(query: &Query, photo: &PhotoMetadata) -> bool {
    let Some(description) = query.str_field("photo_description") else {
        return true;
    };
    if description.is_empty() {
        return true;
    }

    let lowered = description.to_lowercase();
    let keywords: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 2)
        .filter(|word| !FILTER_STOPWORDS.contains(word))
        .filter(|word| {
            !COUNTRY_ALIASES
                .iter()
                .any(|(_, canonical)| canonical.to_lowercase().contains(word))
        })
        .collect();
    if keywords.is_empty() {
        return true;
    }

    let photo_text = format!(
        "{} {}",
        photo.photo_description.to_lowercase(),
        photo.ai_description.to_lowercase()
    );
    keywords.iter().all(|keyword| photo_text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn query_with(entries: &[(&str, serde_json::Value)]) -> Query {
        Query {
            message: String::new(),
            metadata: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn photo_in(country: &str, city: &str) -> PhotoMetadata {
        PhotoMetadata {
            photo_id: format!("{country}-{city}"),
            photo_location_country: country.to_string(),
            photo_location_city: city.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn country_aliases_normalize_before_comparison() {
        let query = query_with(&[("photo_location_country", json!("usa"))]);
        let photos = [photo_in("United States", "Denver"), photo_in("Canada", "")];
        let kept = filter_photos(&query, &photos);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].photo_location_country, "United States");
    }

    #[test]
    fn city_mismatch_rejects_but_missing_city_can_pass_on_country() {
        let query = query_with(&[
            ("photo_location_country", json!("Iceland")),
            ("photo_location_city", json!("Vik")),
        ]);
        let photos = [
            photo_in("Iceland", "Vik"),
            photo_in("Iceland", "Reykjavik"),
            photo_in("Iceland", ""),
        ];
        let kept = filter_photos(&query, &photos);
        let ids: Vec<&str> = kept.iter().map(|p| p.photo_id.as_str()).collect();
        assert_eq!(ids, ["Iceland-Vik", "Iceland-"]);
    }

    #[test]
    fn lat_lon_radius_filters_and_falls_back_when_empty() {
        let near = PhotoMetadata {
            photo_id: "near".into(),
            photo_location_latitude: 48.86,
            photo_location_longitude: 2.35,
            ..Default::default()
        };
        let far = PhotoMetadata {
            photo_id: "far".into(),
            photo_location_latitude: -33.86,
            photo_location_longitude: 151.2,
            ..Default::default()
        };

        let query = query_with(&[
            ("photo_location_latitude", json!(48.85)),
            ("photo_location_longitude", json!(2.35)),
        ]);
        let kept = filter_photos(&query, &[near.clone(), far.clone()]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].photo_id, "near");

        // Nothing within the radius, but the query also names a country the
        // photos carry: the geo fallback still finds them.
        let query = query_with(&[
            ("photo_location_latitude", json!(0.0)),
            ("photo_location_longitude", json!(0.0)),
            ("photo_location_country", json!("France")),
        ]);
        let paris = PhotoMetadata {
            photo_location_country: "France".into(),
            ..near
        };
        let kept = filter_photos(&query, &[paris, far]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn year_window_is_plus_minus_five() {
        let mut photo = PhotoMetadata {
            photo_submitted_at: "2016-07-01T00:00:00Z".into(),
            ..Default::default()
        };
        let query = query_with(&[("year", json!(2019))]);
        assert_eq!(filter_photos(&query, &[photo.clone()]).len(), 1);

        photo.photo_submitted_at = "2010-07-01T00:00:00Z".into();
        assert!(filter_photos(&query, &[photo]).is_empty());
    }

    #[test]
    fn month_window_wraps_without_a_year() {
        let december = PhotoMetadata {
            photo_submitted_at: "2018-12-20T00:00:00Z".into(),
            ..Default::default()
        };
        let query = query_with(&[("month", json!(1))]);
        assert_eq!(filter_photos(&query, &[december]).len(), 1);
    }

    #[test]
    fn photographer_names_must_all_match() {
        let photo = PhotoMetadata {
            photographer_first_name: "Anna".into(),
            photographer_last_name: "Jons".into(),
            ..Default::default()
        };
        let both = query_with(&[
            ("photographer_first_name", json!("anna")),
            ("photographer_last_name", json!("jons")),
        ]);
        assert_eq!(filter_photos(&both, &[photo.clone()]).len(), 1);

        let wrong_last = query_with(&[
            ("photographer_first_name", json!("anna")),
            ("photographer_last_name", json!("smith")),
        ]);
        assert!(filter_photos(&wrong_last, &[photo]).is_empty());
    }

    #[test]
    fn description_keywords_must_all_appear() {
        let photo = PhotoMetadata {
            photo_description: "Northern lights over a frozen lake".into(),
            ai_description: "green aurora in night sky".into(),
            ..Default::default()
        };
        let matching = query_with(&[("photo_description", json!("aurora over lake"))]);
        assert_eq!(filter_photos(&matching, &[photo.clone()]).len(), 1);

        // "volcano" appears nowhere; strict and relaxed description stages
        // both run, and the relaxed stage admits the photo.
        let missing = query_with(&[("photo_description", json!("volcano aurora"))]);
        assert_eq!(filter_photos(&missing, &[photo]).len(), 1);
    }

    #[test]
    fn date_only_fallback_applies_after_location_misses() {
        let photo = PhotoMetadata {
            photo_location_country: "Chile".into(),
            photo_submitted_at: "2019-03-10T00:00:00Z".into(),
            ..Default::default()
        };
        let query = query_with(&[
            ("photo_location_country", json!("Peru")),
            ("year", json!(2019)),
        ]);
        let kept = filter_photos(&query, &[photo]);
        assert_eq!(kept.len(), 1, "date-only fallback should keep the photo");
    }

    #[test]
    fn no_criteria_keeps_everything() {
        let query = Query::default();
        let photos = [photo_in("Iceland", "Vik"), photo_in("Chile", "")];
        assert_eq!(filter_photos(&query, &photos).len(), 2);
    }
}
