use serde::Deserialize;
use std::env;
use std::time::Duration;

const OMDB_URL: &str = "http://www.omdbapi.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Fiche normalisée renvoyée par la recherche OMDb.
/// `exact_match = false` signale que le titre trouvé ne correspond pas
/// exactement au titre demandé (comparaison insensible à la casse) :
/// l'appelant décide quoi en faire, on ne redemande jamais à l'utilisateur ici.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieAttributes {
    pub title: String,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<f64>,
    pub poster: Option<String>,
    pub exact_match: bool,
}

/// Candidat affichable quand OMDb renvoie plusieurs résultats
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    pub title: String,
    pub year: Option<i32>,
}

/// Stratégie par défaut quand plusieurs résultats sont renvoyés :
/// prendre le premier. En mode serveur il n'y a personne à qui demander.
pub fn pick_first(candidates: &[SearchCandidate]) -> Option<usize> {
    if candidates.is_empty() { None } else { Some(0) }
}

// Corps de réponse OMDb : soit une fiche unique, soit un champ "Error",
// soit un tableau "Search" en cas de résultats multiples.
#[derive(Debug, Deserialize)]
struct OmdbBody {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Option<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .ok()?;

        Some(Self { client, api_key })
    }

    /// Construit le client depuis OMDB_API_KEY, ou None si la clé est absente
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("OMDB_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        Self::new(api_key)
    }

    /// Recherche un titre sur OMDb avec la stratégie par défaut (premier résultat)
    pub async fn fetch(&self, title: &str, year_hint: Option<i32>) -> Option<MovieAttributes> {
        self.fetch_with(title, year_hint, pick_first).await
    }

    /// Recherche un titre sur OMDb. Tous les échecs (réseau, timeout, statut
    /// non-2xx, JSON invalide, champ "Error" d'OMDb) dégradent en None :
    /// l'absence de métadonnées n'est jamais une erreur pour l'appelant.
    pub async fn fetch_with(
        &self,
        title: &str,
        year_hint: Option<i32>,
        resolver: impl Fn(&[SearchCandidate]) -> Option<usize>,
    ) -> Option<MovieAttributes> {
        let mut query: Vec<(&str, String)> = vec![
            ("apikey", self.api_key.clone()),
            ("t", title.to_string()),
        ];
        if let Some(year) = year_hint {
            query.push(("y", year.to_string()));
        }

        let response = match self.client.get(OMDB_URL).query(&query).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("OMDb request failed for '{}': {}", title, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!("OMDb returned HTTP {} for '{}'", response.status(), title);
            return None;
        }

        let body: OmdbBody = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("OMDb returned unparsable JSON for '{}': {}", title, e);
                return None;
            }
        };

        normalize(body, title, resolver)
    }
}

/// Transforme un corps OMDb en fiche normalisée (None si OMDb n'a rien trouvé)
fn normalize(
    body: OmdbBody,
    requested_title: &str,
    resolver: impl Fn(&[SearchCandidate]) -> Option<usize>,
) -> Option<MovieAttributes> {
    if let Some(error) = body.error {
        log::warn!("OMDb error for '{}': {}", requested_title, error);
        return None;
    }

    // Résultats multiples : on laisse la stratégie de l'appelant choisir
    if let Some(results) = body.search {
        let candidates: Vec<SearchCandidate> = results
            .iter()
            .map(|item| SearchCandidate {
                title: item.title.clone(),
                year: item.year.as_deref().and_then(parse_year),
            })
            .collect();

        let chosen = results.get(resolver(&candidates)?)?;

        return Some(MovieAttributes {
            title: chosen.title.clone(),
            release_year: chosen.year.as_deref().and_then(parse_year),
            director: chosen.director.as_deref().and_then(clean_na),
            rating: chosen.imdb_rating.as_deref().and_then(parse_rating),
            poster: chosen.poster.as_deref().and_then(clean_na),
            exact_match: titles_match(&chosen.title, requested_title),
        });
    }

    // Fiche unique
    let title = body.title?;
    Some(MovieAttributes {
        exact_match: titles_match(&title, requested_title),
        release_year: body.year.as_deref().and_then(parse_year),
        director: body.director.as_deref().and_then(clean_na),
        rating: body.imdb_rating.as_deref().and_then(parse_rating),
        poster: body.poster.as_deref().and_then(clean_na),
        title,
    })
}

fn titles_match(found: &str, requested: &str) -> bool {
    found.trim().to_lowercase() == requested.trim().to_lowercase()
}

// OMDb renvoie "N/A" pour les champs absents
fn clean_na(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "N/A" {
        None
    } else {
        Some(value.to_string())
    }
}

// "2010" mais aussi "2010–2012" pour les séries : on garde l'année de début
fn parse_year(value: &str) -> Option<i32> {
    let digits: String = value.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn parse_rating(value: &str) -> Option<f64> {
    let rating = value.trim().parse::<f64>().ok()?;
    (0.0..=10.0).contains(&rating).then_some(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> OmdbBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_single_result_normalized() {
        let attrs = normalize(
            body(r#"{
                "Title": "Inception",
                "Year": "2010",
                "Director": "Christopher Nolan",
                "imdbRating": "8.8",
                "Poster": "https://example.com/inception.jpg",
                "Response": "True"
            }"#),
            "Inception",
            pick_first,
        )
        .unwrap();

        assert_eq!(attrs.title, "Inception");
        assert_eq!(attrs.release_year, Some(2010));
        assert_eq!(attrs.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(attrs.rating, Some(8.8));
        assert!(attrs.exact_match);
    }

    #[test]
    fn test_na_fields_become_none() {
        let attrs = normalize(
            body(r#"{
                "Title": "Obscure Film",
                "Year": "N/A",
                "Director": "N/A",
                "imdbRating": "N/A",
                "Poster": "N/A"
            }"#),
            "obscure film",
            pick_first,
        )
        .unwrap();

        assert_eq!(attrs.release_year, None);
        assert_eq!(attrs.director, None);
        assert_eq!(attrs.rating, None);
        assert_eq!(attrs.poster, None);
        assert!(attrs.exact_match); // comparaison insensible à la casse
    }

    #[test]
    fn test_error_body_yields_none() {
        let result = normalize(
            body(r#"{"Response": "False", "Error": "Movie not found!"}"#),
            "No Such Movie",
            pick_first,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_multiple_results_pick_first() {
        let attrs = normalize(
            body(r#"{
                "Search": [
                    {"Title": "Batman Begins", "Year": "2005"},
                    {"Title": "Batman Returns", "Year": "1992"}
                ]
            }"#),
            "Batman",
            pick_first,
        )
        .unwrap();

        assert_eq!(attrs.title, "Batman Begins");
        assert_eq!(attrs.release_year, Some(2005));
        // "Batman Begins" != "Batman" -> correspondance incertaine
        assert!(!attrs.exact_match);
    }

    #[test]
    fn test_multiple_results_custom_resolver() {
        let attrs = normalize(
            body(r#"{
                "Search": [
                    {"Title": "Batman Begins", "Year": "2005"},
                    {"Title": "Batman Returns", "Year": "1992"}
                ]
            }"#),
            "Batman Returns",
            |candidates| candidates.iter().position(|c| c.year == Some(1992)),
        )
        .unwrap();

        assert_eq!(attrs.title, "Batman Returns");
        assert!(attrs.exact_match);
    }

    #[test]
    fn test_resolver_declining_yields_none() {
        let result = normalize(
            body(r#"{"Search": [{"Title": "Batman Begins", "Year": "2005"}]}"#),
            "Batman",
            |_| None,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_year_range_keeps_first_year() {
        assert_eq!(parse_year("2010–2012"), Some(2010));
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("N/A"), None);
    }

    #[test]
    fn test_mismatched_title_flagged_low_confidence() {
        let attrs = normalize(
            body(r#"{"Title": "Inception: The Cobol Job", "Year": "2010"}"#),
            "Inception",
            pick_first,
        )
        .unwrap();

        assert!(!attrs.exact_match);
    }
}
