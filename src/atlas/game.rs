/// Wire model of the `/api/search` response.
///
/// The API is loose about which fields it sends: anything missing or `null`
/// decodes to the type's default, and unknown fields are ignored.
use serde::{Deserialize, Deserializer, Serialize};

/// A single board game as returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    /// Atlas identifier (opaque string).
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Price as sent by the API, unformatted (e.g. "39.99").
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year_published: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Publisher's page for the game.
    #[serde(rename = "official_url", deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rules_url: String,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub games: Vec<Game>,
    /// Server-reported number of matches; may exceed `games.len()`.
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_partial_game() {
        let body = r#"{"games":[{"id":"1","name":"Catan","description":"d","official_url":"u"}],"count":1}"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.games.len(), 1);
        let game = &result.games[0];
        assert_eq!(game.name, "Catan");
        assert_eq!(game.url, "u");
        assert_eq!(game.price, "");
        assert_eq!(game.year_published, 0);
    }

    #[test]
    fn test_decode_ignores_unknown_and_null_fields() {
        let body = r#"{
            "games": [{
                "id": "TAAifFP590",
                "name": "Root",
                "year_published": null,
                "price": null,
                "players": "2-4",
                "mechanics": [{"id": "x"}]
            }],
            "count": 42,
            "extra": true
        }"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.count, 42);
        assert_eq!(result.games[0].name, "Root");
        assert_eq!(result.games[0].year_published, 0);
        assert_eq!(result.games[0].price, "");
    }

    #[test]
    fn test_decode_empty_object() {
        let result: SearchResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, SearchResult::default());
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        assert!(serde_json::from_str::<SearchResult>(r#"{"count":"many"}"#).is_err());
        assert!(serde_json::from_str::<SearchResult>(r#"{"games":[{"year_published":-1}]}"#).is_err());
    }

    #[test]
    fn test_round_trip_preserves_games_and_count() {
        let original = SearchResult {
            games: vec![
                Game {
                    id: "OIXt3DmJU0".to_owned(),
                    name: "Catan".to_owned(),
                    price: "32.96".to_owned(),
                    year_published: 1995,
                    description: "Trade, build, settle.".to_owned(),
                    url: "https://www.catan.com/".to_owned(),
                    image_url: "https://example.invalid/catan.png".to_owned(),
                    rules_url: "https://example.invalid/catan.pdf".to_owned(),
                },
                Game {
                    name: "Ticket to Ride".to_owned(),
                    ..Game::default()
                },
            ],
            count: 1234,
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains(r#""official_url":"https://www.catan.com/""#));
        let decoded: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }
}
