// Search tools: web, news, maps, places, reviews, autocomplete, transcripts

use crate::tools::definition::ToolDefinition;
use crate::tools::schema::Param;
use crate::tools::shape::Shape;
use dumpling_sdk::endpoints;
use serde_json::json;

pub const DATE_RANGES: &[&str] = &[
    "anyTime",
    "pastHour",
    "pastDay",
    "pastWeek",
    "pastMonth",
    "pastYear",
];

pub const SCRAPE_FORMATS: &[&str] = &["markdown", "html", "screenshot"];

const REVIEW_SORT_ORDERS: &[&str] = &["relevant", "newest", "highest_rating", "lowest_rating"];

fn query() -> Param {
    Param::string("query", "Search query").required()
}

fn country() -> Param {
    Param::string("country", "Two-letter country code for the search (e.g. \"us\")")
}

fn location() -> Param {
    Param::string("location", "Location to search from (e.g. \"London, United Kingdom\")")
}

fn language() -> Param {
    Param::string("language", "Two-letter language code (e.g. \"en\")")
}

fn page() -> Param {
    Param::integer("page", "Results page number").min(1.0)
}

fn date_range() -> Param {
    Param::choice("dateRange", DATE_RANGES, "Restrict results to a time window")
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "get-youtube-transcript",
            endpoints::GET_YOUTUBE_TRANSCRIPT,
            "Fetch the transcript of a YouTube video, optionally with timestamps.",
        )
        .param(Param::string("videoUrl", "URL of the YouTube video").required())
        .param(
            Param::boolean("includeTimestamps", "Prefix transcript lines with timestamps")
                .default_value(json!(true)),
        )
        .param(
            Param::integer("timestampsToCombine", "Number of timestamped segments merged per line")
                .min(1.0)
                .default_value(json!(5)),
        )
        .param(
            Param::string("preferredLanguage", "Preferred transcript language code")
                .default_value(json!("en")),
        ),
        ToolDefinition::new(
            "search",
            endpoints::SEARCH,
            "Search the web (Google) and optionally scrape the content of the top results.",
        )
        .param(query())
        .param(country())
        .param(location())
        .param(language())
        .param(date_range())
        .param(page())
        .param(
            Param::boolean("scrapeResults", "Scrape the content of the top results")
                .default_value(json!(false)),
        )
        .param(
            Param::integer("numResultsToScrape", "Number of results to scrape when scrapeResults is set")
                .min(1.0)
                .max(10.0)
                .default_value(json!(3)),
        )
        .param(Param::object(
            "scrapeOptions",
            vec![
                Param::choice("format", SCRAPE_FORMATS, "Format of scraped content"),
                Param::boolean("cleaned", "Strip boilerplate from scraped content"),
            ],
            "Options applied when scraping results",
        ))
        .shape(Shape::Search),
        ToolDefinition::new(
            "get-autocomplete",
            endpoints::GET_AUTOCOMPLETE,
            "Get Google search autocomplete suggestions for a partial query.",
        )
        .param(query())
        .param(location())
        .param(country())
        .param(language()),
        ToolDefinition::new(
            "search-maps",
            endpoints::SEARCH_MAPS,
            "Search Google Maps for locations and businesses.",
        )
        .param(query())
        .param(Param::string(
            "gpsPositionZoom",
            "GPS position and zoom level, e.g. \"@40.7455096,-74.0083012,14z\"",
        ))
        .param(Param::string("placeId", "Google place ID to focus on"))
        .param(Param::string("cid", "Google customer ID (CID) to focus on"))
        .param(language())
        .param(page()),
        ToolDefinition::new(
            "search-places",
            endpoints::SEARCH_PLACES,
            "Search Google Places for businesses and points of interest.",
        )
        .param(query())
        .param(country())
        .param(location())
        .param(language())
        .param(page()),
        ToolDefinition::new(
            "search-news",
            endpoints::SEARCH_NEWS,
            "Search Google News for recent articles.",
        )
        .param(query())
        .param(country())
        .param(location())
        .param(language())
        .param(date_range())
        .param(page())
        .shape(Shape::News),
        ToolDefinition::new(
            "get-google-reviews",
            endpoints::GET_GOOGLE_REVIEWS,
            "Fetch Google reviews for a business, identified by keyword, CID or place ID.",
        )
        .param(Param::string("keyword", "Business name and location, e.g. \"Joe's Pizza New York\""))
        .param(Param::string("cid", "Google customer ID (CID) of the business"))
        .param(Param::string("placeId", "Google place ID of the business"))
        .param(
            Param::integer("reviews", "Number of reviews to fetch")
                .min(1.0)
                .max(1000.0)
                .default_value(json!(10)),
        )
        .param(
            Param::choice("sortBy", REVIEW_SORT_ORDERS, "Review ordering")
                .default_value(json!("relevant")),
        )
        .param(Param::string("topicId", "Only return reviews about this topic"))
        .param(language())
        .param(location())
        .require_one_of(&["keyword", "cid", "placeId"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> ToolDefinition {
        definitions()
            .into_iter()
            .find(|d| d.name == name)
            .unwrap()
    }

    #[test]
    fn test_transcript_defaults() {
        let def = find("get-youtube-transcript");
        let input = def
            .validate(&json!({"videoUrl": "https://youtu.be/dQw4w9WgXcQ"}))
            .unwrap();
        assert_eq!(
            def.build_body(&input),
            json!({
                "videoUrl": "https://youtu.be/dQw4w9WgXcQ",
                "includeTimestamps": true,
                "timestampsToCombine": 5,
                "preferredLanguage": "en"
            })
        );
    }

    #[test]
    fn test_search_rejects_unknown_date_range() {
        let def = find("search");
        let err = def
            .validate(&json!({"query": "rust", "dateRange": "lastCentury"}))
            .unwrap_err();
        assert!(err.to_string().starts_with("dateRange: must be one of"));
    }

    #[test]
    fn test_search_scrape_limit() {
        let def = find("search");
        assert!(def
            .validate(&json!({"query": "rust", "numResultsToScrape": 11}))
            .is_err());
    }

    #[test]
    fn test_reviews_default_sort_and_count() {
        let def = find("get-google-reviews");
        let input = def.validate(&json!({"keyword": "Joe's Pizza"})).unwrap();
        assert!(def.check_preconditions(&input).is_ok());
        let body = def.build_body(&input);
        assert_eq!(body["reviews"], 10);
        assert_eq!(body["sortBy"], "relevant");
    }
}
