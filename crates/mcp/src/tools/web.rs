// Web tools: scraping, crawling, screenshots and structured extraction

use crate::tools::definition::ToolDefinition;
use crate::tools::schema::Param;
use crate::tools::search::SCRAPE_FORMATS;
use crate::tools::shape::Shape;
use dumpling_sdk::endpoints;
use serde_json::json;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "scrape",
            endpoints::SCRAPE,
            "Scrape the content of a single web page.",
        )
        .param(Param::string("url", "URL of the page to scrape").required())
        .param(
            Param::choice("format", SCRAPE_FORMATS, "Output format")
                .default_value(json!("markdown")),
        )
        .param(
            Param::boolean("cleaned", "Strip navigation, ads and other boilerplate")
                .default_value(json!(true)),
        )
        .param(
            Param::boolean("renderJs", "Render JavaScript before scraping")
                .default_value(json!(true)),
        )
        .shape(Shape::Truncate(&["screenshot"])),
        ToolDefinition::new(
            "crawl",
            endpoints::CRAWL,
            "Crawl a website starting from a base URL and return the content of each page.",
        )
        .param(Param::string("baseUrl", "URL the crawl starts from").required())
        .param(
            Param::integer("maxPages", "Maximum number of pages to crawl")
                .min(1.0)
                .max(1000.0)
                .default_value(json!(100)),
        )
        .param(
            Param::boolean("crawlBeyondBaseUrl", "Follow links outside the base URL")
                .default_value(json!(false)),
        )
        .param(
            Param::integer("depth", "Maximum link depth")
                .min(1.0)
                .max(10.0)
                .default_value(json!(2)),
        )
        .param(Param::object(
            "scrapeOptions",
            vec![
                Param::choice("format", SCRAPE_FORMATS, "Format of page content"),
                Param::boolean("cleaned", "Strip boilerplate from page content"),
                Param::boolean("renderJs", "Render JavaScript before scraping"),
            ],
            "Options applied to every crawled page",
        )),
        ToolDefinition::new(
            "screenshot",
            endpoints::SCREENSHOT,
            "Capture a screenshot of a web page.",
        )
        .param(Param::string("url", "URL of the page to capture").required())
        .param(Param::object(
            "clipRectangle",
            vec![
                Param::number("top", "Top offset in pixels").min(0.0).required(),
                Param::number("left", "Left offset in pixels").min(0.0).required(),
                Param::number("width", "Width in pixels").min(0.0).required(),
                Param::number("height", "Height in pixels").min(0.0).required(),
            ],
            "Only capture this rectangle of the page",
        ))
        .param(
            Param::boolean("blockCookieBanners", "Hide cookie consent banners")
                .default_value(json!(true)),
        )
        .param(
            Param::boolean("autoScroll", "Scroll through the page before capturing")
                .default_value(json!(false)),
        )
        .param(
            Param::boolean("fullPage", "Capture the full scrollable page")
                .default_value(json!(false)),
        )
        .param(
            Param::integer("waitFor", "Milliseconds to wait before capturing")
                .min(0.0)
                .max(30000.0),
        )
        .shape(Shape::Truncate(&["screenshot"])),
        ToolDefinition::new(
            "extract",
            endpoints::EXTRACT,
            "Extract structured data from a web page following a JSON schema of instructions.",
        )
        .param(Param::string("url", "URL of the page to extract from").required())
        .param(
            Param::map(
                "schema",
                "Object mapping output field names to extraction instructions",
            )
            .required(),
        )
        .param(
            Param::boolean("renderJs", "Render JavaScript before extracting")
                .default_value(json!(true)),
        ),
    ]
}
