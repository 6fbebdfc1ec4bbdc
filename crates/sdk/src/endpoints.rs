//! Upstream endpoint paths, relative to the API base URL.

pub const GET_YOUTUBE_TRANSCRIPT: &str = "/api/v1/get-youtube-transcript";
pub const SEARCH: &str = "/api/v1/search";
pub const GET_AUTOCOMPLETE: &str = "/api/v1/get-autocomplete";
pub const SEARCH_MAPS: &str = "/api/v1/search-maps";
pub const SEARCH_PLACES: &str = "/api/v1/search-places";
pub const SEARCH_NEWS: &str = "/api/v1/search-news";
pub const GET_GOOGLE_REVIEWS: &str = "/api/v1/get-google-reviews";

pub const SCRAPE: &str = "/api/v1/scrape";
pub const CRAWL: &str = "/api/v1/crawl";
pub const SCREENSHOT: &str = "/api/v1/screenshot";
pub const EXTRACT: &str = "/api/v1/extract";

pub const DOC_TO_TEXT: &str = "/api/v1/doc-to-text";
pub const CONVERT_TO_PDF: &str = "/api/v1/convert-to-pdf";
pub const MERGE_PDFS: &str = "/api/v1/merge-pdfs";
pub const TRIM_VIDEO: &str = "/api/v1/trim-video";
pub const EXTRACT_DOCUMENT: &str = "/api/v1/extract-document";
pub const EXTRACT_IMAGE: &str = "/api/v1/extract-image";
pub const EXTRACT_AUDIO: &str = "/api/v1/extract-audio";
pub const EXTRACT_VIDEO: &str = "/api/v1/extract-video";
pub const READ_PDF_METADATA: &str = "/api/v1/read-pdf-metadata";
pub const WRITE_PDF_METADATA: &str = "/api/v1/write-pdf-metadata";

pub const GENERATE_AGENT_COMPLETION: &str = "/api/v1/agents/generate-completion";
pub const SEARCH_KNOWLEDGE_BASE: &str = "/api/v1/search-knowledge-base";
pub const ADD_TO_KNOWLEDGE_BASE: &str = "/api/v1/knowledge-bases/add";
pub const GENERATE_AI_IMAGE: &str = "/api/v1/generate-ai-image";
pub const GENERATE_IMAGE: &str = "/api/v1/generate-image";

pub const RUN_JS_CODE: &str = "/api/v1/run-js-code";
pub const RUN_PYTHON_CODE: &str = "/api/v1/run-python-code";
