// Agent, knowledge-base and image-generation tools

use crate::tools::definition::ToolDefinition;
use crate::tools::schema::{Param, ParamKind};
use crate::tools::shape::Shape;
use dumpling_sdk::endpoints;
use serde_json::json;

const ROLES: &[&str] = &["user", "assistant", "system"];

const IMAGE_MODELS: &[&str] = &[
    "FLUX.1-schnell",
    "FLUX.1-dev",
    "FLUX.1-pro",
    "FLUX.1.1-pro",
    "recraft-v3",
];

const OUTPUT_FORMATS: &[&str] = &["webp", "jpg", "png"];
const ASPECT_RATIOS: &[&str] = &["1:1", "16:9", "9:16", "4:3", "3:4"];

// Image payloads may come back inline
const IMAGE_PAYLOAD_KEYS: &[&str] = &["base64", "b64_json"];

fn message() -> ParamKind {
    ParamKind::Object(vec![
        Param::choice("role", ROLES, "Author of the message").required(),
        Param::string("content", "Message text").required(),
    ])
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "generate-agent-completion",
            endpoints::GENERATE_AGENT_COMPLETION,
            "Get a completion from a configured Dumpling AI agent.",
        )
        .param(Param::array("messages", message(), "Conversation so far").required())
        .param(Param::string("agentId", "ID of the agent to run").required())
        .param(
            Param::boolean("parseJson", "Parse the agent's reply as JSON")
                .default_value(json!(false)),
        )
        .param(Param::string("threadId", "Continue an existing conversation thread")),
        ToolDefinition::new(
            "search-knowledge-base",
            endpoints::SEARCH_KNOWLEDGE_BASE,
            "Search a knowledge base for entries relevant to a query.",
        )
        .param(Param::string("knowledgeBaseId", "ID of the knowledge base").required())
        .param(Param::string("query", "Search query").required())
        .param(
            Param::integer("resultCount", "Number of results to return")
                .min(1.0)
                .max(50.0)
                .default_value(json!(5)),
        ),
        ToolDefinition::new(
            "add-to-knowledge-base",
            endpoints::ADD_TO_KNOWLEDGE_BASE,
            "Add a text entry to a knowledge base.",
        )
        .param(Param::string("knowledgeBaseId", "ID of the knowledge base").required())
        .param(Param::string("name", "Name of the entry").required())
        .param(Param::string("content", "Text content of the entry").required()),
        ToolDefinition::new(
            "generate-ai-image",
            endpoints::GENERATE_AI_IMAGE,
            "Generate images with a FLUX or Recraft model, passing model input directly.",
        )
        .param(Param::choice("model", IMAGE_MODELS, "Image model").required())
        .param(
            Param::object(
                "input",
                vec![
                    Param::string("prompt", "Description of the image").required(),
                    Param::string("aspect_ratio", "Aspect ratio, e.g. \"16:9\""),
                    Param::integer("num_outputs", "Number of images").min(1.0).max(4.0),
                    Param::integer("seed", "Random seed for reproducible output"),
                    Param::choice("output_format", OUTPUT_FORMATS, "Image file format"),
                ],
                "Model input",
            )
            .required(),
        )
        .shape(Shape::Truncate(IMAGE_PAYLOAD_KEYS)),
        ToolDefinition::new(
            "generate-image",
            endpoints::GENERATE_IMAGE,
            "Generate images from a text prompt.",
        )
        .param(
            Param::string("prompt", "Description of the image")
                .required()
                .upstream("input.prompt"),
        )
        .param(
            Param::choice("model", IMAGE_MODELS, "Image model")
                .default_value(json!("FLUX.1-schnell")),
        )
        .param(
            Param::choice("aspectRatio", ASPECT_RATIOS, "Aspect ratio of the image")
                .upstream("input.aspect_ratio"),
        )
        .param(
            Param::integer("numOutputs", "Number of images")
                .min(1.0)
                .max(4.0)
                .upstream("input.num_outputs"),
        )
        .param(Param::integer("seed", "Random seed for reproducible output").upstream("input.seed"))
        .shape(Shape::Truncate(IMAGE_PAYLOAD_KEYS)),
    ]
}
