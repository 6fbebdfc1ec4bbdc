// Document and media tools: conversion, PDF handling, trimming and AI extraction

use crate::tools::definition::ToolDefinition;
use crate::tools::schema::{Param, ParamKind};
use crate::tools::shape::Shape;
use dumpling_sdk::endpoints;
use serde_json::json;

const INPUT_METHODS: &[&str] = &["url", "base64"];
const VIDEO_FORMATS: &[&str] = &["mp4", "webm", "mov"];

fn input_method() -> Param {
    Param::choice(
        "inputMethod",
        INPUT_METHODS,
        "Whether the file entries are URLs or base64-encoded content",
    )
    .required()
}

fn files(name: &'static str, description: &'static str) -> Param {
    Param::array(name, ParamKind::String, description).required()
}

fn prompt() -> Param {
    Param::string("prompt", "Instructions describing what to extract").required()
}

fn json_mode() -> Param {
    Param::boolean("jsonMode", "Return the extraction as JSON").default_value(json!(false))
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "doc-to-text",
            endpoints::DOC_TO_TEXT,
            "Convert a document (PDF, Word, etc.) to plain text.",
        )
        .file_input("file")
        .param(Param::string("pages", "Page range to convert, e.g. \"1-3,5\"")),
        ToolDefinition::new(
            "convert-to-pdf",
            endpoints::CONVERT_TO_PDF,
            "Convert a document, spreadsheet, presentation or image to PDF.",
        )
        .file_input("file")
        .shape(Shape::Truncate(&["pdf"])),
        ToolDefinition::new(
            "merge-pdfs",
            endpoints::MERGE_PDFS,
            "Merge several PDF files into one.",
        )
        .param(input_method())
        .param(files("files", "PDF files to merge, in order"))
        .param(Param::map("metadata", "Metadata to set on the merged PDF"))
        .param(Param::boolean("pdfa", "Produce a PDF/A document").default_value(json!(false)))
        .param(Param::boolean("pdfua", "Produce a PDF/UA document").default_value(json!(false)))
        .shape(Shape::Truncate(&["pdf"])),
        ToolDefinition::new(
            "trim-video",
            endpoints::TRIM_VIDEO,
            "Cut a video to the section between two timestamps.",
        )
        .param(Param::string("videoUrl", "URL of the video to trim").required())
        .param(Param::string("startTimestamp", "Start of the section, HH:MM:SS").required())
        .param(Param::string("endTimestamp", "End of the section, HH:MM:SS").required())
        .param(
            Param::choice("outputFormat", VIDEO_FORMATS, "Container format of the result")
                .default_value(json!("mp4")),
        )
        .shape(Shape::Truncate(&["video"])),
        ToolDefinition::new(
            "extract-document",
            endpoints::EXTRACT_DOCUMENT,
            "Extract structured information from documents using an AI prompt.",
        )
        .param(input_method())
        .param(files("files", "Documents to extract from"))
        .param(prompt())
        .param(json_mode()),
        ToolDefinition::new(
            "extract-image",
            endpoints::EXTRACT_IMAGE,
            "Extract structured information from images using an AI prompt.",
        )
        .param(input_method())
        .param(files("images", "Images to extract from"))
        .param(prompt())
        .param(json_mode()),
        ToolDefinition::new(
            "extract-audio",
            endpoints::EXTRACT_AUDIO,
            "Extract structured information from an audio file using an AI prompt.",
        )
        .file_input("audio")
        .param(prompt())
        .param(json_mode()),
        ToolDefinition::new(
            "extract-video",
            endpoints::EXTRACT_VIDEO,
            "Extract structured information from a video using an AI prompt.",
        )
        .file_input("video")
        .param(prompt())
        .param(json_mode()),
        ToolDefinition::new(
            "read-pdf-metadata",
            endpoints::READ_PDF_METADATA,
            "Read metadata from PDF files.",
        )
        .param(input_method())
        .param(files("files", "PDF files to inspect"))
        .param(Param::boolean("full", "Return every metadata field").default_value(json!(false)))
        .param(Param::boolean("xmp", "Include XMP metadata").default_value(json!(false))),
        ToolDefinition::new(
            "write-pdf-metadata",
            endpoints::WRITE_PDF_METADATA,
            "Write metadata fields into PDF files.",
        )
        .param(input_method())
        .param(files("files", "PDF files to update"))
        .param(Param::map("metadata", "Metadata fields to write, e.g. {\"Title\": \"Report\"}").required())
        .shape(Shape::Truncate(&["pdf"])),
    ]
}
