pub mod ai;
pub mod code;
pub mod definition;
pub mod documents;
pub mod forward;
pub mod schema;
pub mod search;
pub mod shape;
pub mod web;
pub mod registry;

pub use definition::ToolDefinition;
pub use forward::{Forwarder, ForwardingTool};
pub use registry::{Tool, ToolRegistry};
pub use schema::{json_schema_object, Param, ParamKind, ValidatedInput};
pub use shape::Shape;

use std::sync::Arc;

/// Every tool definition the server exposes, in listing order.
pub fn catalog() -> Vec<ToolDefinition> {
    let mut definitions = search::definitions();
    definitions.extend(web::definitions());
    definitions.extend(documents::definitions());
    definitions.extend(ai::definitions());
    definitions.extend(code::definitions());
    definitions
}

/// Register the whole catalog, each tool forwarding through `forwarder`.
pub fn register_all(registry: &mut ToolRegistry, forwarder: Arc<Forwarder>) {
    for definition in catalog() {
        registry.register(Arc::new(ForwardingTool::new(definition, forwarder.clone())));
    }
}
