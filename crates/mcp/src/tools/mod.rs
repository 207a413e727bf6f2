pub mod leadmagic;
mod registry;

pub use leadmagic::{register_all, EndpointTool, Summarizer};
pub use registry::{
    input_schema_json, json_schema_integer, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};
