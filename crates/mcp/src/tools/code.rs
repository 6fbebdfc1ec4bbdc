// Sandboxed code execution tools

use crate::tools::definition::ToolDefinition;
use crate::tools::schema::Param;
use dumpling_sdk::endpoints;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "run-js-code",
            endpoints::RUN_JS_CODE,
            "Run JavaScript in a sandbox and return its output.",
        )
        .param(Param::string("code", "JavaScript source to run").required())
        .param(Param::string(
            "commands",
            "Shell commands run first, e.g. \"npm install lodash\"",
        )),
        ToolDefinition::new(
            "run-python-code",
            endpoints::RUN_PYTHON_CODE,
            "Run Python in a sandbox and return its output.",
        )
        .param(Param::string("code", "Python source to run").required())
        .param(Param::string(
            "commands",
            "Shell commands run first, e.g. \"pip install requests\"",
        )),
    ]
}
