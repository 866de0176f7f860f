#![allow(dead_code)]

use serde_json::{json, Value};
use specsweep::convert::{ConversionOutcome, ConversionRequest, ConvertOptions};
use specsweep::discover::{ParsedDocument, TestItem};
use specsweep::engine::Task;

/// Minimal Swagger 2.0 source document.
pub fn swagger_doc(title: &str) -> Value {
    json!({
        "swagger": "2.0",
        "info": { "title": title, "version": "1.0.0" },
        "host": "api.example.com",
        "paths": {}
    })
}

/// Minimal OpenAPI 3 document, valid for the built-in validator.
pub fn openapi_doc(title: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": { "title": title, "version": "1.0.0" },
        "servers": [{ "url": "https://api.example.com/v1" }],
        "paths": {}
    })
}

/// What a converter would typically make of [`swagger_doc`].
pub fn upgrade(source: &Value) -> Value {
    let mut doc = json!({
        "openapi": "3.0.0",
        "info": source.get("info").cloned().unwrap_or_else(|| json!({})),
        "paths": source.get("paths").cloned().unwrap_or_else(|| json!({})),
    });
    if let Some(host) = source.get("host").and_then(Value::as_str) {
        doc["servers"] = json!([{ "url": format!("https://{host}") }]);
    }
    doc
}

/// Builder for `Task`.
pub struct TaskBuilder {
    item: TestItem,
    content: Value,
    options: ConvertOptions,
}

impl TaskBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            item: TestItem::new(path, false, false),
            content: swagger_doc(path),
            options: ConvertOptions::default(),
        }
    }

    pub fn expect_failure(mut self, val: bool) -> Self {
        self.item.expect_failure = val;
        self
    }

    pub fn forced(mut self, val: bool) -> Self {
        self.item.forced = val;
        self
    }

    pub fn content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    pub fn resolve(mut self, val: bool) -> Self {
        self.options.resolve = val;
        self
    }

    pub fn build(self) -> Task {
        let document = ParsedDocument::admit(self.content)
            .expect("TaskBuilder content must carry a swagger/openapi field");
        Task {
            item: self.item,
            document,
            options: self.options,
        }
    }
}

/// Request for a built task, as the runtime would hand it to a converter.
pub fn request_for(task: Task) -> ConversionRequest {
    ConversionRequest {
        item: task.item,
        source: task.document,
        options: task.options,
    }
}

/// Successful outcome for `task`, producing `document`.
pub fn converted(task: Task, document: Value) -> ConversionOutcome {
    ConversionOutcome::succeeded(request_for(task), document, Vec::new())
}

/// Failed outcome for `task`.
pub fn conversion_failed(task: Task, message: &str) -> ConversionOutcome {
    ConversionOutcome::failed(request_for(task), message, vec!["#/paths".to_string()])
}
