use tracing::info;

use crate::classify::FieldClass;
use crate::naming::env_key;
use crate::parse::Leaf;
use crate::redact::{is_sensitive, REDACTED};
use crate::traits::{Inspector, Record};

/// Renders every leaf of `record` as a `KEY: value` line, in declaration order.
///
/// Keys are derived exactly as they are for loading. Absent nested records
/// are skipped and sensitive values are replaced by [`REDACTED`].
pub fn render(record: &dyn Record, prefix: &str) -> Vec<String> {
    let mut renderer = Renderer {
        path: prefix.to_string(),
        lines: Vec::new(),
    };
    record.inspect(&mut renderer);
    renderer.lines
}

/// Writes the resolved configuration to the log, one event per leaf.
pub fn log_with_prefix(record: &dyn Record, prefix: &str) {
    for line in render(record, prefix) {
        info!("{line}");
    }
}

struct Renderer {
    path: String,
    lines: Vec<String>,
}

impl Inspector for Renderer {
    fn leaf(&mut self, name: &str, _class: FieldClass, leaf: Option<&dyn Leaf>) {
        let key = env_key(&self.path, name);
        let value = if is_sensitive(&key) {
            REDACTED.to_string()
        } else {
            leaf.map_or_else(|| "None".to_string(), |leaf| leaf.render())
        };
        self.lines.push(format!("{key}: {value}"));
    }

    fn nested(&mut self, name: &str, record: Option<&dyn Record>) {
        let Some(record) = record else {
            return;
        };
        let key = env_key(&self.path, name);
        let parent = std::mem::replace(&mut self.path, key);
        record.inspect(self);
        self.path = parent;
    }
}
