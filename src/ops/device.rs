use crate::core::config::COMMAND_SDK_LEVEL;
use crate::shell::CommandExecutor;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// System property access through the shell. The SDK level is cached once it has been
/// read successfully; a failed read is retried on the next call.
pub struct DeviceProps {
    executor: CommandExecutor,
    sdk_override: Option<u32>,
    sdk_level: OnceLock<u32>,
}

impl DeviceProps {
    pub fn new(executor: CommandExecutor, sdk_override: Option<u32>) -> Self {
        Self {
            executor,
            sdk_override,
            sdk_level: OnceLock::new(),
        }
    }

    pub fn sdk_level(&self) -> Option<u32> {
        if let Some(level) = self.sdk_override {
            return Some(level);
        }
        if let Some(level) = self.sdk_level.get() {
            return Some(*level);
        }
        let result = self.executor.run_command(COMMAND_SDK_LEVEL);
        if !result.succeeded() {
            warn!(reason = ?result.failure(), "could not read sdk level");
            return None;
        }
        let level = result.message().trim().parse::<u32>().ok()?;
        Some(*self.sdk_level.get_or_init(|| level))
    }

    pub fn properties(&self) -> HashMap<String, String> {
        let result = self.executor.run_command("getprop");
        parse_getprop(result.message())
    }
}

fn parse_getprop(output: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    for line in output.lines() {
        let line = line.trim();
        if !line.starts_with('[') {
            continue;
        }
        if let Some(idx) = line.find("]: [") {
            let key = &line[1..idx];
            let rest = &line[idx + 4..];
            if let Some(end) = rest.rfind(']') {
                props.insert(key.to_string(), rest[..end].to_string());
            }
        }
    }
    props
}
