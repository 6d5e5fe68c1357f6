//! Replay traces - Recorded host activity, one JSON record per line
//!
//! A trace interleaves hook events with the memory writes and controller
//! lifetimes the probe needs to re-validate them. Blank lines and lines
//! starting with `#` are ignored.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::events::HookEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum TraceRecord {
    /// An intercepted call, flattened so the event tag sits beside `record`
    Hook {
        #[serde(flatten)]
        event: HookEvent,
    },
    /// A controller instance appeared at `base`
    Bind { structure: String, base: u64 },
    /// A controller instance was destroyed
    Unbind { structure: String },
    /// The value of a known field on a bound controller
    Memory {
        structure: String,
        field: String,
        value: i32,
    },
    /// Let `count` frames elapse
    Frame {
        #[serde(default = "one_frame")]
        count: u32,
    },
}

fn one_frame() -> u32 {
    1
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            serde_json::from_str(line.trim())
                .with_context(|| format!("Invalid trace record on line {}", number + 1))
        })
        .collect()
}

pub async fn load_trace(path: &Path) -> Result<Vec<TraceRecord>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    parse_trace(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mixed_records() {
        let trace = r#"
# opening the item menu
{"record":"bind","structure":"item_window","base":4096}
{"record":"memory","structure":"item_window","field":"state","value":2}
{"record":"hook","event":"item_menu_state_changed","state":"use_list"}
{"record":"frame"}
{"record":"frame","count":30}
{"record":"unbind","structure":"item_window"}
"#;
        let records = parse_trace(trace).unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(
            records[0],
            TraceRecord::Bind {
                structure: "item_window".to_string(),
                base: 4096
            }
        );
        assert!(matches!(
            &records[2],
            TraceRecord::Hook {
                event: HookEvent::ItemMenuStateChanged { .. }
            }
        ));
        assert_eq!(records[3], TraceRecord::Frame { count: 1 });
        assert_eq!(records[4], TraceRecord::Frame { count: 30 });
    }

    #[test]
    fn test_reports_offending_line() {
        let trace = "{\"record\":\"frame\"}\n\n{\"record\":\"teleport\"}\n";
        let err = parse_trace(trace).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
