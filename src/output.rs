use serde::Serialize;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Decorative output is suppressed when `QUIZDECK_QUIET` is `1` or `true`
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("QUIZDECK_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputMode::Json } else { OutputMode::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    command: &'a str,
    data: T,
}

/// Build the JSON envelope printed for a successful command
pub fn success_envelope<T: Serialize>(command: &str, data: T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&Envelope { ok: true, command, data })?)
}

/// Print a success envelope in JSON mode; human mode prints its own output
pub fn emit_success<T: Serialize>(mode: OutputMode, command: &str, data: T) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", success_envelope(command, data)?);
    }
    Ok(())
}

/// Print an error envelope in JSON mode
pub fn emit_error(mode: OutputMode, command: &str, message: &str) {
    if mode == OutputMode::Json {
        let data = serde_json::json!({ "ok": false, "command": command, "error": message });
        println!("{}", data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode() {
        assert!(OutputMode::from_flag(false).is_human());
        assert_eq!(OutputMode::from_flag(true), OutputMode::Json);
    }

    #[test]
    fn test_success_envelope() {
        let text = success_envelope("import", serde_json::json!({ "added": 2 })).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["command"], "import");
        assert_eq!(value["data"]["added"], 2);
    }
}
