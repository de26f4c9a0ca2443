use crate::DictError;

/// One mapping line of a source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingLine {
    /// 1-based line number in the source text.
    pub line_no: usize,
    pub key: String,
    /// Space-separated variants in listed order, duplicates removed.
    pub variants: Vec<String>,
}

impl MappingLine {
    /// All variants joined into one string of distinct characters, first occurrence first.
    pub fn joined(&self) -> String {
        let mut out = String::new();
        for c in self.variants.iter().flat_map(|v| v.chars()) {
            if !out.contains(c) {
                out.push(c);
            }
        }
        out
    }
}

/// Split a source table into mapping lines.
///
/// Lines starting with `#` and blank lines are skipped. Every other line must be
/// `<key>\t<variant> [<variant> ...]`.
pub fn parse_lines(text: &str, source: &str) -> Result<Vec<MappingLine>, DictError> {
    let mut out = Vec::new();
    for (idx, raw) in text.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let format_err = |message: String| DictError::Format { url: source.to_string(), line: line_no, message };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(format_err(format!("expected 2 tab-separated fields, found {}", fields.len())));
        }
        let key = fields[0].trim();
        if key.is_empty() {
            return Err(format_err("empty key".into()));
        }
        let mut variants: Vec<String> = Vec::new();
        for v in fields[1].split(' ').map(str::trim).filter(|v| !v.is_empty()) {
            if !variants.iter().any(|seen| seen == v) {
                variants.push(v.to_string());
            }
        }
        if variants.is_empty() {
            return Err(format_err(format!("no variants listed for `{key}`")));
        }
        out.push(MappingLine { line_no, key: key.to_string(), variants });
    }
    Ok(out)
}
