use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{MetaValue, Metadata};
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockFormat {
    Yaml,
    Toml,
}

impl BlockFormat {
    fn from_delimiter(line: &str) -> Option<BlockFormat> {
        lazy_static! {
            static ref DELIMITER_REGEX: Regex = Regex::new(r"^(?P<delim>-{3}|\+{3})\s*$").unwrap();
        }

        let cap = DELIMITER_REGEX.captures(line)?;
        match cap.name("delim").map(|d| d.as_str()) {
            Some("---") => Some(BlockFormat::Yaml),
            Some("+++") => Some(BlockFormat::Toml),
            _ => None,
        }
    }
}

/// Splits a content file into its front matter and its body.
///
/// Front matter is either YAML between `---` lines or TOML between `+++`
/// lines, and must be the first non-blank thing in the file. A file without
/// it, or whose opening delimiter is never closed, has empty metadata and the
/// whole text as body.
///
/// `file_name` is only used in error messages.
pub fn extract_front_matter(file_name: &str, raw: &str) -> BlogResult<(Metadata, String)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.split_inclusive('\n');
    let mut offset = 0;

    // Blank lines before the opening delimiter are ok
    let format = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => offset += line.len(),
            Some(line) => match BlockFormat::from_delimiter(line) {
                Some(format) => {
                    offset += line.len();
                    break format;
                }
                None => return Ok((Metadata::default(), strip_leading_blank_lines(raw).to_string())),
            },
            None => return Ok((Metadata::default(), String::new())),
        }
    };

    let block_start = offset;
    let block_end = loop {
        match lines.next() {
            Some(line) => {
                if BlockFormat::from_delimiter(line) == Some(format) {
                    let end = offset;
                    offset += line.len();
                    break end;
                }
                offset += line.len();
            }
            // An opening line with no closing one is a thematic break, not front matter
            None => return Ok((Metadata::default(), strip_leading_blank_lines(raw).to_string())),
        }
    };

    let block = &raw[block_start..block_end];
    let metadata = match format {
        BlockFormat::Yaml => parse_yaml(file_name, block)?,
        BlockFormat::Toml => parse_toml(file_name, block)?,
    };
    let body = strip_leading_blank_lines(&raw[offset..]).to_string();

    Ok((metadata, body))
}

fn strip_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        if rest[..pos].trim().is_empty() {
            rest = &rest[pos + 1..];
        } else {
            break;
        }
    }
    if rest.trim().is_empty() {
        ""
    } else {
        rest
    }
}

fn parse_yaml(file_name: &str, block: &str) -> BlogResult<Metadata> {
    if block.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(block)
        .map_err(|e| BlogError::malformed(file_name, format!("invalid YAML front matter: {}", e)))?;

    let mapping = match value {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => return Ok(Metadata::default()),
        _ => return Err(BlogError::malformed(file_name, "front matter is not a key/value mapping")),
    };

    let mut items = BTreeMap::new();
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        if let Some(value) = yaml_to_meta(value) {
            items.insert(key, value);
        }
    }

    Ok(Metadata(items))
}

fn yaml_to_meta(value: serde_yaml::Value) -> Option<MetaValue> {
    match value {
        serde_yaml::Value::String(s) => Some(MetaValue::Text(s)),
        serde_yaml::Value::Bool(b) => Some(MetaValue::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(MetaValue::Integer(i))
            } else {
                n.as_f64().map(MetaValue::Float)
            }
        }
        serde_yaml::Value::Sequence(seq) => Some(MetaValue::List(seq.into_iter().filter_map(yaml_to_meta).collect())),
        serde_yaml::Value::Tagged(tagged) => yaml_to_meta(tagged.value),
        serde_yaml::Value::Null | serde_yaml::Value::Mapping(_) => None,
    }
}

fn parse_toml(file_name: &str, block: &str) -> BlogResult<Metadata> {
    let table: toml::Table = toml::from_str(block)
        .map_err(|e| BlogError::malformed(file_name, format!("invalid TOML front matter: {}", e)))?;

    let items = table.into_iter()
        .filter_map(|(k, v)| toml_to_meta(v).map(|v| (k, v)))
        .collect();

    Ok(Metadata(items))
}

fn toml_to_meta(value: toml::Value) -> Option<MetaValue> {
    match value {
        toml::Value::String(s) => Some(MetaValue::Text(s)),
        toml::Value::Integer(i) => Some(MetaValue::Integer(i)),
        toml::Value::Float(x) => Some(MetaValue::Float(x)),
        toml::Value::Boolean(b) => Some(MetaValue::Bool(b)),
        toml::Value::Datetime(dt) => Some(MetaValue::Text(dt.to_string())),
        toml::Value::Array(items) => Some(MetaValue::List(items.into_iter().filter_map(toml_to_meta).collect())),
        toml::Value::Table(_) => None,
    }
}
