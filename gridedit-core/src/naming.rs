//! Namespaced input names and bracketed form-tree parsing.
//!
//! Every editable cell posts under `GRID[NAMESPACE][RECORDID][FIELD]`. The
//! namespace keeps several editable grids on one page from colliding, and
//! the record id lets one submission carry edits for many rows.

use crate::RecordId;
use serde_json::{Map, Value as JsonValue};

/// Namespace segment used when a grid does not configure its own.
pub const DEFAULT_NAMESPACE: &str = "EditableColumns";

/// Deepest bracket nesting [`parse_form_tree`] expands. Deeper keys stay
/// flat at the top level.
pub const MAX_FORM_NESTING: usize = 32;

/// A posted input name split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFieldName {
    pub grid: String,
    pub namespace: String,
    pub record_id: RecordId,
    pub field: String,
}

/// Encoder/decoder bound to one grid name and namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNameCodec {
    grid: String,
    namespace: String,
}

impl FieldNameCodec {
    pub fn new(grid: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            grid: grid.into(),
            namespace: namespace.into(),
        }
    }

    pub fn grid(&self) -> &str {
        &self.grid
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn encode(&self, record_id: RecordId, field: &str) -> String {
        format!("{}[{}][{}][{}]", self.grid, self.namespace, record_id, field)
    }

    /// Decode a name produced by [`encode`](Self::encode). Names belonging to
    /// another grid or namespace decode to `None`.
    pub fn decode(&self, name: &str) -> Option<DecodedFieldName> {
        decode_field_name(name)
            .filter(|decoded| decoded.grid == self.grid && decoded.namespace == self.namespace)
    }
}

/// Decode any `GRID[NAMESPACE][RECORDID][FIELD]` name.
///
/// Exactly three bracket segments must follow the grid name, none may be
/// empty or contain brackets, and the record id must be all digits.
pub fn decode_field_name(name: &str) -> Option<DecodedFieldName> {
    let (grid, segments) = split_bracket_key(name)?;
    let [namespace, record_id, field] = segments.as_slice() else {
        return None;
    };
    if grid.is_empty() || namespace.is_empty() || field.is_empty() {
        return None;
    }
    let record_id = RecordId::parse_digits(record_id).ok()?;

    Some(DecodedFieldName {
        grid: grid.to_string(),
        namespace: namespace.to_string(),
        record_id,
        field: field.to_string(),
    })
}

/// Split `base[a][b]` into `("base", ["a", "b"])`.
///
/// Returns `None` when the key has text after the last closing bracket, an
/// unterminated bracket, or a bracket inside a segment.
fn split_bracket_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let open = key.find('[')?;
    let base = &key[..open];
    if base.contains(']') {
        return None;
    }
    let mut rest = &key[open..];
    let mut segments = Vec::new();
    while let Some(stripped) = rest.strip_prefix('[') {
        let close = stripped.find(']')?;
        let segment = &stripped[..close];
        if segment.contains('[') {
            return None;
        }
        segments.push(segment);
        rest = &stripped[close + 1..];
    }
    if !rest.is_empty() {
        return None;
    }
    Some((base, segments))
}

// ============================================================================
// FORM TREE
// ============================================================================

/// Build a nested JSON tree from urlencoded pairs using bracket notation.
///
/// `a[b][c]=v` nests objects, `a[]=v` appends to an array, and a key
/// without brackets (or one that does not parse as bracket notation) is
/// stored as-is at the top level. Later pairs overwrite earlier scalars.
/// Keys with more than [`MAX_FORM_NESTING`] bracket segments are also kept
/// flat, which bounds the depth of the returned tree.
pub fn parse_form_tree<I, K, V>(pairs: I) -> JsonValue
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut root = JsonValue::Object(Map::new());
    for (key, value) in pairs {
        let key = key.as_ref();
        let path: Vec<&str> = match split_bracket_key(key) {
            Some((base, segments))
                if !base.is_empty() && segments.len() <= MAX_FORM_NESTING =>
            {
                std::iter::once(base).chain(segments).collect()
            }
            _ => vec![key],
        };
        insert_path(&mut root, &path, value.into());
    }
    root
}

fn insert_path(node: &mut JsonValue, path: &[&str], value: String) {
    let Some((head, rest)) = path.split_first() else {
        *node = JsonValue::String(value);
        return;
    };

    if head.is_empty() {
        if !node.is_array() {
            *node = JsonValue::Array(Vec::new());
        }
        if let JsonValue::Array(items) = node {
            items.push(JsonValue::Null);
            if let Some(last) = items.last_mut() {
                insert_path(last, rest, value);
            }
        }
        return;
    }

    if !node.is_object() {
        *node = JsonValue::Object(Map::new());
    }
    if let JsonValue::Object(map) = node {
        let child = map.entry(head.to_string()).or_insert(JsonValue::Null);
        insert_path(child, rest, value);
    }
}

// =============================================================================
// TESTS
// =============================================================================
