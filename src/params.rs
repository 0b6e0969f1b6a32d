//! Parameter parsing
//!
//! Turns a decoded query-string parameter list into a validated [`QuerySpec`].
//! Pure transformation: every error is raised here, before any store access.
//!
//! Reserved keys are `sort`, `skip`, `limit` and `search`; every other key is
//! a filter. Filter keys end in an optional `__<op>` suffix and, before that,
//! a `__`-separated path of relation names ending in a field name:
//!
//! ```text
//! age__gt=25              numeric comparison on a direct field
//! addresses__city=Berlin  exact match through the addresses relation
//! name__ilike=%john%      case-insensitive pattern match
//! ```

use crate::config::ResolverConfig;
use crate::errors::QueryhausError;
use crate::query::{FilterCondition, FilterOperator, Pagination, QuerySpec, SortKey};
use crate::schema::entity::PathError;
use crate::schema::{EntitySchema, FieldType, ResolvedPath};
use crate::value::FieldValue;

/// Parse raw `(key, value)` parameters against the main entity's schema.
///
/// Keys are expected percent-decoded; duplicate reserved keys keep the last
/// occurrence, duplicate filter keys all apply (AND semantics).
pub fn parse_params(
    params: &[(String, String)],
    schema: &EntitySchema,
    config: &ResolverConfig,
) -> Result<QuerySpec, QueryhausError> {
    let mut sort_raw = None;
    let mut skip_raw = None;
    let mut limit_raw = None;
    let mut search_raw = None;
    let mut filter_params = Vec::new();

    for (key, value) in params {
        match key.as_str() {
            "sort" => sort_raw = Some(value.as_str()),
            "skip" => skip_raw = Some(value.as_str()),
            "limit" => limit_raw = Some(value.as_str()),
            "search" => search_raw = Some(value.as_str()),
            _ => filter_params.push((key.as_str(), value.as_str())),
        }
    }

    let pagination = parse_pagination(skip_raw, limit_raw, config)?;
    let mut spec = QuerySpec::new(pagination);

    for (key, value) in filter_params {
        spec.filters.push(parse_filter(key, value, schema, config)?);
    }

    if let Some(raw) = sort_raw {
        spec.sort = parse_sort(raw, schema)?;
    }

    if let Some(term) = search_raw
        && !term.is_empty()
    {
        spec.search = Some(term.to_string());
    }

    crate::debug_log!(
        entity = %schema.name,
        filters = spec.filters.len(),
        sort_keys = spec.sort.len(),
        "parsed query parameters"
    );

    Ok(spec)
}

/// Split one filter key into path + operator and type its value.
fn parse_filter(
    key: &str,
    value: &str,
    schema: &EntitySchema,
    config: &ResolverConfig,
) -> Result<FilterCondition, QueryhausError> {
    // Longest-known-operator suffix wins; a whole key that is itself a
    // declared field is never split, so schema authors may use `__` in
    // field names.
    let (path_expr, operator) = if schema.field(key).is_some() {
        (key, FilterOperator::Eq)
    } else {
        match key.rsplit_once("__") {
            Some((prefix, suffix)) => match FilterOperator::from_suffix(suffix) {
                Some(op) => (prefix, op),
                None => (key, FilterOperator::Eq),
            },
            None => (key, FilterOperator::Eq),
        }
    };

    let (path, resolved) = resolve_path_expr(key, path_expr, schema, config)?;

    let literal = if operator == FilterOperator::ILike {
        if resolved.field.field_type != FieldType::String {
            return Err(QueryhausError::TypeMismatch {
                key: key.to_string(),
                value: value.to_string(),
                expected: "string pattern",
            });
        }
        FieldValue::Text(value.to_string())
    } else {
        FieldValue::parse(value, resolved.field.field_type).ok_or_else(|| {
            QueryhausError::TypeMismatch {
                key: key.to_string(),
                value: value.to_string(),
                expected: resolved.field.field_type.name(),
            }
        })?
    };

    let relations = resolved.relations.iter().map(|r| (*r).clone()).collect();
    Ok(FilterCondition::new(path, operator, literal).with_relations(relations))
}

/// Resolve a path expression, preferring a declared field over `__` splitting.
fn resolve_path_expr<'a>(
    key: &str,
    path_expr: &str,
    schema: &'a EntitySchema,
    config: &ResolverConfig,
) -> Result<(Vec<String>, ResolvedPath<'a>), QueryhausError> {
    if let Some(field) = schema.field(path_expr) {
        return Ok((
            vec![path_expr.to_string()],
            ResolvedPath {
                relations: Vec::new(),
                field,
            },
        ));
    }

    let segments: Vec<&str> = path_expr.split("__").collect();
    let resolved = schema
        .resolve_path(&segments, config.max_relation_depth)
        .map_err(|err| match err {
            PathError::Unknown { segment } => QueryhausError::UnknownPath {
                key: key.to_string(),
                segment,
            },
            // a stray final segment after a field was positioned as an
            // operator; anything earlier is just an unknown path element
            PathError::Trailing { segment, is_last } => {
                if is_last {
                    QueryhausError::UnsupportedOperator {
                        key: key.to_string(),
                        token: segment,
                    }
                } else {
                    QueryhausError::UnknownPath {
                        key: key.to_string(),
                        segment,
                    }
                }
            }
            PathError::TooDeep => QueryhausError::RelationDepthExceeded {
                key: key.to_string(),
                max_depth: config.max_relation_depth,
            },
        })?;

    let path = segments.iter().map(|s| (*s).to_string()).collect();
    Ok((path, resolved))
}

/// `sort=name,-age`: comma-separated main-entity fields, `-` for descending.
fn parse_sort(raw: &str, schema: &EntitySchema) -> Result<Vec<SortKey>, QueryhausError> {
    let mut keys = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (field, descending) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if schema.field(field).is_none() {
            return Err(QueryhausError::UnknownPath {
                key: "sort".to_string(),
                segment: field.to_string(),
            });
        }

        keys.push(if descending {
            SortKey::desc(field)
        } else {
            SortKey::asc(field)
        });
    }

    Ok(keys)
}

fn parse_pagination(
    skip_raw: Option<&str>,
    limit_raw: Option<&str>,
    config: &ResolverConfig,
) -> Result<Pagination, QueryhausError> {
    let skip = match skip_raw {
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 0 => n as u64,
            _ => {
                return Err(QueryhausError::InvalidPagination(format!(
                    "skip must be a non-negative integer, got '{raw}'"
                )));
            }
        },
        None => 0,
    };

    let limit = match limit_raw {
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n > 0 => n as u64,
            _ => {
                return Err(QueryhausError::InvalidPagination(format!(
                    "limit must be a positive integer, got '{raw}'"
                )));
            }
        },
        None => config.default_limit,
    };

    Ok(Pagination::new(skip, limit).clamped(config.max_limit))
}
