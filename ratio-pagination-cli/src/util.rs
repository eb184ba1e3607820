use anyhow::{Context, Result};
use ratio_pagination::{
    Cursor, Field, MemoryStage, MemoryStore, PaginationConfig, PaginationParams, Predicate,
    parse_match,
};
use std::path::Path;

use super::cli::PageArgs;

pub fn load_config(path: Option<&Path>) -> Result<PaginationConfig> {
    match path {
        Some(path) => PaginationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(PaginationConfig::default()),
    }
}

pub fn load_store(path: &Path) -> Result<MemoryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    let store = MemoryStore::from_json(&raw)
        .with_context(|| format!("parsing dataset {} (expected a JSON array)", path.display()))?;
    log::info!("loaded {} documents from {}", store.len(), path.display());
    Ok(store)
}

pub fn decode_cursor(token: &str) -> Result<Cursor> {
    Cursor::decode(token).with_context(|| format!("decoding cursor {token:?}"))
}

pub fn params(args: &PageArgs, config: &PaginationConfig) -> Result<PaginationParams<MemoryStage>> {
    let filter = match &args.filter {
        Some(json) => parse_match(json, &config.primary_key).context("parsing --match")?,
        None => Predicate::match_all(),
    };
    Ok(PaginationParams {
        limit: args.limit,
        sort_ascending: args.ascending,
        paginated_field: Field::resolve(args.field.as_deref(), &config.primary_key),
        filter,
        extra_stages: Vec::new(),
    })
}

pub fn token(cursor: Option<&Cursor>) -> serde_json::Value {
    cursor.map_or(serde_json::Value::Null, |c| serde_json::Value::String(c.encode()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> PageArgs {
        PageArgs {
            data: PathBuf::from("reviews.json"),
            limit: Some(5),
            field: Some("_id".to_string()),
            ascending: true,
            filter: Some(r#"{"user_id": "miguel"}"#.to_string()),
        }
    }

    #[test]
    fn test_params_from_args() {
        let params = params(&args(), &PaginationConfig::default()).unwrap();
        assert_eq!(params.limit, Some(5));
        assert!(params.sort_ascending);
        assert_eq!(params.paginated_field, Field::PrimaryKey);
        assert!(!params.filter.is_match_all());
    }

    #[test]
    fn test_bad_match_is_reported() {
        let mut args = args();
        args.filter = Some("{".to_string());
        let err = params(&args, &PaginationConfig::default()).unwrap_err();
        assert!(format!("{err:#}").starts_with("parsing --match"));
    }

    #[test]
    fn test_token_round_trip() {
        let cursor = Cursor::new(42);
        let serde_json::Value::String(encoded) = token(Some(&cursor)) else {
            panic!("expected a string token");
        };
        assert_eq!(decode_cursor(&encoded).unwrap(), cursor);
        assert_eq!(token(None), serde_json::Value::Null);
    }
}
