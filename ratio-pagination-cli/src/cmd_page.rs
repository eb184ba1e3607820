use anyhow::{Context, Result};
use ratio_pagination::{
    InfinitePaginationParams, PaginationConfig, Paginator, TablePaginationParams,
};
use serde_json::json;

use super::cli::PageArgs;
use super::util::{decode_cursor, load_store, params, token};

pub fn exec_table(
    config: PaginationConfig,
    args: PageArgs,
    next: Option<String>,
    previous: Option<String>,
) -> Result<()> {
    let store = load_store(&args.data)?;
    let request = TablePaginationParams {
        next: next.as_deref().map(decode_cursor).transpose()?,
        previous: previous.as_deref().map(decode_cursor).transpose()?,
        params: params(&args, &config)?,
    };

    let page = Paginator::new(&store)
        .with_config(config)
        .table(&request)
        .context("table pagination failed")?;

    let out = json!({
        "previous": token(page.previous.as_ref()),
        "next": token(page.next.as_ref()),
        "results": page.results,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn exec_infinite(config: PaginationConfig, args: PageArgs, next: Option<String>) -> Result<()> {
    let store = load_store(&args.data)?;
    let request = InfinitePaginationParams {
        next: next.as_deref().map(decode_cursor).transpose()?,
        params: params(&args, &config)?,
    };

    let page = Paginator::new(&store)
        .with_config(config)
        .infinite(&request)
        .context("infinite pagination failed")?;

    let out = json!({
        "next": token(page.next.as_ref()),
        "results": page.results,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
