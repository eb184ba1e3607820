use anyhow::{Context, Result, bail};
use ratio_pagination::PaginationConfig;
use ratio_pagination::Paginator;
use ratio_pagination::check::{round_trip, strategies_agree};
use serde_json::json;

use super::cli::PageArgs;
use super::util::{load_store, params};

pub fn exec(config: PaginationConfig, args: PageArgs) -> Result<()> {
    let store = load_store(&args.data)?;
    let params = params(&args, &config)?;
    let paginator = Paginator::new(&store).with_config(config);

    let round = round_trip(&paginator, &params).context("round-trip walk failed")?;
    let agree = strategies_agree(&paginator, &params).context("strategy walk failed")?;

    let out = json!({
        "round_trip": round,
        "strategies_agree": agree,
        "lookups": store.lookups(),
        "queries": store.queries(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);

    if !round.is_ok() || !agree.is_ok() {
        bail!(
            "pagination check failed: {} round-trip and {} agreement mismatches",
            round.mismatches.len(),
            agree.mismatches.len()
        );
    }
    Ok(())
}
