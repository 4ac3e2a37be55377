use datagrid_lib::{FilterConfig, MemoryHistory, QueryStateManager};
use log::debug;

use crate::cli::{MergeArgs, QueryAction, QueryArgs};
use crate::error::CliError;

pub fn run(args: &QueryArgs) -> Result<String, CliError> {
    let manager = QueryStateManager::new(MemoryHistory::from_href(&args.href)?);

    match &args.action {
        QueryAction::SetFilter {
            key,
            values,
            merge,
            reset_filters,
        } => {
            let mut config = filter_config(merge);
            if *reset_filters {
                config = config.reset_filters(true);
            }
            manager.set_filter(key, values.clone(), &config);
        }
        QueryAction::SetFilters {
            pairs,
            merge,
            keep_existing,
        } => {
            let filters = parse_pairs(pairs)?;
            let config = filter_config(merge).reset_filters(!keep_existing);
            manager.set_filters(filters, &config);
        }
        QueryAction::Toggle { key, value } => manager.toggle_filter(key, value),
        QueryAction::Remove { key } => manager.remove_filter(key),
        QueryAction::GotoPage { raw } => manager.goto_page_str(raw),
        QueryAction::Clear { keep } => manager.clear_filters(keep.as_slice()),
        QueryAction::Grouped => {
            return Ok(serde_json::to_string_pretty(&manager.grouped_queries())?);
        }
    }

    if manager.navigator().len() == 1 {
        debug!("[query] input rejected, location unchanged");
    }
    Ok(manager.location().href())
}

fn filter_config(merge: &MergeArgs) -> FilterConfig {
    let mut config = FilterConfig::new().clear_keys(merge.clear.iter().cloned());
    if merge.single {
        config = config.single();
    }
    if merge.keep_page {
        config = config.keep_page();
    }
    config
}

/// Splits `KEY=VALUE` arguments, collecting repeated keys in order.
fn parse_pairs(pairs: &[String]) -> Result<Vec<(String, Vec<String>)>, CliError> {
    let mut filters: Vec<(String, Vec<String>)> = Vec::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::InvalidPair(pair.clone()))?;
        match filters.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => filters.push((key.to_string(), vec![value.to_string()])),
        }
    }
    Ok(filters)
}
