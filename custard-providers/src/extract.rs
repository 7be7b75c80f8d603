//! Shared extraction plumbing for the vendor adapters.

use custard_core::{FlavorInfo, ProviderError};
use custard_fetch::html::{collapse_whitespace, is_plausible_flavor_name};
use custard_fetch::{FetchContext, FetchError, FlavorPipeline, FlavorRequest};

/// Accepts `text` as a flavor name if it is plausible.
pub(crate) fn accept(text: &str) -> Result<FlavorInfo, FetchError> {
    let text = collapse_whitespace(text);
    if !is_plausible_flavor_name(&text) {
        return Err(FetchError::extraction(format!(
            "implausible flavor name {text:?}"
        )));
    }
    FlavorInfo::new(text).map_err(|e| FetchError::extraction(e.to_string()))
}

/// Runs `pipeline` for `store_id` and classifies the outcome.
///
/// A pipeline where every strategy missed becomes
/// [`ProviderError::FlavorNotAvailable`] listing what was tried.
pub(crate) async fn current_flavor(
    pipeline: &FlavorPipeline,
    ctx: &FetchContext,
    store_id: &str,
) -> Result<FlavorInfo, ProviderError> {
    let req = FlavorRequest::new(ctx, store_id);
    let outcome = pipeline.execute(&req).await;
    let tried = outcome.errors().join("; ");
    match outcome.result {
        Ok(result) => Ok(result.flavor),
        Err(FetchError::AllStrategiesFailed) => Err(ProviderError::flavor_not_available_from(
            format!("No flavor found for {store_id}: {tried}"),
            FetchError::AllStrategiesFailed,
        )),
        Err(error) => Err(error.into()),
    }
}
