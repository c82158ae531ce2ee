//! Suggestion handlers for options that complete as the user types.

use std::future::Future;

use async_trait::async_trait;

use crate::context::AutocompleteRequest;
use crate::error::CommandResult;
use crate::schema::CommandChoice;

/// Produces suggestions for a focused option.
///
/// Any `async fn(AutocompleteRequest) -> CommandResult<Vec<CommandChoice>>`
/// can be used through [`crate::Autocomplete::from_fn`].
#[async_trait]
pub trait AutocompleteHandler: Send + Sync {
	async fn suggest(&self, request: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>>;
}

pub(crate) struct FnHandler<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> AutocompleteHandler for FnHandler<F>
where
	F: Fn(AutocompleteRequest) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = CommandResult<Vec<CommandChoice>>> + Send + 'static,
{
	async fn suggest(&self, request: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>> {
		(self.0)(request).await
	}
}
