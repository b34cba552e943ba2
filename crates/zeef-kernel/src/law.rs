//! Law-guarded completion
//!
//! The single chokepoint between natural language and the model. The
//! sequence is fixed: build the charter-anchored system prompt, call the
//! kernel deterministically, wrap the raw text in an envelope, record
//! prompt/response digests in the ledger, return the envelope.

use crate::charter::Charter;
use crate::client::{ChatMessage, Kernel};
use crate::envelope::Envelope;
use crate::error::LawError;
use zeef_ledger::{sha256_hex, Ledger};

/// Run a single-turn completion under the charter.
///
/// Content never reaches the ledger verbatim: the recorded `kernel_call`
/// event carries a digest of `system_prompt + "\n" + user_content` and a
/// digest of the raw response.
///
/// # Errors
/// - `LawError::Kernel` - the model call failed (transport, timeout, or
///   schema); nothing is recorded
/// - `LawError::Ledger` - the exchange could not be recorded; the
///   completion fails even though the model answered
pub async fn law_guarded_completion(
    kernel: &Kernel,
    ledger: &Ledger,
    charter: &Charter,
    user_content: &str,
) -> Result<Envelope, LawError> {
    let system_prompt = charter.system_prompt();
    let messages = vec![ChatMessage::user(user_content)];

    let raw_text = kernel.generate(&system_prompt, &messages).await?;

    let envelope = Envelope::wrap(charter, raw_text.clone());

    let prompt_hash =
        sha256_hex(format!("{system_prompt}\n{user_content}").as_bytes());
    let response_hash = sha256_hex(raw_text.as_bytes());
    ledger.record_kernel_call(&prompt_hash, Some(&response_hash))?;

    tracing::debug!(%prompt_hash, %response_hash, "kernel call recorded");
    Ok(envelope)
}
