use crate::error::LifecycleResult;
use crate::types::{RpcEnvelope, SEND_RAW_TX_PATH};
use serde::Serialize;

/// Delivers a serialized transaction to the node and returns its reply untouched.
#[allow(async_fn_in_trait)]
pub trait TransactionSubmitter {
    async fn submit(&self, envelope: RpcEnvelope) -> LifecycleResult<String>;
}

/// Wrap a built transaction for the raw-tx endpoint.
pub fn envelope_for<T: Serialize>(transaction: &T) -> LifecycleResult<RpcEnvelope> {
    Ok(RpcEnvelope {
        path: SEND_RAW_TX_PATH,
        payload: serde_json::to_vec(transaction)?,
    })
}

/// Serialize and submit exactly once. Failures are not retried.
pub async fn dispatch<S, T>(submitter: &S, transaction: &T) -> LifecycleResult<String>
where
    S: TransactionSubmitter,
    T: Serialize,
{
    let envelope = envelope_for(transaction)?;
    tracing::info!(
        path = envelope.path,
        bytes = envelope.payload.len(),
        "submitting transaction"
    );
    submitter.submit(envelope).await
}
