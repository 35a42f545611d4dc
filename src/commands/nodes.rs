use crate::builder::{RequestBuilder, TransactionBuilder};
use crate::cli::LifecycleArgs;
use crate::config::Config;
use crate::credential::{CredentialProvider, CredentialSource};
use crate::dispatch::{dispatch, TransactionSubmitter};
use crate::error::LifecycleResult;
use crate::normalize::normalize;
use crate::rpc::RpcClient;
use crate::signer::KeystoreTransactionBuilder;
use crate::types::{LifecycleOperation, LifecycleRequest};
use anyhow::Result;

/// Run one `nodes` subcommand and print the node's reply verbatim.
pub async fn run(
    operation: LifecycleOperation,
    args: LifecycleArgs,
    config: Config,
) -> Result<()> {
    // arguments are checked before any settings are resolved
    let request = normalize(operation, &args.args)?;

    let credentials = CredentialSource::from_flag(args.pwd);
    let transactions = KeystoreTransactionBuilder::new(config.keystore_dir());
    let client = RpcClient::new(config.remote_cli_url()?, config.rpc_timeout())?;
    tracing::debug!(
        %operation,
        keystore = %transactions.keystore_dir().display(),
        node = %client.url,
        interactive = credentials.is_interactive(),
        "resolved node settings"
    );

    let response = submit_request(&request, &credentials, &transactions, &client).await?;
    println!("{response}");
    Ok(())
}

/// Normalize, build and dispatch a lifecycle transaction.
///
/// Any failure stops the pipeline where it happens; the submitter is reached only with
/// a fully built transaction, and at most once.
pub async fn execute<C, B, S>(
    operation: LifecycleOperation,
    raw_args: &[String],
    credentials: &C,
    transactions: &B,
    submitter: &S,
) -> LifecycleResult<String>
where
    C: CredentialProvider,
    B: TransactionBuilder,
    S: TransactionSubmitter,
{
    let request = normalize(operation, raw_args)?;
    submit_request(&request, credentials, transactions, submitter).await
}

/// Build and dispatch an already normalized request.
pub async fn submit_request<C, B, S>(
    request: &LifecycleRequest,
    credentials: &C,
    transactions: &B,
    submitter: &S,
) -> LifecycleResult<String>
where
    C: CredentialProvider,
    B: TransactionBuilder,
    S: TransactionSubmitter,
{
    let transaction = RequestBuilder::new(credentials, transactions).build(request)?;
    dispatch(submitter, &transaction).await
}
