use crate::chain_ids::validate_chain_ids;
use crate::credential::{Credential, CredentialProvider};
use crate::error::LifecycleResult;
use crate::types::{LifecycleRequest, NodeStakeRequest, NodeUnjailRequest, NodeUnstakeRequest};
use serde::Serialize;

/// Signs lifecycle requests into something the node will accept.
///
/// Address validation, key lookup and chain id checks beyond emptiness all happen
/// behind this trait.
pub trait TransactionBuilder {
    type Transaction: Serialize;

    fn build_stake(
        &self,
        request: &NodeStakeRequest,
        credential: &Credential,
    ) -> LifecycleResult<Self::Transaction>;

    fn build_unstake(
        &self,
        request: &NodeUnstakeRequest,
        credential: &Credential,
    ) -> LifecycleResult<Self::Transaction>;

    fn build_unjail(
        &self,
        request: &NodeUnjailRequest,
        credential: &Credential,
    ) -> LifecycleResult<Self::Transaction>;
}

pub struct RequestBuilder<'a, C, B> {
    credentials: &'a C,
    transactions: &'a B,
}

impl<'a, C, B> RequestBuilder<'a, C, B>
where
    C: CredentialProvider,
    B: TransactionBuilder,
{
    pub fn new(credentials: &'a C, transactions: &'a B) -> Self {
        Self {
            credentials,
            transactions,
        }
    }

    /// Acquire the operator's credential and hand the request to the signer.
    ///
    /// A stake request with empty chain ids is refused before the prompt is shown.
    pub fn build(&self, request: &LifecycleRequest) -> LifecycleResult<B::Transaction> {
        if let LifecycleRequest::Stake(stake) = request {
            validate_chain_ids(&stake.supported_chains)?;
        }

        let operation = request.operation();
        let credential = self.credentials.acquire(operation.prompt())?;

        tracing::debug!(
            %operation,
            operator = request.operator_address(),
            legacy_codec = request.legacy_codec(),
            "building lifecycle transaction"
        );

        match request {
            LifecycleRequest::Stake(stake) => self.transactions.build_stake(stake, &credential),
            LifecycleRequest::Unstake(unstake) => {
                self.transactions.build_unstake(unstake, &credential)
            }
            LifecycleRequest::Unjail(unjail) => self.transactions.build_unjail(unjail, &credential),
        }
    }
}
