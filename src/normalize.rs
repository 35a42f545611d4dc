use crate::chain_ids::sanitize_chain_ids;
use crate::codec::resolve_legacy_codec;
use crate::error::{LifecycleError, LifecycleResult};
use crate::types::{
    LifecycleOperation, LifecycleRequest, NodeStakeRequest, NodeUnjailRequest, NodeUnstakeRequest,
};

/// Turn the raw positional arguments of a `nodes` subcommand into a typed request.
///
/// The argument count is checked before anything is parsed. Nothing here touches the
/// terminal or the network.
pub fn normalize(
    operation: LifecycleOperation,
    args: &[String],
) -> LifecycleResult<LifecycleRequest> {
    require_args(operation, args)?;
    warn_ignored(operation, args);

    let required = operation.min_args();
    let request = match operation {
        LifecycleOperation::Stake => {
            let stake_amount = parse_amount(&args[1])?;
            let supported_chains = sanitize_chain_ids(&args[2]);
            let fee = parse_fee(&args[5])?;
            LifecycleRequest::Stake(NodeStakeRequest {
                operator_address: args[0].clone(),
                stake_amount,
                supported_chains,
                service_uri: args[3].clone(),
                network_id: args[4].clone(),
                fee,
                legacy_codec: resolve_legacy_codec(args, required),
            })
        }
        LifecycleOperation::Unstake => LifecycleRequest::Unstake(NodeUnstakeRequest {
            fee: parse_fee(&args[2])?,
            operator_address: args[0].clone(),
            network_id: args[1].clone(),
            legacy_codec: resolve_legacy_codec(args, required),
        }),
        LifecycleOperation::Unjail => LifecycleRequest::Unjail(NodeUnjailRequest {
            fee: parse_fee(&args[2])?,
            operator_address: args[0].clone(),
            network_id: args[1].clone(),
            legacy_codec: resolve_legacy_codec(args, required),
        }),
    };
    Ok(request)
}

pub fn require_args(operation: LifecycleOperation, args: &[String]) -> LifecycleResult<()> {
    let required = operation.min_args();
    if args.len() < required {
        return Err(LifecycleError::ArgumentCount {
            operation,
            required,
            received: args.len(),
        });
    }
    Ok(())
}

pub fn parse_amount(value: &str) -> LifecycleResult<u128> {
    value
        .parse::<u128>()
        .map_err(|source| LifecycleError::NumericParse {
            field: "amount",
            value: value.to_string(),
            source,
        })
}

pub fn parse_fee(value: &str) -> LifecycleResult<u64> {
    value
        .parse::<u64>()
        .map_err(|source| LifecycleError::NumericParse {
            field: "fee",
            value: value.to_string(),
            source,
        })
}

fn warn_ignored(operation: LifecycleOperation, args: &[String]) {
    // one optional codec token is allowed past the minimum
    let accepted = operation.min_args() + 1;
    if args.len() > accepted {
        tracing::warn!(
            %operation,
            ignored = args.len() - accepted,
            "ignoring extra arguments after legacyCodec"
        );
    }
}
