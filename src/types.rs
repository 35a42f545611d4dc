use alloy_primitives::Address;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SEND_RAW_TX_PATH: &str = "/v1/client/rawtx";
pub const DEFAULT_REMOTE_CLI_URL: &str = "http://localhost:8081";
pub const FEE_DENOM: &str = "upokt";

pub const STAKE_MIN_ARGS: usize = 6;
pub const UNSTAKE_MIN_ARGS: usize = 3;
pub const UNJAIL_MIN_ARGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOperation {
    Stake,
    Unstake,
    Unjail,
}

impl LifecycleOperation {
    pub fn min_args(self) -> usize {
        match self {
            LifecycleOperation::Stake => STAKE_MIN_ARGS,
            LifecycleOperation::Unstake => UNSTAKE_MIN_ARGS,
            LifecycleOperation::Unjail => UNJAIL_MIN_ARGS,
        }
    }

    /// Text shown before the credential is read.
    ///
    /// Stake says "Passphrase" while the other two say "Password"; operator scripts
    /// match on both strings.
    pub fn prompt(self) -> &'static str {
        match self {
            LifecycleOperation::Stake => "Enter Passphrase: ",
            LifecycleOperation::Unstake | LifecycleOperation::Unjail => "Enter Password: ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LifecycleOperation::Stake => "stake",
            LifecycleOperation::Unstake => "unstake",
            LifecycleOperation::Unjail => "unjail",
        }
    }
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStakeRequest {
    pub operator_address: String,
    pub stake_amount: u128,
    pub supported_chains: Vec<String>,
    #[serde(rename = "serviceURI")]
    pub service_uri: String,
    #[serde(rename = "networkID")]
    pub network_id: String,
    pub fee: u64,
    pub legacy_codec: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUnstakeRequest {
    pub operator_address: String,
    #[serde(rename = "networkID")]
    pub network_id: String,
    pub fee: u64,
    pub legacy_codec: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUnjailRequest {
    pub operator_address: String,
    #[serde(rename = "networkID")]
    pub network_id: String,
    pub fee: u64,
    pub legacy_codec: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleRequest {
    Stake(NodeStakeRequest),
    Unstake(NodeUnstakeRequest),
    Unjail(NodeUnjailRequest),
}

impl LifecycleRequest {
    pub fn operation(&self) -> LifecycleOperation {
        match self {
            LifecycleRequest::Stake(_) => LifecycleOperation::Stake,
            LifecycleRequest::Unstake(_) => LifecycleOperation::Unstake,
            LifecycleRequest::Unjail(_) => LifecycleOperation::Unjail,
        }
    }

    pub fn operator_address(&self) -> &str {
        match self {
            LifecycleRequest::Stake(req) => &req.operator_address,
            LifecycleRequest::Unstake(req) => &req.operator_address,
            LifecycleRequest::Unjail(req) => &req.operator_address,
        }
    }

    pub fn legacy_codec(&self) -> bool {
        match self {
            LifecycleRequest::Stake(req) => req.legacy_codec,
            LifecycleRequest::Unstake(req) => req.legacy_codec,
            LifecycleRequest::Unjail(req) => req.legacy_codec,
        }
    }
}

/// Body handed to the submit collaborator. Consumed by value, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEnvelope {
    pub path: &'static str,
    pub payload: Vec<u8>,
}

/// Signed transaction in the shape the node's raw-tx endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub address: String,
    pub raw_hex_bytes: String,
}

pub fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim()).map_err(|err| anyhow!("invalid address {value}: {err}"))
}

/// Lower-case hex without the `0x` prefix, the form node addresses are written in.
pub fn address_to_hex(value: Address) -> String {
    hex::encode(value.as_slice())
}
