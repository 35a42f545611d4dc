use crate::builder::TransactionBuilder;
use crate::credential::Credential;
use crate::error::{LifecycleError, LifecycleResult};
use crate::types::{
    address_to_hex, parse_address, NodeStakeRequest, NodeUnjailRequest, NodeUnstakeRequest,
    RawTransaction, FEE_DENOM,
};
use alloy_primitives::Address;
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Unlocks `<keystore_dir>/<address>.json` with the operator's passphrase and signs
/// lifecycle messages with it.
pub struct KeystoreTransactionBuilder {
    keystore_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct LifecycleMsg {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct Coin {
    amount: String,
    denom: &'static str,
}

#[derive(Debug, Serialize)]
struct SignDoc<'a> {
    chain_id: &'a str,
    entropy: i64,
    fee: Vec<Coin>,
    memo: &'a str,
    msg: &'a LifecycleMsg,
}

#[derive(Debug, Serialize)]
struct TxSignature {
    address: String,
    signature: String,
}

#[derive(Debug, Serialize)]
struct SignedTx<'a> {
    #[serde(flatten)]
    doc: SignDoc<'a>,
    signature: TxSignature,
}

impl KeystoreTransactionBuilder {
    pub fn new(keystore_dir: impl Into<PathBuf>) -> Self {
        Self {
            keystore_dir: keystore_dir.into(),
        }
    }

    pub fn keystore_dir(&self) -> &Path {
        &self.keystore_dir
    }

    pub fn keystore_path(&self, address: Address) -> PathBuf {
        self.keystore_dir
            .join(format!("{}.json", address_to_hex(address)))
    }

    fn unlock(
        &self,
        operator: &str,
        credential: &Credential,
    ) -> LifecycleResult<PrivateKeySigner> {
        let address =
            parse_address(operator).map_err(|err| LifecycleError::Build(err.to_string()))?;
        let path = self.keystore_path(address);
        if !path.exists() {
            return Err(LifecycleError::Build(format!(
                "no keystore for {operator} at {}",
                path.display()
            )));
        }
        let signer = PrivateKeySigner::decrypt_keystore(&path, credential.expose()).map_err(
            |err| LifecycleError::Build(format!("failed to unlock {}: {err}", path.display())),
        )?;
        if signer.address() != address {
            return Err(LifecycleError::Build(format!(
                "keystore {} belongs to {}, not {operator}",
                path.display(),
                address_to_hex(signer.address())
            )));
        }
        Ok(signer)
    }
}

impl TransactionBuilder for KeystoreTransactionBuilder {
    type Transaction = RawTransaction;

    fn build_stake(
        &self,
        request: &NodeStakeRequest,
        credential: &Credential,
    ) -> LifecycleResult<RawTransaction> {
        let signer = self.unlock(&request.operator_address, credential)?;
        let msg = stake_msg(request, signer.address());
        sign_transaction(&signer, &request.network_id, request.fee, &msg, entropy())
    }

    fn build_unstake(
        &self,
        request: &NodeUnstakeRequest,
        credential: &Credential,
    ) -> LifecycleResult<RawTransaction> {
        let signer = self.unlock(&request.operator_address, credential)?;
        let msg = unstake_msg(request.legacy_codec, signer.address());
        sign_transaction(&signer, &request.network_id, request.fee, &msg, entropy())
    }

    fn build_unjail(
        &self,
        request: &NodeUnjailRequest,
        credential: &Credential,
    ) -> LifecycleResult<RawTransaction> {
        let signer = self.unlock(&request.operator_address, credential)?;
        let msg = unjail_msg(request.legacy_codec, signer.address());
        sign_transaction(&signer, &request.network_id, request.fee, &msg, entropy())
    }
}

pub fn stake_msg(request: &NodeStakeRequest, address: Address) -> LifecycleMsg {
    LifecycleMsg {
        kind: msg_type("pos/MsgStake", "pos/8.0MsgStake", request.legacy_codec),
        value: json!({
            "address": address_to_hex(address),
            "chains": request.supported_chains,
            "service_url": request.service_uri,
            "value": request.stake_amount.to_string(),
        }),
    }
}

pub fn unstake_msg(legacy_codec: bool, address: Address) -> LifecycleMsg {
    LifecycleMsg {
        kind: msg_type("pos/MsgBeginUnstake", "pos/8.0MsgBeginUnstake", legacy_codec),
        value: json!({ "validator_address": address_to_hex(address) }),
    }
}

pub fn unjail_msg(legacy_codec: bool, address: Address) -> LifecycleMsg {
    LifecycleMsg {
        kind: msg_type("pos/MsgUnjail", "pos/8.0MsgUnjail", legacy_codec),
        value: json!({ "address": address_to_hex(address) }),
    }
}

fn msg_type(legacy: &'static str, current: &'static str, legacy_codec: bool) -> &'static str {
    if legacy_codec {
        legacy
    } else {
        current
    }
}

/// Sign the canonical document for `msg` and pack it for the raw-tx endpoint.
pub fn sign_transaction(
    signer: &PrivateKeySigner,
    network_id: &str,
    fee: u64,
    msg: &LifecycleMsg,
    entropy: i64,
) -> LifecycleResult<RawTransaction> {
    let doc = SignDoc {
        chain_id: network_id,
        entropy,
        fee: vec![Coin {
            amount: fee.to_string(),
            denom: FEE_DENOM,
        }],
        memo: "",
        msg,
    };
    let sign_bytes = serde_json::to_vec(&doc)
        .map_err(|err| LifecycleError::Build(format!("failed to encode sign document: {err}")))?;
    let signature = signer
        .sign_message_sync(&sign_bytes)
        .map_err(|err| LifecycleError::Build(format!("signing failed: {err}")))?;

    let address = address_to_hex(signer.address());
    let signed = SignedTx {
        doc,
        signature: TxSignature {
            address: address.clone(),
            signature: hex::encode(signature.as_bytes()),
        },
    };
    let raw = serde_json::to_vec(&signed)
        .map_err(|err| LifecycleError::Build(format!("failed to encode transaction: {err}")))?;

    Ok(RawTransaction {
        address,
        raw_hex_bytes: hex::encode(raw),
    })
}

fn entropy() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";

    fn test_signer() -> PrivateKeySigner {
        TEST_KEY.parse().unwrap()
    }

    fn decode(raw: &RawTransaction) -> serde_json::Value {
        let bytes = hex::decode(&raw.raw_hex_bytes).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn stake_request(legacy_codec: bool) -> NodeStakeRequest {
        NodeStakeRequest {
            operator_address: address_to_hex(test_signer().address()),
            stake_amount: 15_000_000_000,
            supported_chains: vec!["0001".to_string(), "0021".to_string()],
            service_uri: "https://node.example:443".to_string(),
            network_id: "testnet".to_string(),
            fee: 10_000,
            legacy_codec,
        }
    }

    #[test]
    fn stake_transaction_carries_the_request() {
        let signer = test_signer();
        let request = stake_request(true);
        let msg = stake_msg(&request, signer.address());
        let raw = sign_transaction(&signer, "testnet", request.fee, &msg, 42).unwrap();

        assert_eq!(raw.address, address_to_hex(signer.address()));
        let tx = decode(&raw);
        assert_eq!(tx["chain_id"], "testnet");
        assert_eq!(tx["entropy"], 42);
        assert_eq!(tx["fee"][0]["amount"], "10000");
        assert_eq!(tx["fee"][0]["denom"], "upokt");
        assert_eq!(tx["msg"]["type"], "pos/MsgStake");
        assert_eq!(tx["msg"]["value"]["value"], "15000000000");
        assert_eq!(tx["msg"]["value"]["chains"], json!(["0001", "0021"]));
        assert_eq!(tx["signature"]["address"], raw.address.as_str());
        // 65-byte recoverable signature
        assert_eq!(tx["signature"]["signature"].as_str().unwrap().len(), 130);
    }

    #[test]
    fn codec_flag_selects_message_type() {
        let address = test_signer().address();
        assert_eq!(stake_msg(&stake_request(false), address).kind, "pos/8.0MsgStake");
        assert_eq!(unstake_msg(true, address).kind, "pos/MsgBeginUnstake");
        assert_eq!(unstake_msg(false, address).kind, "pos/8.0MsgBeginUnstake");
        assert_eq!(unjail_msg(true, address).kind, "pos/MsgUnjail");
        assert_eq!(unjail_msg(false, address).kind, "pos/8.0MsgUnjail");
    }

    #[test]
    fn invalid_operator_address_is_a_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let builder = KeystoreTransactionBuilder::new(dir.path());
        let request = NodeUnjailRequest {
            operator_address: "addr1".to_string(),
            network_id: "testnet".to_string(),
            fee: 1,
            legacy_codec: true,
        };
        let err = builder
            .build_unjail(&request, &Credential::new("pw"))
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Build(_)));
    }

    #[test]
    fn missing_keystore_is_a_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let builder = KeystoreTransactionBuilder::new(dir.path());
        let err = builder
            .build_stake(&stake_request(true), &Credential::new("pw"))
            .unwrap_err();
        match err {
            LifecycleError::Build(message) => assert!(message.contains("no keystore")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn keystore_file_is_named_after_the_address() {
        let builder = KeystoreTransactionBuilder::new("/var/lib/pocket/keystore");
        let address = test_signer().address();
        assert_eq!(
            builder.keystore_path(address),
            PathBuf::from(format!(
                "/var/lib/pocket/keystore/{}.json",
                address_to_hex(address)
            ))
        );
    }

    /// Writes `key` encrypted with `password` under the file name for `owner`.
    fn write_keystore(dir: &Path, key: &str, password: &str, owner: Address) {
        let key = hex::decode(key.trim_start_matches("0x")).unwrap();
        let name = format!("{}.json", address_to_hex(owner));
        PrivateKeySigner::encrypt_keystore(
            dir,
            &mut rand::thread_rng(),
            key,
            password,
            Some(&name),
        )
        .unwrap();
    }

    fn unstake_request(operator: Address) -> NodeUnstakeRequest {
        NodeUnstakeRequest {
            operator_address: address_to_hex(operator),
            network_id: "testnet".to_string(),
            fee: 10_000,
            legacy_codec: false,
        }
    }

    #[test]
    fn unlocked_keystore_signs_the_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let address = test_signer().address();
        write_keystore(dir.path(), TEST_KEY, "correct horse", address);
        let builder = KeystoreTransactionBuilder::new(dir.path());

        let raw = builder
            .build_unstake(&unstake_request(address), &Credential::new("correct horse"))
            .unwrap();
        assert_eq!(raw.address, address_to_hex(address));
        let tx = decode(&raw);
        assert_eq!(tx["chain_id"], "testnet");
        assert_eq!(tx["msg"]["type"], "pos/8.0MsgBeginUnstake");
        assert_eq!(
            tx["msg"]["value"]["validator_address"],
            address_to_hex(address).as_str()
        );
        assert_eq!(tx["signature"]["address"], raw.address.as_str());

        let raw = builder
            .build_stake(&stake_request(true), &Credential::new("correct horse"))
            .unwrap();
        assert_eq!(decode(&raw)["msg"]["type"], "pos/MsgStake");
    }

    #[test]
    fn wrong_passphrase_is_a_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let address = test_signer().address();
        write_keystore(dir.path(), TEST_KEY, "correct horse", address);
        let builder = KeystoreTransactionBuilder::new(dir.path());

        let err = builder
            .build_unstake(&unstake_request(address), &Credential::new("battery staple"))
            .unwrap_err();
        match err {
            LifecycleError::Build(message) => assert!(message.contains("failed to unlock")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn keystore_for_another_key_is_a_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let operator = test_signer().address();
        let other_key = "0x0202020202020202020202020202020202020202020202020202020202020202";
        write_keystore(dir.path(), other_key, "correct horse", operator);
        let builder = KeystoreTransactionBuilder::new(dir.path());

        let err = builder
            .build_unstake(&unstake_request(operator), &Credential::new("correct horse"))
            .unwrap_err();
        match err {
            LifecycleError::Build(message) => assert!(message.contains("belongs to")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
