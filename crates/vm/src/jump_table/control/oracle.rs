//! Oracle request/response resolution for witness checks performed while
//! verifying an Oracle response transaction.

use super::types::OracleRequest;
use crate::{
    error::{VmError, VmResult},
    execution_engine::ExecutionEngine,
};
use neo_config::HASH_SIZE;
use neo_core::{Signer, Transaction, TransactionAttribute, UInt160, UInt256};

/// Finds the Oracle response attribute on a transaction, if it carries one.
pub fn get_oracle_response_attribute(transaction: &Transaction) -> Option<(u64, Vec<u8>)> {
    transaction.attributes().iter().find_map(|attribute| match attribute {
        TransactionAttribute::OracleResponse { id, result, .. } => Some((*id, result.clone())),
        _ => None,
    })
}

/// Resolves the signers of the original request transaction an Oracle
/// response is answering, so witness checks run against the requester.
pub fn get_oracle_request_signers(engine: &ExecutionEngine, response_id: u64) -> VmResult<Vec<Signer>> {
    let request = get_oracle_request_from_contract(engine, response_id)?;
    let original_transaction = get_transaction_from_ledger_contract(engine, &request.original_txid)?;
    Ok(original_transaction.signers().to_vec())
}

fn get_oracle_request_from_contract(engine: &ExecutionEngine, request_id: u64) -> VmResult<OracleRequest> {
    let mut storage_key = Vec::with_capacity(28);
    storage_key.extend_from_slice(oracle_contract_hash().as_bytes());
    storage_key.extend_from_slice(&request_id.to_le_bytes());

    let storage_item = engine
        .get_storage_item(&storage_key)
        .ok_or_else(|| VmError::invalid_operation_msg(format!("Oracle request {request_id} not found")))?;
    deserialize_oracle_request(&storage_item)
}

fn get_transaction_from_ledger_contract(engine: &ExecutionEngine, txid: &UInt256) -> VmResult<Transaction> {
    let mut storage_key = Vec::with_capacity(52);
    storage_key.extend_from_slice(ledger_contract_hash().as_bytes());
    storage_key.extend_from_slice(txid.as_bytes());

    // The Ledger contract's storage format isn't modeled at the VM layer;
    // resolving a transaction back from raw storage bytes happens above it.
    let _storage_item = engine
        .get_storage_item(&storage_key)
        .ok_or_else(|| VmError::invalid_operation_msg(format!("Transaction {txid} not found")))?;
    Err(VmError::invalid_operation_msg("Ledger transaction lookup is not available from the VM layer"))
}

fn oracle_contract_hash() -> UInt160 {
    UInt160::from_bytes(&[
        0xfe, 0x92, 0x4b, 0x7c, 0xfd, 0xdf, 0x0c, 0x7b, 0x7e, 0x3b, 0x9c, 0xa9, 0x3a, 0xa8, 0x20, 0x8d, 0x6b, 0x9a,
        0x9a, 0x9a,
    ])
    .unwrap_or_else(|_| UInt160::zero())
}

fn ledger_contract_hash() -> UInt160 {
    UInt160::from_bytes(&[
        0xda, 0x65, 0xb6, 0x00, 0xf7, 0x12, 0x4c, 0xe6, 0xc7, 0x9e, 0x88, 0xfc, 0x19, 0x8b, 0x0f, 0xa8, 0x75, 0x85,
        0x05, 0x8e,
    ])
    .unwrap_or_else(|_| UInt160::zero())
}

fn deserialize_oracle_request(data: &[u8]) -> VmResult<OracleRequest> {
    if data.len() < HASH_SIZE + 9 {
        return Err(VmError::invalid_operation_msg("Invalid Oracle request data"));
    }

    let mut offset = 0;
    let original_txid = UInt256::from_bytes(&data[offset..offset + HASH_SIZE])
        .map_err(|_| VmError::invalid_operation_msg("Invalid original txid"))?;
    offset += HASH_SIZE;

    let gas_for_response = u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap());
    offset += 8;

    let url_length = *data.get(offset).ok_or_else(|| VmError::invalid_operation_msg("Incomplete Oracle request data"))? as usize;
    offset += 1;
    let url_bytes = data
        .get(offset..offset + url_length)
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid URL length in Oracle request"))?;
    let url = String::from_utf8(url_bytes.to_vec()).map_err(|_| VmError::invalid_operation_msg("Invalid URL encoding"))?;

    Ok(OracleRequest { original_txid, gas_for_response, url })
}
