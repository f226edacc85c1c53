//! `System.Crypto.CheckWitness` and the call-flag checks every syscall runs
//! against the current execution context.

use super::{
    oracle::{get_oracle_request_signers, get_oracle_response_attribute},
    types::ScriptContainer,
};
use crate::{
    call_flags::CallFlags,
    error::{VmError, VmResult},
    execution_engine::ExecutionEngine,
};
use neo_config::ADDRESS_SIZE;
use neo_core::{Signer, Transaction, UInt160, WitnessCondition, WitnessRuleAction};

/// Checks whether `hash` authorizes the currently executing script: it is the
/// calling script hash, or a signer of the script container whose witness
/// rules (or default full-scope witness) accept the current call.
pub fn check_witness_internal(engine: &ExecutionEngine, hash: &[u8]) -> VmResult<bool> {
    if hash.len() != ADDRESS_SIZE {
        return Ok(false);
    }
    let target_hash = match UInt160::from_bytes(hash) {
        Ok(h) => h,
        Err(_) => return Ok(false),
    };

    if get_calling_script_hash(engine) == Some(target_hash) {
        return Ok(true);
    }

    match get_script_container(engine) {
        Some(ScriptContainer::Transaction(transaction)) => {
            let signers = get_transaction_signers(engine, &transaction)?;
            match signers.iter().find(|s| s.account == target_hash) {
                Some(signer) => check_witness_rules(engine, signer),
                None => Ok(false),
            }
        }
        Some(ScriptContainer::Block(_)) => {
            validate_call_flags(engine, CallFlags::READ_STATES)?;
            Ok(false)
        }
        None => Ok(false),
    }
}

/// The script hash one frame up the invocation stack, or the current script's
/// own hash when it is the entry point.
pub fn get_calling_script_hash(engine: &ExecutionEngine) -> Option<UInt160> {
    let invocation_stack = engine.invocation_stack();
    if invocation_stack.len() > 1 {
        invocation_stack.get(invocation_stack.len() - 2).map(|ctx| UInt160::from_bytes(&ctx.script_hash()).ok()).flatten()
    } else {
        engine.current_context().map(|ctx| UInt160::from_bytes(&ctx.script_hash()).ok()).flatten()
    }
}

/// Recovers the transaction or block being verified, if the host engine
/// carries one (only `ApplicationEngine` does).
pub fn get_script_container(engine: &ExecutionEngine) -> Option<ScriptContainer> {
    let app_engine = engine.as_application_engine()?;
    if let Some(tx) = app_engine.get_script_container::<Transaction>() {
        return Some(ScriptContainer::Transaction(tx.clone()));
    }
    if let Some(block) = app_engine.get_script_container::<neo_core::Block>() {
        return Some(ScriptContainer::Block(block.clone()));
    }
    None
}

/// Signers of a transaction, following Oracle-response attributes back to the
/// original request's signers instead of the response transaction's own.
pub fn get_transaction_signers(engine: &ExecutionEngine, transaction: &Transaction) -> VmResult<Vec<Signer>> {
    if let Some((response_id, _result)) = get_oracle_response_attribute(transaction) {
        match get_oracle_request_signers(engine, response_id) {
            Ok(signers) => return Ok(signers),
            Err(e) => log::info!("Oracle request signers unavailable ({e}), using transaction signers"),
        }
    }
    Ok(transaction.signers().to_vec())
}

/// Evaluates a signer's witness rules in order; the first matching rule's
/// action decides. A signer with no rules is treated as fully allowed,
/// matching the default (global) witness scope.
pub fn check_witness_rules(engine: &ExecutionEngine, signer: &Signer) -> VmResult<bool> {
    let rules = signer.get_all_rules();
    if rules.is_empty() {
        return Ok(true);
    }
    for rule in rules {
        if condition_matches(&rule.condition, engine)? {
            return Ok(rule.action == WitnessRuleAction::Allow);
        }
    }
    Ok(false)
}

/// Evaluates a witness condition against the current execution context.
/// `Group`/`CalledByGroup` require contract-manifest group membership that
/// isn't available at the VM layer, so they conservatively evaluate false.
fn condition_matches(condition: &WitnessCondition, engine: &ExecutionEngine) -> VmResult<bool> {
    Ok(match condition {
        WitnessCondition::Boolean { value } => *value,
        WitnessCondition::Not { condition } => !condition_matches(condition, engine)?,
        WitnessCondition::And { conditions } => {
            conditions.iter().try_fold(true, |acc, c| condition_matches(c, engine).map(|m| acc && m))?
        }
        WitnessCondition::Or { conditions } => {
            conditions.iter().try_fold(false, |acc, c| condition_matches(c, engine).map(|m| acc || m))?
        }
        WitnessCondition::ScriptHash { hash } => {
            engine.current_context().and_then(|ctx| UInt160::from_bytes(&ctx.script_hash()).ok()) == Some(*hash)
        }
        WitnessCondition::CalledByEntry => engine.invocation_stack().len() <= 1,
        WitnessCondition::CalledByContract { hash } => get_calling_script_hash(engine) == Some(*hash),
        WitnessCondition::Group { .. } | WitnessCondition::CalledByGroup { .. } => false,
    })
}

/// Validates that the current call flags include `required_flags`.
pub fn validate_call_flags(engine: &ExecutionEngine, required_flags: CallFlags) -> VmResult<()> {
    let current_flags = get_current_call_flags(engine)?;
    if !current_flags.has_flag(required_flags) {
        return Err(VmError::invalid_operation_msg(format!(
            "Cannot call this SYSCALL with the flag {current_flags:?}. Required: {required_flags:?}"
        )));
    }
    Ok(())
}

/// The call flags in effect for the current context: native contracts and the
/// system (empty-script) context get everything, regular contracts get the
/// standard permission set.
pub fn get_current_call_flags(engine: &ExecutionEngine) -> VmResult<CallFlags> {
    let Some(context) = engine.current_context() else {
        return Ok(CallFlags::NONE);
    };
    if context.script().len() == 0 {
        return Ok(CallFlags::ALL);
    }
    let script_hash = engine.current_script_hash().unwrap_or_default();
    if is_native_contract(script_hash) {
        Ok(CallFlags::ALL)
    } else {
        Ok(CallFlags::STATES | CallFlags::ALLOW_CALL | CallFlags::ALLOW_NOTIFY)
    }
}

/// Well-known native contract script hashes (NEO, GAS, Policy, RoleManagement, Oracle).
pub fn is_native_contract(script_hash: &[u8]) -> bool {
    const NATIVE_CONTRACTS: [[u8; ADDRESS_SIZE]; 5] = [
        [0xef, 0x4c, 0x73, 0xd4, 0x2d, 0x5f, 0xdf, 0x6e, 0x4d, 0x45, 0x8c, 0xf2, 0x26, 0x1b, 0xf5, 0x7d, 0x76, 0xd7, 0xf1, 0xaa],
        [0xd2, 0xa4, 0xcf, 0xf3, 0x1f, 0x56, 0xb6, 0x14, 0x28, 0x5c, 0x7d, 0x1f, 0x10, 0x92, 0xe7, 0x16, 0x7f, 0x47, 0x63, 0x15],
        [0xcc, 0x5e, 0x4e, 0xdd, 0x78, 0xe6, 0xd3, 0xb0, 0x8c, 0x42, 0xc9, 0x6a, 0x8e, 0x4e, 0x1a, 0x0c, 0x2f, 0x83, 0x4a, 0x05],
        [0x49, 0xcf, 0x4e, 0x5f, 0x4e, 0x94, 0x5d, 0x3b, 0x8c, 0x7d, 0x7e, 0x0d, 0x4f, 0x83, 0xc2, 0x18, 0x11, 0x2f, 0x0e, 0x46],
        [0xfe, 0x92, 0x4b, 0x7c, 0xfd, 0xdf, 0x0c, 0x7b, 0x7e, 0x3b, 0x9c, 0xa9, 0x4e, 0x4f, 0x2d, 0x6e, 0x2a, 0x4e, 0x2c, 0x17],
    ];
    script_hash.len() == ADDRESS_SIZE && NATIVE_CONTRACTS.iter().any(|h| h.as_slice() == script_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn engine() -> ExecutionEngine {
        let mut engine = ExecutionEngine::new(None);
        engine.load_script(Script::new(vec![0; 4], false).unwrap(), -1, 0).unwrap();
        engine
    }

    #[test]
    fn boolean_and_not_conditions_evaluate_without_an_engine_lookup() {
        let engine = engine();
        assert!(condition_matches(&WitnessCondition::Boolean { value: true }, &engine).unwrap());
        assert!(!condition_matches(&WitnessCondition::Not { condition: Box::new(WitnessCondition::Boolean { value: true }) }, &engine).unwrap());
    }

    #[test]
    fn a_signer_with_no_rules_is_fully_allowed() {
        let engine = engine();
        let signer = Signer::with_scope(UInt160::zero(), neo_core::WitnessScope::CALLED_BY_ENTRY);
        assert!(check_witness_rules(&engine, &signer).unwrap());
    }

    #[test]
    fn called_by_entry_matches_when_there_is_a_single_context() {
        let engine = engine();
        assert!(condition_matches(&WitnessCondition::CalledByEntry, &engine).unwrap());
    }

    #[test]
    fn a_bare_engine_has_no_script_container() {
        let engine = engine();
        assert!(get_script_container(&engine).is_none());
    }

    #[test]
    fn is_native_contract_matches_known_hashes_and_rejects_others() {
        let neo_token = [0xef, 0x4c, 0x73, 0xd4, 0x2d, 0x5f, 0xdf, 0x6e, 0x4d, 0x45, 0x8c, 0xf2, 0x26, 0x1b, 0xf5, 0x7d, 0x76, 0xd7, 0xf1, 0xaa];
        assert!(is_native_contract(&neo_token));
        assert!(!is_native_contract(&[0u8; ADDRESS_SIZE]));
    }
}
