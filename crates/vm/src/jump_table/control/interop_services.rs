//! Interop service implementations for the Neo Virtual Machine.

use super::{
    storage::{calculate_storage_delete_fee, calculate_storage_put_fee, construct_storage_key, is_storage_context_readonly},
    syscall::add_fee,
    types::{InteropParameter, StorageContext},
    witness::{check_witness_internal, get_current_call_flags, get_script_container},
};
use crate::{execution_engine::ExecutionEngine, stack_item::StackItem, Error};
use std::sync::Arc;

/// Invokes an interop service by name with already-converted parameters.
pub fn invoke_interop_service(
    engine: &mut ExecutionEngine,
    service_name: &str,
    parameters: Vec<InteropParameter>,
) -> crate::Result<Option<StackItem>> {
    match service_name {
        "System.Runtime.Platform" => Ok(Some(StackItem::from_byte_string(b"NEO".to_vec()))),
        "System.Runtime.GetTrigger" => {
            let trigger_value = match engine.as_application_engine() {
                Some(app_engine) => app_engine.trigger().as_byte() as i64,
                None => 0x40, // Application trigger
            };
            Ok(Some(StackItem::from_int(trigger_value)))
        }
        "System.Runtime.GetTime" => {
            let timestamp = engine
                .as_application_engine()
                .and_then(|app_engine| app_engine.get_persisting_block_timestamp())
                .unwrap_or_else(current_unix_millis);
            Ok(Some(StackItem::from_int(timestamp as i64)))
        }
        "System.Runtime.Log" => {
            if let Some(InteropParameter::String(message)) = parameters.first() {
                let script_hash = engine.current_script_hash().unwrap_or_default().to_vec();
                if let Some(app_engine) = engine.as_application_engine_mut() {
                    app_engine.add_notification(crate::application_engine::NotificationEvent {
                        script_hash,
                        name: "Log".to_string(),
                        arguments: vec![StackItem::from_byte_string(message.as_bytes().to_vec())],
                    });
                }
            }
            Ok(None)
        }
        "System.Runtime.Notify" => {
            if let (Some(InteropParameter::String(event_name)), Some(state_param)) = (parameters.first(), parameters.get(1)) {
                let script_hash = engine.current_script_hash().unwrap_or_default().to_vec();
                if let Some(app_engine) = engine.as_application_engine_mut() {
                    app_engine.add_notification(crate::application_engine::NotificationEvent {
                        script_hash,
                        name: event_name.clone(),
                        arguments: vec![convert_parameter_to_stack_item(state_param)],
                    });
                }
            }
            Ok(None)
        }
        "System.Storage.GetContext" => {
            let contract_hash = engine
                .current_script_hash()
                .ok_or_else(|| Error::InvalidOperation("No current script context".to_string()))?;
            let storage_context = StorageContext {
                script_hash: contract_hash.to_vec(),
                is_read_only: false,
                id: contract_hash.first().copied().unwrap_or(0) as i32,
            };
            Ok(Some(StackItem::InteropInterface(Arc::new(storage_context))))
        }
        "System.Storage.Get" => match (parameters.first(), parameters.get(1)) {
            (Some(InteropParameter::InteropInterface(_)), Some(InteropParameter::ByteArray(_))) => Ok(Some(StackItem::Null)),
            _ => Err(Error::InvalidOperation("Invalid storage get parameters".to_string())),
        },
        "System.Storage.Put" => match (parameters.first(), parameters.get(1), parameters.get(2)) {
            (Some(InteropParameter::InteropInterface(context_item)), Some(InteropParameter::ByteArray(key)), Some(InteropParameter::ByteArray(value))) => {
                if is_storage_context_readonly(context_item) {
                    return Err(Error::InvalidOperation("Storage context is read-only".to_string()));
                }
                if key.len() > 64 {
                    return Err(Error::InvalidOperation("Storage key too large".to_string()));
                }
                if value.len() > 65535 {
                    return Err(Error::InvalidOperation("Storage value too large".to_string()));
                }
                let script_hash = engine.current_script_hash().unwrap_or_default().to_vec();
                let storage_key = construct_storage_key(&script_hash, key);
                let storage_fee = calculate_storage_put_fee(key.len(), value.len(), 0);
                add_fee(engine, storage_fee)?;
                match engine.as_application_engine_mut() {
                    Some(app_engine) => app_engine
                        .storage_put(&storage_key, value.clone())
                        .map(|_| None)
                        .map_err(|_| Error::InvalidOperation("Storage put failed".to_string())),
                    None => Err(Error::InvalidOperation("Storage operations require application engine".to_string())),
                }
            }
            _ => Err(Error::InvalidOperation("Invalid storage put parameters".to_string())),
        },
        "System.Storage.Delete" => match (parameters.first(), parameters.get(1)) {
            (Some(InteropParameter::InteropInterface(context_item)), Some(InteropParameter::ByteArray(key))) => {
                if is_storage_context_readonly(context_item) {
                    return Err(Error::InvalidOperation("Storage context is read-only".to_string()));
                }
                if key.len() > 64 {
                    return Err(Error::InvalidOperation("Storage key too large".to_string()));
                }
                let script_hash = engine.current_script_hash().unwrap_or_default().to_vec();
                let storage_key = construct_storage_key(&script_hash, key);
                let deletion_fee = calculate_storage_delete_fee(key.len());
                add_fee(engine, deletion_fee)?;
                match engine.as_application_engine_mut() {
                    Some(app_engine) => app_engine
                        .storage_delete(&storage_key)
                        .map(|_| None)
                        .map_err(|_| Error::InvalidOperation("Storage delete failed".to_string())),
                    None => Err(Error::InvalidOperation("Storage operations require application engine".to_string())),
                }
            }
            _ => Err(Error::InvalidOperation("Invalid storage delete parameters".to_string())),
        },
        "System.Contract.Call" => match (parameters.first(), parameters.get(1), parameters.get(2)) {
            (Some(InteropParameter::Hash160(script_hash)), Some(InteropParameter::String(method)), Some(InteropParameter::Integer(call_flags))) => {
                match engine.as_application_engine_mut() {
                    Some(app_engine) => {
                        let flags = crate::call_flags::CallFlags::from_bits(*call_flags as u32)
                            .ok_or_else(|| Error::InvalidOperation("Invalid call flags".to_string()))?;
                        let arguments: Vec<StackItem> = parameters.iter().skip(3).map(convert_parameter_to_stack_item).collect();
                        let result = app_engine.call_contract(script_hash, method, flags, arguments)?;
                        Ok(Some(result))
                    }
                    None => Ok(Some(StackItem::Null)),
                }
            }
            _ => Err(Error::InvalidOperation("Invalid contract call parameters".to_string())),
        },
        "System.Contract.GetCallFlags" => {
            let flags = get_current_call_flags(engine)?.0 as i64;
            Ok(Some(StackItem::from_int(flags)))
        }
        "System.Crypto.CheckWitness" => {
            if let Some(InteropParameter::Hash160(hash)) = parameters.first() {
                get_script_container(engine).ok_or_else(|| Error::InvalidOperation("No script container available".to_string()))?;
                let is_witness_valid = check_witness_internal(engine, hash)?;
                Ok(Some(StackItem::from_bool(is_witness_valid)))
            } else {
                Err(Error::InvalidOperation("Invalid witness check parameters".to_string()))
            }
        }
        _ => Err(Error::InvalidOperation(format!("Unknown interop service: {service_name}"))),
    }
}

fn current_unix_millis() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// Converts an already-resolved interop parameter back to a stack item, for
/// values re-surfaced through notifications or contract call results.
fn convert_parameter_to_stack_item(param: &InteropParameter) -> StackItem {
    match param {
        InteropParameter::Any(item) => item.clone(),
        InteropParameter::String(s) => StackItem::from_byte_string(s.as_bytes().to_vec()),
        InteropParameter::Integer(i) => StackItem::from_int(*i),
        InteropParameter::Boolean(b) => StackItem::from_bool(*b),
        InteropParameter::ByteArray(bytes) => StackItem::from_byte_string(bytes.clone()),
        InteropParameter::Hash160(hash) => StackItem::from_byte_string(hash.clone()),
        InteropParameter::Array(items) => StackItem::Array(items.iter().map(convert_parameter_to_stack_item).collect()),
        InteropParameter::InteropInterface(interface_item) => interface_item.clone(),
    }
}
