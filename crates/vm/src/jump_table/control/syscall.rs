//! Syscall infrastructure and parameter conversion for the Neo Virtual Machine.

use super::{
    types::{InteropParameter, ParameterType, SyscallDescriptor},
    witness::validate_call_flags,
};
const ONE_MEGABYTE: usize = 1024 * 1024;
const MAX_SCRIPT_SIZE: u64 = 1 << 10; // 1024
const ADDRESS_SIZE: usize = 20;
const SECONDS_PER_BLOCK: u64 = 15;
use crate::{
    error::{VmError, VmResult},
    execution_engine::ExecutionEngine,
    instruction::Instruction,
    stack_item::StackItem,
};
const MAX_BLOCK_SIZE: u64 = 1 << 20; // 1MB
use num_traits::ToPrimitive;
/// Implements the SYSCALL operation.
pub fn syscall(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let syscall_hash = instruction.operand_as::<u32>()?;

    let descriptor = get_interop_descriptor(syscall_hash).ok_or_else(|| {
        VmError::invalid_operation_msg(format!("Unknown syscall: 0x{:08x}", syscall_hash))
    })?;

    validate_call_flags(engine, descriptor.required_call_flags)?;

    add_fee(engine, descriptor.fixed_price)?;

    let mut parameters = Vec::new();
    for param_type in descriptor.parameters.iter().rev() {
        let context = engine
            .current_context_mut()
            .ok_or_else(|| VmError::invalid_operation_msg("No current context".to_string()))?;
        let stack = context.evaluation_stack_mut();
        let stack_item = stack.pop()?;
        let converted_param = convert_parameter(stack_item, param_type)?;
        parameters.push(converted_param);
    }
    parameters.reverse(); // Restore original order

    let result =
        super::interop_services::invoke_interop_service(engine, &descriptor.name, parameters)?;

    if let Some(return_value) = result {
        let context = engine
            .current_context_mut()
            .ok_or_else(|| VmError::invalid_operation_msg("No current context".to_string()))?;
        let stack = context.evaluation_stack_mut();
        stack.push(return_value);
    }

    Ok(())
}

/// Gets an interop descriptor by hash
pub fn get_interop_descriptor(hash: u32) -> Option<SyscallDescriptor> {
    match hash {
        0x49252821 => Some(SyscallDescriptor {
            name: "System.Runtime.Platform".to_string(),
            fixed_price: 8,
            required_call_flags: crate::call_flags::CallFlags::NONE,
            parameters: vec![],
            return_type: ParameterType::String,
        }),
        0xDAD2CE00 => Some(SyscallDescriptor {
            name: "System.Runtime.GetTrigger".to_string(),
            fixed_price: 8,
            required_call_flags: crate::call_flags::CallFlags::NONE,
            parameters: vec![],
            return_type: ParameterType::Integer,
        }),
        0x4E2FCDF1 => Some(SyscallDescriptor {
            name: "System.Runtime.GetTime".to_string(),
            fixed_price: 8,
            required_call_flags: crate::call_flags::CallFlags::NONE,
            parameters: vec![],
            return_type: ParameterType::Integer,
        }),
        0x83C5C61F => Some(SyscallDescriptor {
            name: "System.Runtime.Log".to_string(),
            fixed_price: 32768, // 1 << SECONDS_PER_BLOCK
            required_call_flags: crate::call_flags::CallFlags::ALLOW_NOTIFY,
            parameters: vec![ParameterType::String],
            return_type: ParameterType::Void,
        }),
        0xF827EC8C => Some(SyscallDescriptor {
            name: "System.Runtime.Notify".to_string(),
            fixed_price: 32768, // 1 << SECONDS_PER_BLOCK
            required_call_flags: crate::call_flags::CallFlags::ALLOW_NOTIFY,
            parameters: vec![ParameterType::String, ParameterType::Any],
            return_type: ParameterType::Void,
        }),

        0x9BF667CE => Some(SyscallDescriptor {
            name: "System.Storage.GetContext".to_string(),
            fixed_price: 16,
            required_call_flags: crate::call_flags::CallFlags::READ_STATES,
            parameters: vec![],
            return_type: ParameterType::InteropInterface,
        }),
        0x925DE831 => Some(SyscallDescriptor {
            name: "System.Storage.Get".to_string(),
            fixed_price: MAX_BLOCK_SIZE, // 1 << ADDRESS_SIZE
            required_call_flags: crate::call_flags::CallFlags::READ_STATES,
            parameters: vec![ParameterType::InteropInterface, ParameterType::ByteArray],
            return_type: ParameterType::ByteArray,
        }),
        0xE63F1884 => Some(SyscallDescriptor {
            name: "System.Storage.Put".to_string(),
            fixed_price: 0, // Dynamic pricing
            required_call_flags: crate::call_flags::CallFlags::WRITE_STATES,
            parameters: vec![ParameterType::InteropInterface, ParameterType::ByteArray],
            return_type: ParameterType::Void,
        }),
        0x8DE29EF2 => Some(SyscallDescriptor {
            name: "System.Storage.Delete".to_string(),
            fixed_price: MAX_BLOCK_SIZE, // 1 << ADDRESS_SIZE
            required_call_flags: crate::call_flags::CallFlags::WRITE_STATES,
            parameters: vec![ParameterType::InteropInterface, ParameterType::ByteArray],
            return_type: ParameterType::Void,
        }),

        0x627D5B52 => Some(SyscallDescriptor {
            name: "System.Contract.Call".to_string(),
            fixed_price: 32768, // 1 << SECONDS_PER_BLOCK
            required_call_flags: crate::call_flags::CallFlags::READ_STATES
                | crate::call_flags::CallFlags::ALLOW_CALL,
            parameters: vec![
                ParameterType::Hash160,
                ParameterType::String,
                ParameterType::Array,
            ],
            return_type: ParameterType::Any,
        }),
        0x41AF2FF8 => Some(SyscallDescriptor {
            name: "System.Contract.GetCallFlags".to_string(),
            fixed_price: MAX_SCRIPT_SIZE, // 1 << 10
            required_call_flags: crate::call_flags::CallFlags::NONE,
            parameters: vec![],
            return_type: ParameterType::Integer,
        }),

        0x726CB6DA => Some(SyscallDescriptor {
            name: "System.Crypto.CheckWitness".to_string(),
            fixed_price: MAX_BLOCK_SIZE, // 1 << ADDRESS_SIZE
            required_call_flags: crate::call_flags::CallFlags::NONE,
            parameters: vec![ParameterType::Hash160],
            return_type: ParameterType::Boolean,
        }),
        0xE0982952 => Some(SyscallDescriptor {
            name: "System.Crypto.CheckMultisig".to_string(),
            fixed_price: 0, // Dynamic pricing
            required_call_flags: crate::call_flags::CallFlags::NONE,
            parameters: vec![ParameterType::Array, ParameterType::Array],
            return_type: ParameterType::Boolean,
        }),

        _ => None,
    }
}

/// Charges a syscall's fixed price, scaled by the policy exec fee factor.
/// When running under an `ApplicationEngine` the charge goes through its gas
/// tracking (and real limit); a bare `ExecutionEngine` falls back to its own
/// stub accounting.
pub fn add_fee(engine: &mut ExecutionEngine, fee: u64) -> VmResult<()> {
    const EXEC_FEE_FACTOR: u64 = 30; // Default ExecFeeFactor from PolicyContract
    let actual_fee = fee.saturating_mul(EXEC_FEE_FACTOR) as i64;

    if let Some(app_engine) = engine.as_application_engine_mut() {
        app_engine.add_gas_consumed(actual_fee)?;
        if app_engine.gas_consumed() > app_engine.gas_limit() {
            return Err(VmError::execution_halted_msg("Gas limit exceeded".to_string()));
        }
        return Ok(());
    }

    engine.add_gas_consumed(actual_fee)?;
    if engine.gas_consumed() > engine.gas_limit() {
        engine.set_state(crate::execution_engine::VMState::FAULT);
        return Err(VmError::execution_halted_msg("Gas limit exceeded".to_string()));
    }
    Ok(())
}

/// Converts stack item to parameter
pub fn convert_parameter(
    item: StackItem,
    param_type: &ParameterType,
) -> VmResult<InteropParameter> {
    match param_type {
        ParameterType::Boolean => {
            let value = item.as_bool()?;
            Ok(InteropParameter::Boolean(value))
        }
        ParameterType::Integer => {
            let big_int = item.as_int()?;
            let value = big_int.to_i64().unwrap_or(0);
            Ok(InteropParameter::Integer(value))
        }
        ParameterType::ByteArray => {
            let value = item.as_bytes()?;
            Ok(InteropParameter::ByteArray(value))
        }
        ParameterType::String => {
            let bytes = item.as_bytes()?;
            let value = String::from_utf8(bytes)
                .map_err(|_| VmError::invalid_operation_msg("Invalid UTF-8 string".to_string()))?;
            Ok(InteropParameter::String(value))
        }
        ParameterType::Hash160 => {
            let bytes = item.as_bytes()?;
            if bytes.len() != ADDRESS_SIZE {
                return Err(VmError::invalid_operation_msg(
                    "Invalid Hash160 length".to_string(),
                ));
            }
            Ok(InteropParameter::Hash160(bytes))
        }
        ParameterType::Array => {
            // Convert stack item to array of parameters
            match &item {
                StackItem::Array(items) => {
                    let mut array_params = Vec::new();
                    for array_item in items {
                        // proper parameter type inference and conversion

                        let converted_param = match array_item {
                            StackItem::Integer(i) => {
                                InteropParameter::Integer(i.to_i64().unwrap_or(0))
                            }
                            StackItem::Boolean(b) => InteropParameter::Boolean(*b),
                            StackItem::ByteString(bytes) => {
                                InteropParameter::ByteArray(bytes.clone())
                            }
                            StackItem::Array(nested_array) => {
                                let nested_params: Vec<InteropParameter> = nested_array
                                    .iter()
                                    .map(|nested_item| {
                                        match nested_item {
                                            StackItem::Integer(nested_i) => {
                                                InteropParameter::Integer(
                                                    nested_i.to_i64().unwrap_or(0),
                                                )
                                            }
                                            StackItem::Boolean(nested_b) => {
                                                InteropParameter::Boolean(*nested_b)
                                            }
                                            StackItem::ByteString(nested_bytes) => {
                                                InteropParameter::ByteArray(nested_bytes.clone())
                                            }
                                            _ => InteropParameter::Any(nested_item.clone()), // Fallback for complex types
                                        }
                                    })
                                    .collect();
                                InteropParameter::Array(nested_params)
                            }
                            StackItem::InteropInterface(_) => {
                                InteropParameter::InteropInterface(array_item.clone())
                            }
                            _ => InteropParameter::Any(array_item.clone()), // Fallback for complex types
                        };

                        array_params.push(converted_param);
                    }
                    Ok(InteropParameter::Array(array_params))
                }
                _ => {
                    // Single item treated as array with one element
                    Ok(InteropParameter::Array(vec![InteropParameter::Any(item)]))
                }
            }
        }
        ParameterType::InteropInterface => Ok(InteropParameter::InteropInterface(item)),
        ParameterType::Any => Ok(InteropParameter::Any(item)),
        ParameterType::Void => Err(VmError::invalid_operation_msg(
            "Cannot convert to void parameter".to_string(),
        )),
    }
}
