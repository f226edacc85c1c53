//! Gas calculation system for Neo VM
//!
//! Matches the reference implementation ApplicationEngine.OpCodePrices.cs exactly

use crate::op_code::OpCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Gas costs for VM operations
pub static OPCODE_GAS_COSTS: Lazy<HashMap<OpCode, i64>> = Lazy::new(|| {
    let mut costs = HashMap::new();

    // Push operations
    costs.insert(OpCode::PUSHINT8, 1 << 0); // 1
    costs.insert(OpCode::PUSHINT16, 1 << 0); // 1
    costs.insert(OpCode::PUSHINT32, 1 << 0); // 1
    costs.insert(OpCode::PUSHINT64, 1 << 0); // 1
    costs.insert(OpCode::PUSHINT128, 1 << 2); // 4
    costs.insert(OpCode::PUSHINT256, 1 << 2); // 4
    costs.insert(OpCode::PUSHT, 1 << 0); // 1
    costs.insert(OpCode::PUSHF, 1 << 0); // 1
    costs.insert(OpCode::PUSHA, 1 << 2); // 4
    costs.insert(OpCode::PUSHNULL, 1 << 0); // 1
    costs.insert(OpCode::PUSHDATA1, 1 << 3); // 8
    costs.insert(OpCode::PUSHDATA2, 1 << 9); // 512
    costs.insert(OpCode::PUSHDATA4, 1 << 12); // 4096

    // Arithmetic operations
    costs.insert(OpCode::ADD, 90);
    costs.insert(OpCode::SUB, 90);
    costs.insert(OpCode::MUL, 300);
    costs.insert(OpCode::DIV, 300);
    costs.insert(OpCode::MOD, 300);
    costs.insert(OpCode::NEGATE, 1 << 2); // 4
    costs.insert(OpCode::ABS, 30);
    costs.insert(OpCode::SIGN, 30);
    costs.insert(OpCode::POW, 1000);
    costs.insert(OpCode::SQRT, 1000);

    // Bitwise operations
    costs.insert(OpCode::AND, 90);
    costs.insert(OpCode::OR, 90);
    costs.insert(OpCode::XOR, 90);
    costs.insert(OpCode::INVERT, 30);
    costs.insert(OpCode::SHL, 300);
    costs.insert(OpCode::SHR, 300);

    // Comparison operations
    costs.insert(OpCode::EQUAL, 90);
    costs.insert(OpCode::NOTEQUAL, 90);
    costs.insert(OpCode::LT, 90);
    costs.insert(OpCode::LE, 90);
    costs.insert(OpCode::GT, 90);
    costs.insert(OpCode::GE, 90);
    costs.insert(OpCode::MIN, 90);
    costs.insert(OpCode::MAX, 90);
    costs.insert(OpCode::WITHIN, 90);

    // Stack operations
    costs.insert(OpCode::DEPTH, 60);
    costs.insert(OpCode::DROP, 60);
    costs.insert(OpCode::NIP, 60);
    costs.insert(OpCode::DUP, 60);
    costs.insert(OpCode::OVER, 60);
    costs.insert(OpCode::PICK, 60);
    costs.insert(OpCode::TUCK, 60);
    costs.insert(OpCode::SWAP, 60);
    costs.insert(OpCode::ROT, 60);
    costs.insert(OpCode::ROLL, 60);
    costs.insert(OpCode::REVERSE3, 60);
    costs.insert(OpCode::REVERSE4, 60);
    costs.insert(OpCode::REVERSEN, 400);

    // Control flow operations
    costs.insert(OpCode::NOP, 1 << 0); // 1
    costs.insert(OpCode::JMP, 1 << 1); // 2
    costs.insert(OpCode::JMPIF, 1 << 1); // 2
    costs.insert(OpCode::JMPIFNOT, 1 << 1); // 2
    costs.insert(OpCode::JMPEQ, 1 << 1); // 2
    costs.insert(OpCode::JMPNE, 1 << 1); // 2
    costs.insert(OpCode::JMPGT, 1 << 1); // 2
    costs.insert(OpCode::JMPGE, 1 << 1); // 2
    costs.insert(OpCode::JMPLT, 1 << 1); // 2
    costs.insert(OpCode::JMPLE, 1 << 1); // 2
    costs.insert(OpCode::CALL, 1 << 9); // 512
    costs.insert(OpCode::CALL_L, 1 << 9); // 512
    costs.insert(OpCode::CALLA, 1 << 9); // 512
    costs.insert(OpCode::ABORT, 0); // 0
    costs.insert(OpCode::ASSERT, 1 << 0); // 1
    costs.insert(OpCode::THROW, 1 << 9); // 512
    costs.insert(OpCode::TRY, 1 << 2); // 4
    costs.insert(OpCode::ENDTRY, 1 << 2); // 4
    costs.insert(OpCode::ENDFINALLY, 1 << 2); // 4
    costs.insert(OpCode::RET, 0); // 0
    costs.insert(OpCode::SYSCALL, 0); // priced per-syscall, see jump_table::control::syscall

    // Type operations
    costs.insert(OpCode::ISNULL, 60);
    costs.insert(OpCode::ISTYPE, 60);
    costs.insert(OpCode::CONVERT, 240);

    // Array operations
    costs.insert(OpCode::NEWARRAY, 1 << 9); // 512
    costs.insert(OpCode::NEWARRAY0, 1 << 4); // 16
    costs.insert(OpCode::NEWSTRUCT, 1 << 9); // 512
    costs.insert(OpCode::NEWSTRUCT0, 1 << 4); // 16
    costs.insert(OpCode::NEWMAP, 1 << 3); // 8
    costs.insert(OpCode::SIZE, 1 << 2); // 4
    costs.insert(OpCode::HASKEY, 1 << 22); // 4194304
    costs.insert(OpCode::KEYS, 1 << 4); // 16
    costs.insert(OpCode::VALUES, 1 << 4); // 16
    costs.insert(OpCode::PICKITEM, 1 << 22); // 4194304
    costs.insert(OpCode::APPEND, 1 << 15); // 32768
    costs.insert(OpCode::SETITEM, 1 << 22); // 4194304
    costs.insert(OpCode::REMOVE, 1 << 15); // 32768
    costs.insert(OpCode::CLEARITEMS, 1 << 4); // 16
    costs.insert(OpCode::POPITEM, 1 << 15); // 32768

    // String operations
    costs.insert(OpCode::CAT, 1 << 15); // 32768
    costs.insert(OpCode::SUBSTR, 1 << 15); // 32768
    costs.insert(OpCode::LEFT, 1 << 15); // 32768
    costs.insert(OpCode::RIGHT, 1 << 15); // 32768

    costs
});
